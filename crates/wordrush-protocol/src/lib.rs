//! Wire protocol for Wordrush.
//!
//! Every message that crosses a player's WebSocket is defined here as a
//! tagged union — a `kind` field selects the payload shape. The room
//! engine and the server glue both depend on this crate and on nothing
//! of each other's internals.

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    ClientMessage, RoomCode, RoomSettings, ScoreEntry, ServerMessage,
};
