//! The per-room game engine — the core of Wordrush.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns the
//! authoritative game state. All mutating input — player joins, guesses,
//! settings changes, reveal-timer fires — funnels through one ordered
//! event stream consumed by that single task, so no two state
//! transitions ever interleave.
//!
//! # Key types
//!
//! - [`RoomEngine`] (internal) — the actor; spawned via [`RoomRegistry::create`]
//! - [`RoomHandle`] — cheap-to-clone handle for submitting events
//! - [`RevealMask`] — per-position hidden/revealed state of the word
//! - [`PlayerRegistry`] / [`Broadcaster`] — who is attached, and fan-out
//! - [`RoomRegistry`] — process-wide code → room map

mod broadcast;
mod engine;
mod error;
mod mask;
mod registry;
mod rooms;
mod round;
mod timer;

pub use broadcast::Broadcaster;
pub use engine::{spawn_room, RoomEvent, RoomHandle};
pub use error::RoomError;
pub use mask::{AllRevealed, RevealMask};
pub use registry::{Player, PlayerRegistry, PlayerSender};
pub use rooms::RoomRegistry;
pub use round::Round;
pub use timer::RevealTimer;
