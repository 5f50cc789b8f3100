//! Error types for the room layer.

use wordrush_lexicon::LexiconError;
use wordrush_protocol::RoomCode;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No room exists under this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// A room already exists under this code.
    #[error("room code {0} already in use")]
    CodeInUse(RoomCode),

    /// The room's event channel is closed — the engine task is gone.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),

    /// Word selection failed while creating the room.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
