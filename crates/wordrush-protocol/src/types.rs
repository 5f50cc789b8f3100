//! The message types that travel on the wire.
//!
//! Both directions use internally tagged JSON: a `kind` field selects
//! the variant, payload fields sit alongside it. A guess from a player
//! looks like `{"kind":"guess","text":"gopher"}`; the broadcast echo
//! looks like `{"kind":"guess","guess":"gopher","player":"ada","correct":true}`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomCode
// ---------------------------------------------------------------------------

/// A human-shareable room identifier, e.g. `tidal-onyx-fern`.
///
/// Newtype over `String` so a room code can't be confused with a player
/// name in a signature. `#[serde(transparent)]` keeps it a plain string
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wraps a raw code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// ---------------------------------------------------------------------------
// RoomSettings
// ---------------------------------------------------------------------------

/// Per-room tunables. Replaced wholesale by a settings event — there is
/// no partial merge, every field must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    /// Seconds between letter reveals. Values below 1 are treated as 1.
    pub interval_seconds: u64,
    /// Minimum word length for the next round's selection.
    pub min_length: usize,
    /// Maximum word length for the next round's selection.
    pub max_length: usize,
}

impl RoomSettings {
    /// The reveal interval as a `Duration`, floored at one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 5,
            min_length: 3,
            max_length: 21,
        }
    }
}

// ---------------------------------------------------------------------------
// ScoreEntry
// ---------------------------------------------------------------------------

/// One row of the scoreboard broadcast. Ordering across entries is
/// unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The player's self-assigned name.
    pub name: String,
    /// Current score. Monotonically non-decreasing, never reset.
    pub score: u32,
}

// ---------------------------------------------------------------------------
// ClientMessage — player → room
// ---------------------------------------------------------------------------

/// Messages a player may send to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClientMessage {
    /// A guess at the current secret word. `text` is sent raw; the
    /// engine normalizes it before comparison.
    Guess { text: String },

    /// Replace the room settings.
    Settings { settings: RoomSettings },
}

// ---------------------------------------------------------------------------
// ServerMessage — room → player(s)
// ---------------------------------------------------------------------------

/// Messages the room broadcasts (or sends directly) to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServerMessage {
    /// The current clue and masked word. `displayed` has one character
    /// per letter position — `_` for hidden — joined by single spaces.
    Word { clue: String, displayed: String },

    /// Echo of a guess to everyone, correct or not. `guess` is the
    /// raw, non-normalized text the player submitted.
    Guess {
        guess: String,
        player: String,
        correct: bool,
    },

    /// Full scoreboard snapshot.
    Scoreboard { players: Vec<ScoreEntry> },

    /// The settings now in effect.
    Settings { settings: RoomSettings },
}

// =========================================================================
// Tests
// =========================================================================
