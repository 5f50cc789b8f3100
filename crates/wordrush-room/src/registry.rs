//! The set of players currently attached to a room.
//!
//! The registry itself is a plain map; the engine shares it behind a
//! `tokio::sync::RwLock` so the broadcast path (readers) can run
//! concurrently with each other but never with a join (writer).

use std::collections::HashMap;

use tokio::sync::mpsc;
use wordrush_protocol::{ScoreEntry, ServerMessage};

/// Channel sender delivering outbound messages to one player's
/// connection task. Unbounded so the engine never blocks on a slow or
/// disconnected receiver.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// One attached player: name, score, and the transport handle.
#[derive(Debug)]
pub struct Player {
    name: String,
    score: u32,
    sender: PlayerSender,
}

impl Player {
    /// The player's self-assigned name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Queues a message to this player. Returns `false` if the receiver
    /// is gone (connection task ended).
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.sender.send(msg).is_ok()
    }
}

/// Name → player map for one room.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<String, Player>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player, replacing any existing entry with the same
    /// name. The displaced player is returned so the caller can observe
    /// the invalidated transport; its score carries over to the new
    /// entry (scores are never reset).
    pub fn insert(&mut self, name: impl Into<String>, sender: PlayerSender) -> Option<Player> {
        let name = name.into();
        let score = self.players.get(&name).map_or(0, Player::score);
        self.players.insert(
            name.clone(),
            Player {
                name,
                score,
                sender,
            },
        )
    }

    /// Adds points to a player's score, returning the new total.
    /// Unknown names are a no-op returning `None`.
    pub fn credit(&mut self, name: &str, points: u32) -> Option<u32> {
        let player = self.players.get_mut(name)?;
        player.score += points;
        Some(player.score)
    }

    /// Snapshot of every player's name and score. Order unspecified.
    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        self.players
            .values()
            .map(|p| ScoreEntry {
                name: p.name.clone(),
                score: p.score,
            })
            .collect()
    }

    /// Iterates over all attached players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Looks up a player by name.
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Number of attached players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the room has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
