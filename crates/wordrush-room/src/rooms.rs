//! Process-wide room registry: code → running room engine.
//!
//! Explicitly constructed and injected at startup, never ambient global
//! state. Entries are added on room creation; there is currently no
//! eviction — rooms live until process shutdown.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use wordrush_lexicon::Lexicon;
use wordrush_protocol::{RoomCode, RoomSettings};

use crate::engine::{spawn_room, RoomHandle};
use crate::RoomError;

/// All active rooms in the process.
pub struct RoomRegistry {
    lexicon: Arc<Lexicon>,
    rooms: RwLock<HashMap<RoomCode, RoomHandle>>,
}

impl RoomRegistry {
    /// Creates an empty registry drawing words from the given lexicon.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Spawns a room under `code` with default settings.
    ///
    /// # Errors
    /// [`RoomError::CodeInUse`] if a room already holds this code.
    pub async fn create(&self, code: RoomCode) -> Result<RoomHandle, RoomError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&code) {
            return Err(RoomError::CodeInUse(code));
        }
        let handle = spawn_room(
            code.clone(),
            Arc::clone(&self.lexicon),
            RoomSettings::default(),
        )?;
        rooms.insert(code.clone(), handle.clone());
        tracing::info!(room = %code, "room created");
        Ok(handle)
    }

    /// Looks up a running room by code.
    pub async fn lookup(&self, code: &RoomCode) -> Option<RoomHandle> {
        self.rooms.read().await.get(code).cloned()
    }

    /// Whether a room exists under this code.
    pub async fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.read().await.contains_key(code)
    }

    /// Number of active rooms.
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Whether no rooms exist.
    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
