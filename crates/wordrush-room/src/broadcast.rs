//! Best-effort fan-out of one message to every registered player.
//!
//! Delivery is fire-and-forget telemetry to connected viewers: a send
//! failure for one player (receiver dropped) never prevents delivery to
//! the rest, and there is no acknowledgment or retry.

use std::sync::Arc;

use tokio::sync::RwLock;
use wordrush_protocol::ServerMessage;

use crate::registry::PlayerRegistry;

/// Fan-out over a shared player registry.
///
/// Cheap to clone — it's an `Arc` around the same registry the engine
/// writes to. Reads take the registry's read lock, so broadcasts can
/// overlap with each other but never with a join.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<RwLock<PlayerRegistry>>,
}

impl Broadcaster {
    /// Wraps a shared registry.
    pub fn new(registry: Arc<RwLock<PlayerRegistry>>) -> Self {
        Self { registry }
    }

    /// Sends a message to every registered player. Broadcasting to an
    /// empty registry is a no-op.
    pub async fn broadcast(&self, msg: &ServerMessage) {
        let registry = self.registry.read().await;
        fan_out(&registry, msg);
    }

    /// Snapshots the scoreboard and broadcasts it in one read-lock
    /// acquisition, so the board sent is the board every receiver sees.
    pub async fn broadcast_scoreboard(&self) {
        let registry = self.registry.read().await;
        let msg = ServerMessage::Scoreboard {
            players: registry.scoreboard(),
        };
        fan_out(&registry, &msg);
    }

    /// Sends a message to a single player by name. Unknown names and
    /// dead receivers are ignored.
    pub async fn send_to(&self, name: &str, msg: ServerMessage) {
        let registry = self.registry.read().await;
        if let Some(player) = registry.get(name) {
            if !player.send(msg) {
                tracing::debug!(player = name, "send to disconnected player dropped");
            }
        }
    }
}

fn fan_out(registry: &PlayerRegistry, msg: &ServerMessage) {
    let mut failed = 0usize;
    for player in registry.iter() {
        if !player.send(msg.clone()) {
            failed += 1;
        }
    }
    if failed > 0 {
        tracing::debug!(failed, "broadcast skipped disconnected players");
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn setup() -> (Broadcaster, Arc<RwLock<PlayerRegistry>>) {
        let registry = Arc::new(RwLock::new(PlayerRegistry::new()));
        (Broadcaster::new(Arc::clone(&registry)), registry)
    }

    fn word() -> ServerMessage {
        ServerMessage::Word {
            clue: "c".into(),
            displayed: "_".into(),
        }
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_registry_is_a_noop() {
        let (bcast, _registry) = setup();
        bcast.broadcast(&word()).await;
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_player() {
        let (bcast, registry) = setup();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        {
            let mut reg = registry.write().await;
            reg.insert("ada", tx1);
            reg.insert("bob", tx2);
        }

        bcast.broadcast(&word()).await;
        assert_eq!(rx1.try_recv().unwrap(), word());
        assert_eq!(rx2.try_recv().unwrap(), word());
    }

    #[tokio::test]
    async fn test_one_dead_receiver_does_not_block_the_rest() {
        let (bcast, registry) = setup();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        {
            let mut reg = registry.write().await;
            reg.insert("gone", tx1);
            reg.insert("bob", tx2);
        }
        drop(rx1);

        bcast.broadcast(&word()).await;
        assert_eq!(rx2.try_recv().unwrap(), word());
    }

    #[tokio::test]
    async fn test_send_to_unknown_player_is_ignored() {
        let (bcast, _registry) = setup();
        bcast.send_to("ghost", word()).await;
    }
}
