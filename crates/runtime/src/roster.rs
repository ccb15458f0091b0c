//! Connected players.
//!
//! The engine identifies players by a recycled slot index. The roster maps
//! each connection to a fresh [`PlayerId`] so per-player state never leaks
//! to whoever takes the slot next.

use game_core::PlayerId;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Connection {
    slot: u32,
    player: PlayerId,
}

/// Connected players in connect order.
#[derive(Debug, Default)]
pub struct PlayerRoster {
    connections: Vec<Connection>,
    next: u64,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token for a new connection.
    ///
    /// If the slot was still occupied (missed disconnect), the stale token is
    /// returned alongside so the caller can clean it up.
    pub fn connect(&mut self, slot: u32) -> (PlayerId, Option<PlayerId>) {
        let replaced = self.slot_owner(slot);
        if let Some(stale) = replaced {
            warn!(
                target: "runtime::roster",
                slot,
                player = stale.0,
                "slot reused without disconnect"
            );
            self.remove(stale);
        }

        self.next += 1;
        let player = PlayerId(self.next);
        self.connections.push(Connection { slot, player });
        debug!(target: "runtime::roster", slot, player = player.0, "player connected");
        (player, replaced)
    }

    /// Drops a player. Returns false if the token was unknown.
    pub fn disconnect(&mut self, player: PlayerId) -> bool {
        let removed = self.remove(player);
        if removed {
            debug!(target: "runtime::roster", player = player.0, "player disconnected");
        }
        removed
    }

    fn remove(&mut self, player: PlayerId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.player != player);
        self.connections.len() != before
    }

    pub fn slot_owner(&self, slot: u32) -> Option<PlayerId> {
        self.connections
            .iter()
            .find(|c| c.slot == slot)
            .map(|c| c.player)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.connections.iter().any(|c| c.player == player)
    }

    /// Players in connect order.
    pub fn players(&self) -> Vec<PlayerId> {
        self.connections.iter().map(|c| c.player).collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
