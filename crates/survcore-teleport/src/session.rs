//! Collaborator traits implemented by the host runtime.
//!
//! The coordination core never touches the world or the network itself;
//! it observes players and pushes chat lines through these two seams.

use survcore_common::{PlayerId, Position};

/// Live view of connected players, supplied by the host runtime.
///
/// The host must also call [`crate::TeleportService::handle_disconnect`]
/// when a player leaves so pending requests and warmups are cleaned up.
pub trait Sessions: Send + Sync {
    /// Whether the player is currently connected.
    fn is_online(&self, player: PlayerId) -> bool;

    /// Display name for chat messages, if the player is known.
    fn name(&self, player: PlayerId) -> Option<String>;

    /// The player's current location, or `None` when not connected.
    fn position(&self, player: PlayerId) -> Option<Position>;

    /// Relocate the player. Returns `false` when the host refused the
    /// move (player gone, destination world unloaded).
    fn teleport(&self, player: PlayerId, destination: &Position) -> bool;
}

/// Outbound chat delivery. Fire-and-forget, no acknowledgement.
pub trait Notifier: Send + Sync {
    fn send(&self, player: PlayerId, message: &str);
}
