//! Test doubles for the host-runtime collaborators.
//!
//! Shared by unit and integration tests across the workspace; kept out of
//! `#[cfg(test)]` so the `tests/` directories can use them too.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};
use survcore_common::{PlayerId, Position};

use crate::session::{Notifier, Sessions};

struct FakePlayer {
    name: String,
    online: bool,
    position: Position,
}

/// In-memory stand-in for the host's player directory.
#[derive(Default)]
pub struct FakeSessions {
    players: RwLock<HashMap<PlayerId, FakePlayer>>,
    teleports: Mutex<Vec<(PlayerId, Position)>>,
}

impl FakeSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a new player and return their generated id.
    pub fn join(&self, name: &str, position: Position) -> PlayerId {
        let id = PlayerId::new_v4();
        self.join_as(id, name, position);
        id
    }

    /// Connect (or reconnect) a player under a known id.
    pub fn join_as(&self, id: PlayerId, name: &str, position: Position) {
        self.players.write().insert(
            id,
            FakePlayer {
                name: name.to_string(),
                online: true,
                position,
            },
        );
    }

    /// Mark a player offline, keeping their last position.
    pub fn disconnect(&self, player: PlayerId) {
        if let Some(p) = self.players.write().get_mut(&player) {
            p.online = false;
        }
    }

    /// Move a player (as if they walked there).
    pub fn set_position(&self, player: PlayerId, position: Position) {
        if let Some(p) = self.players.write().get_mut(&player) {
            p.position = position;
        }
    }

    /// Every relocation performed through [`Sessions::teleport`], in
    /// order.
    pub fn teleports(&self) -> Vec<(PlayerId, Position)> {
        self.teleports.lock().clone()
    }
}

impl Sessions for FakeSessions {
    fn is_online(&self, player: PlayerId) -> bool {
        self.players
            .read()
            .get(&player)
            .is_some_and(|p| p.online)
    }

    fn name(&self, player: PlayerId) -> Option<String> {
        self.players.read().get(&player).map(|p| p.name.clone())
    }

    fn position(&self, player: PlayerId) -> Option<Position> {
        let players = self.players.read();
        let p = players.get(&player)?;
        p.online.then(|| p.position.clone())
    }

    fn teleport(&self, player: PlayerId, destination: &Position) -> bool {
        let mut players = self.players.write();
        let Some(p) = players.get_mut(&player) else {
            return false;
        };
        if !p.online {
            return false;
        }
        p.position = destination.clone();
        drop(players);
        self.teleports.lock().push((player, destination.clone()));
        true
    }
}

/// Notifier that records every line it is asked to deliver.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(PlayerId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent to one player, in order.
    pub fn messages_for(&self, player: PlayerId) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|(recipient, _)| *recipient == player)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Whether any message to the player contains the given fragment.
    pub fn contains(&self, player: PlayerId, fragment: &str) -> bool {
        self.messages_for(player)
            .iter()
            .any(|message| message.contains(fragment))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, player: PlayerId, message: &str) {
        self.messages.lock().push((player, message.to_string()));
    }
}
