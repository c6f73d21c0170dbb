//! Teleport request (TPA) registry: at most one pending directed request
//! per (requester, target) pair, with expiry and accept/deny resolution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use survcore_common::{PlayerId, TeleportDirection, Timestamp};
use tokio::time::Instant;
use tracing::debug;

use crate::session::Sessions;

/// A pending teleport request between two players.
///
/// Requests are values: once returned from [`RequestRegistry::accept`] or
/// [`RequestRegistry::deny`] the registry no longer knows about them.
#[derive(Debug, Clone)]
pub struct TeleportRequest {
    pub requester: PlayerId,
    pub target: PlayerId,
    pub direction: TeleportDirection,
    /// Wall-clock creation time, for display and logging only.
    pub created_at: Timestamp,
    expires_at: Instant,
}

impl TeleportRequest {
    fn new(
        requester: PlayerId,
        target: PlayerId,
        direction: TeleportDirection,
        timeout: Duration,
    ) -> Self {
        Self {
            requester,
            target,
            direction,
            created_at: Utc::now(),
            expires_at: Instant::now() + timeout,
        }
    }

    /// Whether the request has outlived its timeout.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Seconds until expiry, truncated; 0 once expired.
    pub fn remaining_seconds(&self) -> u64 {
        self.expires_at
            .saturating_duration_since(Instant::now())
            .as_secs()
    }
}

/// Both directions of the request index. Kept behind one lock so a send
/// or resolution mutates the two slots as a unit.
#[derive(Default)]
struct RequestIndexes {
    /// Pending request a target has received, keyed by target.
    incoming: HashMap<PlayerId, TeleportRequest>,
    /// Pending request a requester has sent, keyed by requester.
    outgoing: HashMap<PlayerId, TeleportRequest>,
}

impl RequestIndexes {
    /// Remove the entries for one ordered (requester, target) pair,
    /// leaving entries that belong to other pairs untouched.
    fn remove_pair(&mut self, requester: PlayerId, target: PlayerId) {
        if self
            .outgoing
            .get(&requester)
            .is_some_and(|r| r.target == target)
        {
            self.outgoing.remove(&requester);
        }
        if self
            .incoming
            .get(&target)
            .is_some_and(|r| r.requester == requester)
        {
            self.incoming.remove(&target);
        }
    }
}

/// Registry owning all pending teleport requests.
///
/// Terminal states (accepted, denied, expired, invalidated) are not
/// stored; resolving a request deletes it, returning the pair to the
/// absent state.
pub struct RequestRegistry {
    timeout: Duration,
    sessions: Arc<dyn Sessions>,
    inner: Mutex<RequestIndexes>,
}

impl RequestRegistry {
    /// Create a registry. `timeout` is how long a request stays
    /// acceptable after being sent.
    pub fn new(timeout: Duration, sessions: Arc<dyn Sessions>) -> Self {
        Self {
            timeout,
            sessions,
            inner: Mutex::new(RequestIndexes::default()),
        }
    }

    /// A request can only be resolved while both parties are connected.
    fn is_eligible(&self, request: &TeleportRequest) -> bool {
        !request.is_expired()
            && self.sessions.is_online(request.requester)
            && self.sessions.is_online(request.target)
    }

    /// Send a request. Returns `false` without any state change when the
    /// requester already has a live outgoing request, or the target
    /// already has a live incoming request from this requester.
    pub fn send_request(
        &self,
        requester: PlayerId,
        target: PlayerId,
        direction: TeleportDirection,
    ) -> bool {
        let mut idx = self.inner.lock();

        // A dead outgoing request must not block fresh sends.
        if let Some(existing) = idx.outgoing.get(&requester).cloned() {
            if self.is_eligible(&existing) {
                return false;
            }
            idx.remove_pair(existing.requester, existing.target);
        }

        if let Some(existing) = idx.incoming.get(&target) {
            if existing.requester == requester && !existing.is_expired() {
                return false;
            }
        }

        idx.remove_pair(requester, target);

        let request = TeleportRequest::new(requester, target, direction, self.timeout);
        idx.outgoing.insert(requester, request.clone());
        idx.incoming.insert(target, request);

        debug!(%requester, %target, ?direction, "teleport request sent");
        true
    }

    /// Resolve the target's pending incoming request for execution.
    ///
    /// An expired request, or one whose parties are no longer both
    /// connected, is dropped and `None` returned; the caller cannot tell
    /// the difference from having no request at all.
    pub fn accept(&self, target: PlayerId) -> Option<TeleportRequest> {
        let mut idx = self.inner.lock();

        let request = idx.incoming.get(&target)?.clone();
        idx.remove_pair(request.requester, request.target);

        if !self.is_eligible(&request) {
            debug!(requester = %request.requester, %target, "dropped stale teleport request on accept");
            return None;
        }

        debug!(requester = %request.requester, %target, "teleport request accepted");
        Some(request)
    }

    /// Remove and return the target's pending incoming request without
    /// any liveness or expiry check.
    pub fn deny(&self, target: PlayerId) -> Option<TeleportRequest> {
        let mut idx = self.inner.lock();

        let request = idx.incoming.get(&target)?.clone();
        idx.remove_pair(request.requester, request.target);

        debug!(requester = %request.requester, %target, "teleport request denied");
        Some(request)
    }

    /// The target's pending incoming request, purging it when stale.
    pub fn incoming_request(&self, player: PlayerId) -> Option<TeleportRequest> {
        let mut idx = self.inner.lock();
        let request = idx.incoming.get(&player)?.clone();
        if !self.is_eligible(&request) {
            idx.remove_pair(request.requester, request.target);
            return None;
        }
        Some(request)
    }

    /// The player's pending outgoing request, purging it when stale.
    pub fn outgoing_request(&self, player: PlayerId) -> Option<TeleportRequest> {
        let mut idx = self.inner.lock();
        let request = idx.outgoing.get(&player)?.clone();
        if !self.is_eligible(&request) {
            idx.remove_pair(request.requester, request.target);
            return None;
        }
        Some(request)
    }

    pub fn has_incoming(&self, player: PlayerId) -> bool {
        self.incoming_request(player).is_some()
    }

    pub fn has_outgoing(&self, player: PlayerId) -> bool {
        self.outgoing_request(player).is_some()
    }

    /// Disconnect cleanup: drop the player's outgoing request and any
    /// incoming request they hold, including the mirror entries on the
    /// other side of each pair.
    pub fn remove_all_for(&self, player: PlayerId) {
        let mut idx = self.inner.lock();

        if let Some(outgoing) = idx.outgoing.get(&player).cloned() {
            idx.remove_pair(player, outgoing.target);
        }
        if let Some(incoming) = idx.incoming.get(&player).cloned() {
            idx.remove_pair(incoming.requester, player);
        }
        debug!(%player, "removed all teleport requests");
    }

    /// Drop expired entries from both indices. Entries left dangling on
    /// one side (a superseded incoming slot) expire here too.
    pub fn sweep(&self) {
        let mut idx = self.inner.lock();
        let before = idx.incoming.len() + idx.outgoing.len();
        idx.incoming.retain(|_, request| !request.is_expired());
        idx.outgoing.retain(|_, request| !request.is_expired());
        let removed = before - (idx.incoming.len() + idx.outgoing.len());
        if removed > 0 {
            debug!(removed, "swept expired teleport requests");
        }
    }

    /// Total stored index entries across both directions, for
    /// diagnostics.
    pub fn pending_count(&self) -> usize {
        let idx = self.inner.lock();
        idx.incoming.len() + idx.outgoing.len()
    }
}
