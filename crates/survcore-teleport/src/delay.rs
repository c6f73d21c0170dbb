//! Teleport warmup executor: a per-second countdown before the actual
//! relocation, cancelled by movement or disconnection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use survcore_common::{utils::render_template, PlayerId, Position};
use survcore_config::{ConfigCache, MessagesConfig};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::session::{Notifier, Sessions};

/// Destination lookup deferred to the moment the countdown completes, so
/// a TPA lands at the other party's location *now*, not where they stood
/// when the request was sent.
pub type DestinationResolver = Box<dyn FnOnce() -> Option<Position> + Send + 'static>;

/// Parameters for one warmup sequence.
pub struct WarmupRequest {
    pub initiator: PlayerId,
    pub resolver: DestinationResolver,
    pub delay_seconds: u64,
    pub cancel_on_move: bool,
    /// Sent to the initiator after a successful relocation.
    pub completion_message: Option<String>,
}

struct ActiveWarmup {
    id: u64,
    cancel: CancellationToken,
}

/// Executor for delayed teleports.
///
/// Each sequence runs as its own task; sequences for different initiators
/// never coordinate. At most one sequence is active per initiator: a new
/// [`DelayedTeleports::begin`] cancels and replaces the previous one.
pub struct DelayedTeleports {
    sessions: Arc<dyn Sessions>,
    notifier: Arc<dyn Notifier>,
    config: Arc<ConfigCache>,
    active: Arc<DashMap<PlayerId, ActiveWarmup>>,
    next_id: AtomicU64,
}

impl DelayedTeleports {
    pub fn new(
        sessions: Arc<dyn Sessions>,
        notifier: Arc<dyn Notifier>,
        config: Arc<ConfigCache>,
    ) -> Self {
        Self {
            sessions,
            notifier,
            config,
            active: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Start a warmup. With a zero delay the destination is resolved and
    /// the relocation performed before this call returns.
    pub fn begin(&self, request: WarmupRequest) {
        let WarmupRequest {
            initiator,
            resolver,
            delay_seconds,
            cancel_on_move,
            completion_message,
        } = request;

        if delay_seconds == 0 {
            let config = self.config.get();
            finish_teleport(
                self.sessions.as_ref(),
                self.notifier.as_ref(),
                &config.messages,
                initiator,
                resolver(),
                completion_message.as_deref(),
            );
            return;
        }

        let config = self.config.get();
        self.notifier.send(
            initiator,
            &render_template(
                &config.messages.teleporting,
                &[("delay", &delay_seconds.to_string())],
            ),
        );

        // Origin snapshot at block granularity; sub-block jitter during
        // the countdown must not cancel.
        let Some(origin) = self.sessions.position(initiator).map(|p| p.block_pos()) else {
            return;
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        if let Some(previous) = self.active.insert(
            initiator,
            ActiveWarmup {
                id,
                cancel: cancel.clone(),
            },
        ) {
            debug!(player = %initiator, "replacing active teleport warmup");
            previous.cancel.cancel();
        }

        let sessions = Arc::clone(&self.sessions);
        let notifier = Arc::clone(&self.notifier);
        let config = Arc::clone(&self.config);
        let active = Arc::clone(&self.active);

        tokio::spawn(async move {
            let mut resolver = Some(resolver);
            let mut remaining = delay_seconds;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(player = %initiator, "teleport warmup cancelled");
                        break;
                    }
                    _ = sleep(Duration::from_secs(1)) => {}
                }

                // Disconnected mid-countdown: abort without a word, there
                // is nobody left to tell.
                if !sessions.is_online(initiator) {
                    debug!(player = %initiator, "initiator left during teleport warmup");
                    break;
                }
                let Some(position) = sessions.position(initiator) else {
                    break;
                };

                if cancel_on_move && position.block_pos() != origin {
                    notifier.send(initiator, &config.get().messages.teleport_cancelled);
                    debug!(player = %initiator, "teleport warmup cancelled by movement");
                    break;
                }

                remaining -= 1;
                if remaining == 0 {
                    let destination = resolver.take().and_then(|resolve| resolve());
                    finish_teleport(
                        sessions.as_ref(),
                        notifier.as_ref(),
                        &config.get().messages,
                        initiator,
                        destination,
                        completion_message.as_deref(),
                    );
                    break;
                }

                if remaining <= 3 {
                    notifier.send(
                        initiator,
                        &render_template(
                            &config.get().messages.teleport_countdown,
                            &[("seconds", &remaining.to_string())],
                        ),
                    );
                }
            }

            active.remove_if(&initiator, |_, warmup| warmup.id == id);
        });
    }

    /// Cancel the initiator's active warmup, if any. Silent; used for
    /// disconnects and replacements.
    pub fn abort(&self, initiator: PlayerId) -> bool {
        match self.active.remove(&initiator) {
            Some((_, warmup)) => {
                warmup.cancel.cancel();
                debug!(player = %initiator, "teleport warmup aborted");
                true
            }
            None => false,
        }
    }

    /// Whether the initiator has a warmup counting down.
    pub fn is_active(&self, initiator: PlayerId) -> bool {
        self.active.contains_key(&initiator)
    }

    /// Number of warmups currently counting down.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Perform the relocation, or report the one failure the initiator can
/// act on: the destination no longer resolving to anywhere.
fn finish_teleport(
    sessions: &dyn Sessions,
    notifier: &dyn Notifier,
    messages: &MessagesConfig,
    initiator: PlayerId,
    destination: Option<Position>,
    completion_message: Option<&str>,
) {
    match destination {
        Some(destination) => {
            if sessions.teleport(initiator, &destination) {
                if let Some(message) = completion_message {
                    notifier.send(initiator, message);
                }
                debug!(player = %initiator, world = %destination.world, "teleport completed");
            } else {
                notifier.send(initiator, &messages.destination_unavailable);
            }
        }
        None => {
            notifier.send(initiator, &messages.destination_unavailable);
        }
    }
}
