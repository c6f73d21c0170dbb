//! High-level teleport service: the command-flow glue tying cooldowns,
//! the request registry and the warmup executor together.
//!
//! Command handlers in the host adapter translate chat commands into
//! these calls; all user-facing messaging happens here so every feature
//! phrases refusals the same way.

use std::sync::Arc;
use std::time::Duration;

use survcore_common::{utils::render_template, PlayerId, TeleportDirection};
use survcore_config::{ConfigCache, Feature};
use thiserror::Error;
use tracing::debug;

use crate::cooldown::{format_duration, CooldownTracker};
use crate::delay::{DelayedTeleports, DestinationResolver, WarmupRequest};
use crate::request::{RequestRegistry, TeleportRequest};
use crate::session::{Notifier, Sessions};

/// Why a teleport action was refused. The player has already been told;
/// the variant lets the host adapter react (metrics, command result).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeleportError {
    #[error("feature is disabled")]
    FeatureDisabled,
    #[error("cannot send a teleport request to yourself")]
    SelfRequest,
    #[error("target player is offline")]
    TargetOffline,
    #[error("on cooldown for another {remaining_seconds}s")]
    OnCooldown { remaining_seconds: u64 },
    #[error("a pending outgoing request already exists")]
    DuplicatePending,
    #[error("no pending teleport request")]
    NoPendingRequest,
}

/// Shared teleport coordination service.
///
/// Construct once and hand clones of the `Arc`s to every command
/// handler; there is no global instance.
pub struct TeleportService {
    config: Arc<ConfigCache>,
    cooldowns: Arc<CooldownTracker>,
    requests: Arc<RequestRegistry>,
    warmups: Arc<DelayedTeleports>,
    sessions: Arc<dyn Sessions>,
    notifier: Arc<dyn Notifier>,
}

impl TeleportService {
    pub fn new(
        config: Arc<ConfigCache>,
        cooldowns: Arc<CooldownTracker>,
        requests: Arc<RequestRegistry>,
        warmups: Arc<DelayedTeleports>,
        sessions: Arc<dyn Sessions>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            cooldowns,
            requests,
            warmups,
            sessions,
            notifier,
        }
    }

    fn display_name(&self, player: PlayerId) -> String {
        self.sessions
            .name(player)
            .unwrap_or_else(|| player.to_string())
    }

    /// Send a TPA request from `requester` to `target`.
    pub fn send_request(
        &self,
        requester: PlayerId,
        target: PlayerId,
        direction: TeleportDirection,
    ) -> Result<(), TeleportError> {
        let config = self.config.get();
        let settings = config.features.get(Feature::Tpa);

        if !settings.enabled {
            self.notifier
                .send(requester, &config.messages.feature_disabled);
            return Err(TeleportError::FeatureDisabled);
        }
        if requester == target {
            self.notifier
                .send(requester, &config.messages.cannot_request_self);
            return Err(TeleportError::SelfRequest);
        }
        if !self.sessions.is_online(target) {
            self.notifier.send(
                requester,
                &render_template(
                    &config.messages.player_offline,
                    &[("player", &self.display_name(target))],
                ),
            );
            return Err(TeleportError::TargetOffline);
        }
        self.check_cooldown(requester, Feature::Tpa)?;

        if !self.requests.send_request(requester, target, direction) {
            self.notifier
                .send(requester, &config.messages.request_already_exists);
            return Err(TeleportError::DuplicatePending);
        }

        self.cooldowns.set_cooldown(
            requester,
            Feature::Tpa.key(),
            Duration::from_secs(settings.cooldown_seconds),
        );

        self.notifier.send(
            requester,
            &render_template(
                &config.messages.request_sent,
                &[("player", &self.display_name(target))],
            ),
        );
        let received_template = match direction {
            TeleportDirection::ToTarget => &config.messages.request_received,
            TeleportDirection::ToRequester => &config.messages.request_received_here,
        };
        self.notifier.send(
            target,
            &render_template(
                received_template,
                &[("player", &self.display_name(requester))],
            ),
        );
        Ok(())
    }

    /// Accept the target's pending request and start the warmup for the
    /// moving party. The destination is resolved when the countdown
    /// completes, at the other party's location *then*.
    pub fn accept(&self, target: PlayerId) -> Result<TeleportRequest, TeleportError> {
        let config = self.config.get();
        let settings = config.features.get(Feature::Tpa);

        if !settings.enabled {
            self.notifier.send(target, &config.messages.feature_disabled);
            return Err(TeleportError::FeatureDisabled);
        }

        let Some(request) = self.requests.accept(target) else {
            self.notifier
                .send(target, &config.messages.no_pending_requests);
            return Err(TeleportError::NoPendingRequest);
        };

        self.notifier.send(
            target,
            &render_template(
                &config.messages.request_accepted,
                &[("player", &self.display_name(request.requester))],
            ),
        );
        self.notifier.send(
            request.requester,
            &render_template(
                &config.messages.request_accepted_sender,
                &[("player", &self.display_name(target))],
            ),
        );

        let (mover, anchor) = match request.direction {
            TeleportDirection::ToTarget => (request.requester, request.target),
            TeleportDirection::ToRequester => (request.target, request.requester),
        };
        let sessions = Arc::clone(&self.sessions);
        let resolver: DestinationResolver = Box::new(move || sessions.position(anchor));

        self.warmups.begin(WarmupRequest {
            initiator: mover,
            resolver,
            delay_seconds: settings.teleport_delay_seconds,
            cancel_on_move: settings.cancel_on_move,
            completion_message: None,
        });
        Ok(request)
    }

    /// Deny the target's pending request. Works on expired requests too;
    /// denial needs no liveness.
    pub fn deny(&self, target: PlayerId) -> Result<TeleportRequest, TeleportError> {
        let config = self.config.get();

        if !config.features.get(Feature::Tpa).enabled {
            self.notifier.send(target, &config.messages.feature_disabled);
            return Err(TeleportError::FeatureDisabled);
        }

        let Some(request) = self.requests.deny(target) else {
            self.notifier
                .send(target, &config.messages.no_pending_requests);
            return Err(TeleportError::NoPendingRequest);
        };

        self.notifier.send(
            target,
            &render_template(
                &config.messages.request_denied,
                &[("player", &self.display_name(request.requester))],
            ),
        );
        self.notifier.send(
            request.requester,
            &render_template(
                &config.messages.request_denied_sender,
                &[("player", &self.display_name(target))],
            ),
        );
        Ok(request)
    }

    /// Shared path for the destination-bookmark features (RTP, homes,
    /// warps, player warps): feature gate, cooldown, then warmup.
    ///
    /// The caller supplies the destination lookup (a home registry entry,
    /// a warp, a freshly scanned random location) and the message to send
    /// on arrival.
    pub fn delayed_teleport(
        &self,
        player: PlayerId,
        feature: Feature,
        resolver: DestinationResolver,
        completion_message: Option<String>,
    ) -> Result<(), TeleportError> {
        let config = self.config.get();
        let settings = config.features.get(feature);

        if !settings.enabled {
            self.notifier.send(player, &config.messages.feature_disabled);
            return Err(TeleportError::FeatureDisabled);
        }
        self.check_cooldown(player, feature)?;

        self.cooldowns.set_cooldown(
            player,
            feature.key(),
            Duration::from_secs(settings.cooldown_seconds),
        );

        self.warmups.begin(WarmupRequest {
            initiator: player,
            resolver,
            delay_seconds: settings.teleport_delay_seconds,
            cancel_on_move: settings.cancel_on_move,
            completion_message,
        });
        Ok(())
    }

    /// Disconnect contract with the session provider: drop the player's
    /// pending requests and abort their warmup. Cooldowns stay; they are
    /// time-based and survive relogs.
    pub fn handle_disconnect(&self, player: PlayerId) {
        self.requests.remove_all_for(player);
        self.warmups.abort(player);
        debug!(%player, "cleaned up teleport state on disconnect");
    }

    fn check_cooldown(&self, player: PlayerId, feature: Feature) -> Result<(), TeleportError> {
        if !self.cooldowns.has_cooldown(player, feature.key()) {
            return Ok(());
        }
        let remaining_seconds = self.cooldowns.remaining_seconds(player, feature.key());
        let config = self.config.get();
        self.notifier.send(
            player,
            &render_template(
                &config.messages.cooldown,
                &[("time", &format_duration(remaining_seconds))],
            ),
        );
        Err(TeleportError::OnCooldown { remaining_seconds })
    }
}
