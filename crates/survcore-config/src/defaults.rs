//! Default configuration values, matching the shipped config files.

use crate::schema::*;

impl Default for Config {
    fn default() -> Self {
        Self {
            features: FeaturesConfig::default(),
            requests: RequestsConfig::default(),
            maintenance: MaintenanceConfig::default(),
            messages: MessagesConfig::default(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 10,
            teleport_delay_seconds: 3,
            cancel_on_move: true,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            // Random teleports cover a lot of ground, so they carry a much
            // longer cooldown than the point-to-point features.
            rtp: FeatureConfig {
                cooldown_seconds: 300,
                ..FeatureConfig::default()
            },
            tpa: FeatureConfig::default(),
            home: FeatureConfig::default(),
            warp: FeatureConfig::default(),
            player_warp: FeatureConfig::default(),
        }
    }
}

impl Default for RequestsConfig {
    fn default() -> Self {
        Self { timeout_seconds: 60 }
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: 60,
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            feature_disabled: "This feature is currently disabled!".to_string(),
            cooldown: "You must wait {time} before using this command again!".to_string(),
            player_offline: "Player '{player}' not found or is offline!".to_string(),
            cannot_request_self: "You cannot send a teleport request to yourself!".to_string(),
            request_sent: "Teleport request sent to {player}!".to_string(),
            request_received: "{player} wants to teleport to you. /tpaccept or /tpdeny".to_string(),
            request_received_here: "{player} wants you to teleport to them. /tpaccept or /tpdeny"
                .to_string(),
            request_already_exists: "You already have a pending request to this player!"
                .to_string(),
            request_accepted: "You accepted {player}'s teleport request!".to_string(),
            request_accepted_sender: "{player} accepted your teleport request!".to_string(),
            request_denied: "You denied {player}'s teleport request!".to_string(),
            request_denied_sender: "{player} denied your teleport request!".to_string(),
            no_pending_requests: "You have no pending teleport requests!".to_string(),
            teleporting: "Teleporting in {delay} seconds... Don't move!".to_string(),
            teleport_countdown: "{seconds}...".to_string(),
            teleport_cancelled: "Teleportation cancelled because you moved!".to_string(),
            destination_unavailable: "The teleport destination is no longer available!"
                .to_string(),
        }
    }
}
