//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};

/// The teleport-style features the plugin coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Rtp,
    Tpa,
    Home,
    Warp,
    PlayerWarp,
}

impl Feature {
    /// All features, in config order.
    pub const ALL: [Feature; 5] = [
        Feature::Rtp,
        Feature::Tpa,
        Feature::Home,
        Feature::Warp,
        Feature::PlayerWarp,
    ];

    /// Stable key used for cooldown tracking and log output.
    pub fn key(&self) -> &'static str {
        match self {
            Feature::Rtp => "rtp",
            Feature::Tpa => "tpa",
            Feature::Home => "home",
            Feature::Warp => "warp",
            Feature::PlayerWarp => "player_warp",
        }
    }
}

/// Main configuration structure for the plugin core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-feature teleport settings.
    pub features: FeaturesConfig,
    /// Teleport request (TPA) settings.
    pub requests: RequestsConfig,
    /// Background maintenance settings.
    pub maintenance: MaintenanceConfig,
    /// User-facing message templates.
    pub messages: MessagesConfig,
}

/// Settings shared by every teleport-style feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Whether the feature is available at all.
    pub enabled: bool,
    /// Cooldown applied after a successful use, in seconds.
    pub cooldown_seconds: u64,
    /// Warmup countdown before the teleport fires, in seconds. Zero
    /// teleports instantly.
    pub teleport_delay_seconds: u64,
    /// Whether moving to a different block cancels the warmup.
    pub cancel_on_move: bool,
}

/// Per-feature settings container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub rtp: FeatureConfig,
    pub tpa: FeatureConfig,
    pub home: FeatureConfig,
    pub warp: FeatureConfig,
    pub player_warp: FeatureConfig,
}

impl FeaturesConfig {
    /// Settings for a given feature.
    pub fn get(&self, feature: Feature) -> &FeatureConfig {
        match feature {
            Feature::Rtp => &self.rtp,
            Feature::Tpa => &self.tpa,
            Feature::Home => &self.home,
            Feature::Warp => &self.warp,
            Feature::PlayerWarp => &self.player_warp,
        }
    }
}

/// Teleport request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestsConfig {
    /// How long a pending request stays acceptable, in seconds.
    pub timeout_seconds: u64,
}

/// Background maintenance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Interval between expired-entry sweeps, in seconds.
    pub sweep_interval_seconds: u64,
}

/// User-facing message templates. `{name}` placeholders are substituted
/// at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub feature_disabled: String,
    pub cooldown: String,
    pub player_offline: String,
    pub cannot_request_self: String,
    pub request_sent: String,
    pub request_received: String,
    pub request_received_here: String,
    pub request_already_exists: String,
    pub request_accepted: String,
    pub request_accepted_sender: String,
    pub request_denied: String,
    pub request_denied_sender: String,
    pub no_pending_requests: String,
    pub teleporting: String,
    pub teleport_countdown: String,
    pub teleport_cancelled: String,
    pub destination_unavailable: String,
}

impl MessagesConfig {
    /// Iterate all templates with their config key, for validation.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("messages.feature_disabled", self.feature_disabled.as_str()),
            ("messages.cooldown", self.cooldown.as_str()),
            ("messages.player_offline", self.player_offline.as_str()),
            (
                "messages.cannot_request_self",
                self.cannot_request_self.as_str(),
            ),
            ("messages.request_sent", self.request_sent.as_str()),
            ("messages.request_received", self.request_received.as_str()),
            (
                "messages.request_received_here",
                self.request_received_here.as_str(),
            ),
            (
                "messages.request_already_exists",
                self.request_already_exists.as_str(),
            ),
            ("messages.request_accepted", self.request_accepted.as_str()),
            (
                "messages.request_accepted_sender",
                self.request_accepted_sender.as_str(),
            ),
            ("messages.request_denied", self.request_denied.as_str()),
            (
                "messages.request_denied_sender",
                self.request_denied_sender.as_str(),
            ),
            (
                "messages.no_pending_requests",
                self.no_pending_requests.as_str(),
            ),
            ("messages.teleporting", self.teleporting.as_str()),
            (
                "messages.teleport_countdown",
                self.teleport_countdown.as_str(),
            ),
            (
                "messages.teleport_cancelled",
                self.teleport_cancelled.as_str(),
            ),
            (
                "messages.destination_unavailable",
                self.destination_unavailable.as_str(),
            ),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_keys_are_unique() {
        let mut keys: Vec<_> = Feature::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Feature::ALL.len());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: Config = serde_yaml::from_str("requests:\n  timeout_seconds: 120\n").unwrap();
        assert_eq!(config.requests.timeout_seconds, 120);
        assert_eq!(config.features.rtp.cooldown_seconds, 300);
        assert!(config.features.tpa.enabled);
    }
}
