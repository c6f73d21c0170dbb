//! Cooldown system for rate limiting feature usage

use dashmap::DashMap;
use std::time::Duration;
use survcore_common::PlayerId;
use tokio::time::Instant;
use tracing::debug;

/// Cooldown key: one timer per (player, feature) pair.
///
/// Feature keys are free-form strings ("rtp", "home", "kit_starter") so
/// callers can track per-kit and per-command timers without registering
/// them anywhere.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CooldownKey {
    player: PlayerId,
    feature: String,
}

/// Tracker for transient per-player, per-feature rate limits.
///
/// Entries whose expiry has passed are logically absent: reads purge them
/// on the way out, and [`CooldownTracker::sweep`] clears the remainder
/// periodically. Uses `tokio::time::Instant` so tests run on the paused
/// clock.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    cooldowns: DashMap<CooldownKey, Instant>,
}

impl CooldownTracker {
    /// Create a new cooldown tracker
    pub fn new() -> Self {
        Self {
            cooldowns: DashMap::new(),
        }
    }

    /// Start (or restart) a cooldown for a player and feature
    pub fn set_cooldown(&self, player: PlayerId, feature: &str, duration: Duration) {
        let key = CooldownKey {
            player,
            feature: feature.to_string(),
        };
        self.cooldowns.insert(key, Instant::now() + duration);
        debug!(%player, feature, ?duration, "cooldown set");
    }

    /// Whether the player currently has a live cooldown for the feature.
    ///
    /// An entry whose expiry has already passed is removed before
    /// returning `false`.
    pub fn has_cooldown(&self, player: PlayerId, feature: &str) -> bool {
        let key = CooldownKey {
            player,
            feature: feature.to_string(),
        };
        let now = Instant::now();

        if let Some(expiry) = self.cooldowns.get(&key).map(|entry| *entry.value()) {
            if expiry > now {
                return true;
            }
            self.cooldowns.remove_if(&key, |_, expiry| *expiry <= now);
        }

        false
    }

    /// Remaining cooldown in whole seconds, truncated; 0 when none
    pub fn remaining_seconds(&self, player: PlayerId, feature: &str) -> u64 {
        let key = CooldownKey {
            player,
            feature: feature.to_string(),
        };
        match self.cooldowns.get(&key) {
            Some(entry) => entry.saturating_duration_since(Instant::now()).as_secs(),
            None => 0,
        }
    }

    /// Remove one cooldown; idempotent
    pub fn remove_cooldown(&self, player: PlayerId, feature: &str) {
        let key = CooldownKey {
            player,
            feature: feature.to_string(),
        };
        self.cooldowns.remove(&key);
    }

    /// Remove every cooldown a player holds; idempotent
    pub fn clear_player(&self, player: PlayerId) {
        self.cooldowns.retain(|key, _| key.player != player);
        debug!(%player, "cleared all cooldowns");
    }

    /// Number of stored entries, live or not yet purged
    pub fn active_count(&self) -> usize {
        self.cooldowns.len()
    }

    /// Drop every expired entry. Reads self-purge, so this is purely a
    /// memory optimization run from the maintenance sweeper.
    pub fn sweep(&self) {
        let now = Instant::now();
        let before = self.cooldowns.len();
        self.cooldowns.retain(|_, expiry| *expiry > now);
        let removed = before - self.cooldowns.len();
        if removed > 0 {
            debug!(removed, "swept expired cooldowns");
        }
    }
}

/// Render a duration in seconds as a compact `H M S` string.
///
/// Zero-valued higher units are omitted; the seconds term is suppressed
/// only when it is zero and a higher unit is present. Zero renders as
/// "0s".
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m "));
    }
    if secs > 0 || out.is_empty() {
        out.push_str(&format!("{secs}s"));
    }

    out.trim_end().to_string()
}
