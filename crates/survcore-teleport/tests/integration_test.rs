//! End-to-end flows through the teleport service: request, accept/deny,
//! warmup, cooldown and disconnect handling working together.

use std::sync::Arc;
use std::time::Duration;

use survcore_common::{Position, TeleportDirection};
use survcore_config::{Config, ConfigCache, Feature};
use survcore_teleport::test_utils::{FakeSessions, RecordingNotifier};
use survcore_teleport::{
    CooldownTracker, DelayedTeleports, RequestRegistry, TeleportError, TeleportService,
};
use tokio::time::advance;

struct Harness {
    sessions: Arc<FakeSessions>,
    notifier: Arc<RecordingNotifier>,
    cooldowns: Arc<CooldownTracker>,
    service: TeleportService,
}

fn harness(config: Config) -> Harness {
    let sessions = Arc::new(FakeSessions::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let config = Arc::new(ConfigCache::new(config));
    let cooldowns = Arc::new(CooldownTracker::new());
    let requests = Arc::new(RequestRegistry::new(
        Duration::from_secs(config.get().requests.timeout_seconds),
        sessions.clone(),
    ));
    let warmups = Arc::new(DelayedTeleports::new(
        sessions.clone(),
        notifier.clone(),
        config.clone(),
    ));
    let service = TeleportService::new(
        config,
        cooldowns.clone(),
        requests,
        warmups,
        sessions.clone(),
        notifier.clone(),
    );
    Harness {
        sessions,
        notifier,
        cooldowns,
        service,
    }
}

/// Let warmup tasks observe one countdown tick.
async fn tick() {
    advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn tpa_flow_moves_the_requester_to_the_targets_current_position() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();
    assert!(h.notifier.contains(alice, "Teleport request sent to Bob!"));
    assert!(h
        .notifier
        .contains(bob, "Alice wants to teleport to you. /tpaccept or /tpdeny"));

    h.service.accept(bob).unwrap();
    assert!(h.notifier.contains(bob, "You accepted Alice's teleport request!"));
    assert!(h.notifier.contains(alice, "Bob accepted your teleport request!"));
    tokio::task::yield_now().await;

    // Bob wanders off during Alice's warmup; the destination is resolved
    // at completion, so Alice lands where Bob is then.
    h.sessions
        .set_position(bob, Position::new("world", 500.0, 70.0, -40.0));

    for _ in 0..3 {
        tick().await;
    }

    let teleports = h.sessions.teleports();
    assert_eq!(teleports.len(), 1);
    assert_eq!(teleports[0].0, alice);
    assert_eq!(teleports[0].1, Position::new("world", 500.0, 70.0, -40.0));
}

#[tokio::test(start_paused = true)]
async fn tpahere_moves_the_target_and_watches_the_target_for_movement() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToRequester)
        .unwrap();
    assert!(h
        .notifier
        .contains(bob, "Alice wants you to teleport to them. /tpaccept or /tpdeny"));

    h.service.accept(bob).unwrap();
    tokio::task::yield_now().await;

    tick().await;
    // Bob is the mover now; his movement cancels the warmup.
    h.sessions
        .set_position(bob, Position::new("world", 101.0, 64.0, 100.0));
    tick().await;

    assert!(h.sessions.teleports().is_empty());
    assert!(h
        .notifier
        .contains(bob, "Teleportation cancelled because you moved!"));
}

#[tokio::test(start_paused = true)]
async fn deny_notifies_both_parties_and_clears_the_request() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();
    h.service.deny(bob).unwrap();

    assert!(h.notifier.contains(bob, "You denied Alice's teleport request!"));
    assert!(h.notifier.contains(alice, "Bob denied your teleport request!"));
    assert_eq!(
        h.service.deny(bob).unwrap_err(),
        TeleportError::NoPendingRequest
    );
    assert!(h.notifier.contains(bob, "You have no pending teleport requests!"));
}

#[tokio::test(start_paused = true)]
async fn tpa_cooldown_blocks_resends_until_it_elapses() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();
    h.service.deny(bob).unwrap();

    // Default TPA cooldown is 10s.
    let err = h
        .service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap_err();
    assert!(matches!(err, TeleportError::OnCooldown { .. }));
    assert!(h.notifier.contains(alice, "You must wait"));

    advance(Duration::from_secs(11)).await;
    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn self_requests_and_offline_targets_are_refused() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    assert_eq!(
        h.service
            .send_request(alice, alice, TeleportDirection::ToTarget)
            .unwrap_err(),
        TeleportError::SelfRequest
    );

    h.sessions.disconnect(bob);
    assert_eq!(
        h.service
            .send_request(alice, bob, TeleportDirection::ToTarget)
            .unwrap_err(),
        TeleportError::TargetOffline
    );
    assert!(h.notifier.contains(alice, "Bob"));
}

#[tokio::test(start_paused = true)]
async fn disabled_feature_refuses_every_entry_point() {
    let mut config = Config::default();
    config.features.tpa.enabled = false;
    let h = harness(config);
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    for result in [
        h.service
            .send_request(alice, bob, TeleportDirection::ToTarget)
            .unwrap_err(),
        h.service.accept(bob).unwrap_err(),
        h.service.deny(bob).unwrap_err(),
    ] {
        assert_eq!(result, TeleportError::FeatureDisabled);
    }
    assert!(h.notifier.contains(alice, "This feature is currently disabled!"));
}

#[tokio::test(start_paused = true)]
async fn request_expiry_makes_accept_report_nothing_pending() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();

    // Default request timeout is 60s.
    advance(Duration::from_secs(61)).await;

    assert_eq!(
        h.service.accept(bob).unwrap_err(),
        TeleportError::NoPendingRequest
    );
    assert!(h.sessions.teleports().is_empty());
}

#[tokio::test(start_paused = true)]
async fn disconnect_clears_requests_and_aborts_warmups() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let bob = h
        .sessions
        .join("Bob", Position::new("world", 100.0, 64.0, 100.0));

    h.service
        .send_request(alice, bob, TeleportDirection::ToTarget)
        .unwrap();
    h.service.accept(bob).unwrap();
    tokio::task::yield_now().await;

    h.sessions.disconnect(alice);
    h.service.handle_disconnect(alice);

    for _ in 0..4 {
        tick().await;
    }
    assert!(h.sessions.teleports().is_empty());

    // Bob's side is clean: nothing pending to accept.
    assert_eq!(
        h.service.accept(bob).unwrap_err(),
        TeleportError::NoPendingRequest
    );
}

#[tokio::test(start_paused = true)]
async fn rtp_style_delayed_teleport_applies_cooldown_and_completion_message() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let destination = Position::new("world", 4242.0, 71.0, -1337.0);

    let dest = destination.clone();
    h.service
        .delayed_teleport(
            alice,
            Feature::Rtp,
            Box::new(move || Some(dest)),
            Some("Teleported to a random location!".to_string()),
        )
        .unwrap();
    tokio::task::yield_now().await;

    for _ in 0..3 {
        tick().await;
    }

    assert_eq!(h.sessions.teleports(), vec![(alice, destination)]);
    assert!(h.notifier.contains(alice, "Teleported to a random location!"));

    // RTP's long cooldown (300s by default) now applies.
    assert!(h.cooldowns.has_cooldown(alice, Feature::Rtp.key()));
    let err = h
        .service
        .delayed_teleport(alice, Feature::Rtp, Box::new(|| None), None)
        .unwrap_err();
    assert!(matches!(err, TeleportError::OnCooldown { .. }));
    // Long cooldowns are phrased in minutes.
    assert!(h.notifier.contains(alice, "4m"));
}

#[tokio::test(start_paused = true)]
async fn home_teleport_with_zero_delay_is_instant() {
    let mut config = Config::default();
    config.features.home.teleport_delay_seconds = 0;
    let h = harness(config);
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));
    let home = Position::new("world", -12.0, 68.0, 7.5);

    let dest = home.clone();
    h.service
        .delayed_teleport(
            alice,
            Feature::Home,
            Box::new(move || Some(dest)),
            Some("Teleported to home 'base'!".to_string()),
        )
        .unwrap();

    // No task, no countdown: the move already happened.
    assert_eq!(h.sessions.teleports(), vec![(alice, home)]);
    assert!(h.notifier.contains(alice, "Teleported to home 'base'!"));
    assert!(!h.notifier.contains(alice, "Teleporting in"));
}

#[tokio::test(start_paused = true)]
async fn deleted_home_reports_failure_at_completion_time() {
    let h = harness(Config::default());
    let alice = h
        .sessions
        .join("Alice", Position::new("world", 0.0, 64.0, 0.0));

    h.service
        .delayed_teleport(alice, Feature::Home, Box::new(|| None), None)
        .unwrap();
    tokio::task::yield_now().await;

    for _ in 0..3 {
        tick().await;
    }

    assert!(h.sessions.teleports().is_empty());
    assert!(h
        .notifier
        .contains(alice, "The teleport destination is no longer available!"));
}
