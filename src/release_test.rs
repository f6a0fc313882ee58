#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn idle_pointer_at(x: f64, y: f64) -> PointerTracker {
    let mut pointer = PointerTracker::new(0.0);
    pointer.on_move(Point::new(x, y), 0.0);
    pointer
}

// --- ease_out_cubic ---

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn ease_out_cubic_midpoint() {
    assert!(approx_eq(ease_out_cubic(0.5), 0.875));
}

#[test]
fn ease_out_cubic_clamps_input() {
    assert_eq!(ease_out_cubic(-3.0), 0.0);
    assert_eq!(ease_out_cubic(7.0), 1.0);
}

// --- Defaults ---

#[test]
fn starts_active_with_full_influence() {
    let mut release = ReleaseController::new();
    assert_eq!(release.mode(), ReleaseMode::Active);
    assert_eq!(release.influence(123.0), 1.0);
    assert_eq!(release.damping(), DAMPING);
}

// --- Decay law ---

#[test]
fn fade_is_half_way_eased_at_2500ms() {
    let mut release = ReleaseController::new();
    assert!(release.trigger(10_000.0, false));
    assert!(approx_eq(release.fade_progress(12_500.0), 0.875));
    assert!(approx_eq(release.influence(12_500.0), 0.125));
    assert_eq!(release.mode(), ReleaseMode::Releasing);
    assert_eq!(release.damping(), RELEASE_DAMPING);
}

#[test]
fn influence_decreases_monotonically_during_release() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    let mut previous = release.influence(0.0);
    assert_eq!(previous, 1.0);
    for step in 1..50 {
        let now = f64::from(step) * 100.0;
        let current = release.influence(now);
        assert!(current <= previous, "influence rose at {now}ms");
        previous = current;
    }
}

#[test]
fn release_completes_into_suppressed_at_5000ms() {
    let mut release = ReleaseController::new();
    release.trigger(1_000.0, false);
    assert_eq!(release.influence(6_000.0), 0.0);
    assert_eq!(release.mode(), ReleaseMode::Suppressed);
    assert_eq!(release.fade_progress(6_000.0), 1.0);
    // Stays off afterwards.
    assert_eq!(release.influence(60_000.0), 0.0);
    assert_eq!(release.damping(), DAMPING);
}

#[test]
fn just_before_deadline_still_releasing() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    let influence = release.influence(4_999.0);
    assert!(influence > 0.0);
    assert_eq!(release.mode(), ReleaseMode::Releasing);
}

// --- Triggers ---

#[test]
fn unforced_trigger_ignored_while_releasing() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    assert!(!release.trigger(1_000.0, false));
    assert_eq!(release.release_start_ms(), 0.0);
}

#[test]
fn forced_trigger_restarts_release() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    assert!(release.trigger(3_000.0, true));
    assert_eq!(release.release_start_ms(), 3_000.0);
    assert_eq!(release.influence(3_000.0), 1.0);
}

#[test]
fn forced_trigger_from_active_releases_immediately() {
    let mut release = ReleaseController::new();
    assert!(release.trigger(42.0, true));
    assert_eq!(release.mode(), ReleaseMode::Releasing);
}

#[test]
fn unforced_trigger_ignored_while_suppressed() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    release.influence(5_000.0);
    assert!(!release.trigger(6_000.0, false));
    assert_eq!(release.mode(), ReleaseMode::Suppressed);
}

#[test]
fn forced_trigger_while_suppressed_releases_without_attraction() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    release.influence(5_000.0);

    assert!(release.trigger(6_000.0, true));
    assert_eq!(release.mode(), ReleaseMode::Releasing);
    assert_eq!(release.release_start_ms(), 6_000.0);
    assert_eq!(release.damping(), RELEASE_DAMPING);
    assert_eq!(release.influence(6_000.0), 0.0);
    assert_eq!(release.influence(8_500.0), 0.0);

    assert_eq!(release.influence(11_000.0), 0.0);
    assert_eq!(release.mode(), ReleaseMode::Suppressed);
    assert_eq!(release.damping(), DAMPING);
}

#[test]
fn pointer_move_during_suppressed_release_restores_attraction() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, true);
    release.influence(5_000.0);
    release.trigger(6_000.0, true);
    release.on_pointer_move();
    assert_eq!(release.mode(), ReleaseMode::Active);
    assert_eq!(release.influence(6_100.0), 1.0);
    release.trigger(7_000.0, true);
    assert_eq!(release.influence(7_000.0), 1.0);
}

// --- Resume ---

#[test]
fn pointer_move_aborts_release() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, true);
    release.on_pointer_move();
    assert_eq!(release.mode(), ReleaseMode::Active);
    assert_eq!(release.influence(2_500.0), 1.0);
}

#[test]
fn pointer_move_clears_suppression() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, false);
    release.influence(10_000.0);
    assert_eq!(release.mode(), ReleaseMode::Suppressed);
    release.on_pointer_move();
    assert_eq!(release.mode(), ReleaseMode::Active);
    assert_eq!(release.influence(10_001.0), 1.0);
}

// --- Idle check ---

#[test]
fn idle_check_triggers_on_dense_cluster() {
    let mut release = ReleaseController::new();
    let pointer = idle_pointer_at(50.0, 60.0);
    let origin = release.check_idle(20_000.0, &pointer, 20, |_| 19);
    assert_eq!(origin, Some(Point::new(50.0, 60.0)));
    assert_eq!(release.mode(), ReleaseMode::Releasing);
    assert_eq!(release.release_start_ms(), 20_000.0);
}

#[test]
fn idle_check_needs_more_than_threshold() {
    let mut release = ReleaseController::new();
    let pointer = idle_pointer_at(0.0, 0.0);
    assert!(release.check_idle(30_000.0, &pointer, 40, |_| 18).is_none());
    assert_eq!(release.mode(), ReleaseMode::Active);
}

#[test]
fn idle_check_only_samples_every_twenty_frames() {
    let mut release = ReleaseController::new();
    let pointer = idle_pointer_at(0.0, 0.0);
    let mut sampled = false;
    assert!(release.check_idle(30_000.0, &pointer, 21, |_| {
        sampled = true;
        100
    })
    .is_none());
    assert!(!sampled);
}

#[test]
fn idle_check_waits_for_idle_window() {
    let mut release = ReleaseController::new();
    let pointer = idle_pointer_at(0.0, 0.0);
    assert!(release.check_idle(19_999.0, &pointer, 20, |_| 100).is_none());
}

#[test]
fn idle_check_requires_known_pointer() {
    let mut release = ReleaseController::new();
    let pointer = PointerTracker::new(0.0);
    assert!(release.check_idle(60_000.0, &pointer, 20, |_| 100).is_none());
}

#[test]
fn idle_check_skipped_while_suppressed() {
    let mut release = ReleaseController::new();
    release.trigger(0.0, true);
    release.influence(5_000.0);
    let pointer = idle_pointer_at(0.0, 0.0);
    assert!(release.check_idle(60_000.0, &pointer, 60, |_| 100).is_none());
    assert_eq!(release.mode(), ReleaseMode::Suppressed);
}
