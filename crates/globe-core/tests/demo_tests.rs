use globe_core::{DemoConfig, DemoDriver, OverlayController, SceneEvent};
use std::time::Duration;

fn drive(driver: &mut DemoDriver, overlay: &mut OverlayController, frames: usize) -> Vec<SceneEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        let dt = Duration::from_millis(10);
        driver.tick(dt, overlay);
        overlay.tick(dt, &mut events);
    }
    events
}

#[test]
fn spawns_markers_and_lines_at_their_intervals() {
    let mut overlay = OverlayController::default();
    let mut driver = DemoDriver::new(DemoConfig::default(), 42);
    drive(&mut driver, &mut overlay, 100); // one second

    assert_eq!(driver.spawned_markers(), 50);
    assert_eq!(overlay.arc_count(), 10);
    // the first marker's removal is due exactly at 1.02s
    assert_eq!(driver.pending_removals(), 50);
}

#[test]
fn markers_are_removed_after_their_lifetime() {
    let mut overlay = OverlayController::default();
    let mut driver = DemoDriver::new(DemoConfig::default(), 7);
    let events = drive(&mut driver, &mut overlay, 300); // three seconds

    let removed = events
        .iter()
        .filter(|ev| matches!(ev, SceneEvent::MarkerRemoved(_)))
        .count();
    // removals start at ~1.02s and take 1.5s to fade out
    assert!(removed > 0, "expected some markers to finish fading");
    assert!(overlay.marker_count() < driver.spawned_markers() as usize);
    let retired = events
        .iter()
        .filter(|ev| matches!(ev, SceneEvent::ArcRetired(_)))
        .count();
    assert_eq!(retired, 0, "no arc is older than its 4s timeline yet");
}

#[test]
fn arcs_are_evicted_so_the_registry_stays_bounded() {
    let mut overlay = OverlayController::default();
    let mut driver = DemoDriver::new(DemoConfig::default(), 3);
    drive(&mut driver, &mut overlay, 1000); // ten seconds
    // one arc every 100ms, each alive for 4s
    assert!(overlay.arc_count() <= 41, "arcs leaked: {}", overlay.arc_count());
    // one marker every 20ms, each alive for ~2.5s
    assert!(overlay.marker_count() <= 130, "markers leaked: {}", overlay.marker_count());
}

#[test]
fn same_seed_same_traffic() {
    let run = |seed| {
        let mut overlay = OverlayController::default();
        let mut driver = DemoDriver::new(DemoConfig::default(), seed);
        drive(&mut driver, &mut overlay, 50);
        overlay
            .markers()
            .map(|m| (m.coord.latitude, m.coord.longitude))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn long_stalls_are_clamped() {
    let mut overlay = OverlayController::default();
    let mut driver = DemoDriver::new(DemoConfig::default(), 1);
    driver.tick(Duration::from_secs(30), &mut overlay);
    // 250ms worth of traffic, not 30s
    assert_eq!(driver.spawned_markers(), 12);
    assert_eq!(overlay.arc_count(), 2);
}

#[test]
fn switching_the_demo_off_still_retires_its_markers() {
    let mut overlay = OverlayController::default();
    let mut driver = DemoDriver::new(DemoConfig::default(), 42);
    drive(&mut driver, &mut overlay, 100); // one second of traffic
    assert_eq!(overlay.marker_count(), 50);

    let mut events = Vec::new();
    for _ in 0..3000 {
        let dt = Duration::from_millis(10);
        driver.drain_removals(dt, &mut overlay);
        overlay.tick(dt, &mut events);
    }
    assert_eq!(driver.spawned_markers(), 50, "no new traffic while switched off");
    assert_eq!(driver.pending_removals(), 0);
    assert_eq!(overlay.marker_count(), 0);
    assert_eq!(overlay.arc_count(), 0);
}
