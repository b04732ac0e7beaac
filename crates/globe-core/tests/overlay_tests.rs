use globe_core::geo::{project, GeoCoordinate};
use globe_core::{
    ArcId, LineSpec, MarkerId, MarkerSpec, MarkerState, OverlayConfig, OverlayController,
    OverlayError, SceneEvent, ARC_RADIUS, ARC_SEGMENTS,
};
use globe_core::tween::{Param, Sequencer, TweenEvent};
use globe_core::SceneTally;
use std::time::Duration;

const STEP: Duration = Duration::from_millis(250);

fn run(overlay: &mut OverlayController, steps: usize) -> Vec<SceneEvent> {
    let mut out = Vec::new();
    for _ in 0..steps {
        overlay.tick(STEP, &mut out);
    }
    out
}

fn scale_of(overlay: &OverlayController, id: &str) -> Option<f32> {
    overlay.find_marker(&MarkerId::from(id)).map(|m| m.scale)
}

fn equator_line() -> LineSpec {
    LineSpec::new(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 90.0))
}

#[test]
fn marker_grows_in_after_its_delay() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("m1", 10.0, 20.0)).unwrap();

    let marker = overlay.find_marker(&"m1".into()).unwrap();
    assert_eq!(marker.scale, 0.0);
    assert_eq!(marker.state, MarkerState::Appearing);
    assert_eq!(marker.position, project(GeoCoordinate::new(10.0, 20.0), 2.0));

    let events = run(&mut overlay, 2); // 0.5s: delay just elapsed
    assert_eq!(events, vec![SceneEvent::MarkerAdded("m1".into())]);
    assert_eq!(scale_of(&overlay, "m1"), Some(0.0));

    run(&mut overlay, 2); // 1.0s
    assert_eq!(scale_of(&overlay, "m1"), Some(0.5));

    run(&mut overlay, 2); // 1.5s
    let marker = overlay.find_marker(&"m1".into()).unwrap();
    assert_eq!(marker.scale, 1.0);
    assert_eq!(marker.state, MarkerState::Visible);
    assert!(!marker.is_animating());
}

#[test]
fn removing_before_appear_completes_evicts_after_the_fade() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("m1", 0.0, 0.0)).unwrap();
    run(&mut overlay, 1);

    overlay.remove_marker(&"m1".into()).unwrap();
    assert_eq!(overlay.active_animations(), 1, "appear animation must be cancelled");
    assert_eq!(
        overlay.find_marker(&"m1".into()).map(|m| m.state),
        Some(MarkerState::Disappearing)
    );

    let events = run(&mut overlay, 5); // 1.25s of the 1.5s fade
    assert!(events.is_empty());
    assert_eq!(scale_of(&overlay, "m1"), Some(0.0));

    let events = run(&mut overlay, 1);
    assert_eq!(events, vec![SceneEvent::MarkerRemoved("m1".into())]);
    assert!(overlay.find_marker(&"m1".into()).is_none());
    assert_eq!(overlay.active_animations(), 0);
}

#[test]
fn removal_shrinks_from_the_current_scale() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new(7u64, -30.0, 100.0)).unwrap();
    run(&mut overlay, 6);
    assert_eq!(scale_of(&overlay, "7"), Some(1.0));

    overlay.remove_marker(&MarkerId::from(7u64)).unwrap();
    run(&mut overlay, 4); // delay + half the fade
    assert_eq!(scale_of(&overlay, "7"), Some(0.5));
    run(&mut overlay, 2);
    assert_eq!(scale_of(&overlay, "7"), None);
}

#[test]
fn duplicate_marker_ids_are_rejected() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("dup", 1.0, 1.0)).unwrap();
    let err = overlay.add_marker(MarkerSpec::new("dup", 50.0, 50.0)).unwrap_err();
    assert_eq!(err, OverlayError::DuplicateId("dup".to_string()));
    assert_eq!(overlay.marker_count(), 1);
    let kept = overlay.find_marker(&"dup".into()).unwrap();
    assert_eq!(kept.coord, GeoCoordinate::new(1.0, 1.0));
}

#[test]
fn fading_marker_still_blocks_its_id() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("m", 0.0, 0.0)).unwrap();
    overlay.remove_marker(&"m".into()).unwrap();
    assert!(matches!(
        overlay.add_marker(MarkerSpec::new("m", 0.0, 0.0)),
        Err(OverlayError::DuplicateId(_))
    ));
    run(&mut overlay, 6);
    assert!(overlay.add_marker(MarkerSpec::new("m", 0.0, 0.0)).is_ok());
}

#[test]
fn removing_an_unknown_marker_reports_not_found() {
    let mut overlay = OverlayController::default();
    assert_eq!(
        overlay.remove_marker(&"ghost".into()),
        Err(OverlayError::NotFound("ghost".to_string()))
    );
}

#[test]
fn second_removal_keeps_the_running_fade() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("m", 0.0, 0.0)).unwrap();
    overlay.remove_marker(&"m".into()).unwrap();
    run(&mut overlay, 4);
    overlay.remove_marker(&"m".into()).unwrap();
    let events = run(&mut overlay, 2);
    assert_eq!(events, vec![SceneEvent::MarkerRemoved("m".into())]);
    assert_eq!(overlay.marker_count(), 0);
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let mut overlay = OverlayController::default();
    assert!(matches!(
        overlay.add_marker(MarkerSpec::new("bad", 91.0, 0.0)),
        Err(OverlayError::InvalidCoordinate { .. })
    ));
    let line = LineSpec::new(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 200.0));
    assert!(matches!(
        overlay.add_line(line),
        Err(OverlayError::InvalidCoordinate { .. })
    ));
    assert_eq!(overlay.marker_count() + overlay.arc_count(), 0);
    assert_eq!(overlay.active_animations(), 0);
}

#[test]
fn line_path_starts_and_ends_on_the_projected_endpoints() {
    let mut overlay = OverlayController::default();
    let id = overlay.add_line(equator_line()).unwrap();
    let arc = overlay.find_arc(id).unwrap();

    assert_eq!(arc.path.len(), ARC_SEGMENTS + 1);
    assert_eq!(arc.path.len(), 100);
    assert_eq!(arc.path[0], project(GeoCoordinate::new(0.0, 0.0), ARC_RADIUS));
    assert_eq!(arc.path[99], project(GeoCoordinate::new(0.0, 90.0), ARC_RADIUS));
    assert_eq!(arc.controls[0], project(GeoCoordinate::new(0.0, 22.5), 3.0));
    assert_eq!(arc.controls[1], project(GeoCoordinate::new(0.0, 67.5), 3.0));
    assert!(arc.visible_points().is_empty());
}

#[test]
fn arc_draws_forward_retracts_and_retires() {
    let mut overlay = OverlayController::default();
    let id = overlay.add_line(equator_line()).unwrap();
    let arc = |o: &OverlayController| o.find_arc(id).cloned().unwrap();

    let events = run(&mut overlay, 1); // 0.25s
    assert_eq!(events, vec![SceneEvent::ArcAdded(id)]);
    assert_eq!(arc(&overlay).endpoint_scale, 0.5);

    run(&mut overlay, 1); // 0.5s endpoints fully grown
    assert_eq!(arc(&overlay).endpoint_scale, 1.0);
    assert_eq!(arc(&overlay).visible_range(), 0..0);

    run(&mut overlay, 3); // 1.25s: draw-forward a quarter done
    let a = arc(&overlay);
    assert_eq!(a.reveal_end, 25.0);
    assert_eq!(a.visible_range(), 0..25);

    run(&mut overlay, 3); // 2.0s: whole path drawn
    assert_eq!(arc(&overlay).visible_range(), 0..100);

    run(&mut overlay, 4); // 3.0s: retract halfway
    let a = arc(&overlay);
    assert_eq!(a.reveal_start, 50.0);
    assert_eq!(a.reveal_end, 100.0);
    assert_eq!(a.visible_range(), 50..100);
    assert_eq!(a.endpoint_scale, 1.0);

    run(&mut overlay, 2); // 3.5s: trail gone
    assert!(arc(&overlay).visible_points().is_empty());

    run(&mut overlay, 1); // 3.75s: endpoints shrinking
    assert_eq!(arc(&overlay).endpoint_scale, 0.5);

    let mut events = Vec::new();
    overlay.tick(Duration::from_millis(240), &mut events); // 3.99s
    assert!((arc(&overlay).endpoint_scale - 0.02).abs() < 1e-4);
    assert!(events.is_empty());

    overlay.tick(Duration::from_millis(20), &mut events); // past 4.0s: timeline complete
    assert_eq!(events, vec![SceneEvent::ArcRetired(id)]);
    assert!(overlay.find_arc(id).is_none());
    assert_eq!(overlay.arc_count(), 0);
    assert_eq!(overlay.active_animations(), 0);
}

#[test]
fn arc_timeline_length_matches_config() {
    let cfg = OverlayConfig::default();
    assert!((cfg.arc_timeline_secs() - 4.0).abs() < 1e-6);
    assert!((globe_core::arc_timeline_secs() - cfg.arc_timeline_secs()).abs() < 1e-6);
}

#[test]
fn arcs_get_distinct_ids_and_can_be_removed_early() {
    let mut overlay = OverlayController::default();
    let a = overlay.add_line(equator_line()).unwrap();
    let b = overlay.add_line(equator_line()).unwrap();
    assert_ne!(a, b);
    run(&mut overlay, 3);

    overlay.remove_line(a).unwrap();
    assert_eq!(overlay.remove_line(a), Err(OverlayError::NotFound(a.to_string())));
    let events = run(&mut overlay, 1);
    assert_eq!(events, vec![SceneEvent::ArcRemoved(a)]);
    assert_eq!(overlay.arcs().map(|arc| arc.id).collect::<Vec<ArcId>>(), vec![b]);
    assert_eq!(overlay.active_animations(), 1);
}

#[test]
fn clear_cancels_everything() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("a", 0.0, 0.0)).unwrap();
    let arc = overlay.add_line(equator_line()).unwrap();
    overlay.clear();
    let events = run(&mut overlay, 20);
    assert_eq!(
        events,
        vec![
            SceneEvent::MarkerAdded("a".into()),
            SceneEvent::ArcAdded(arc),
            SceneEvent::MarkerRemoved("a".into()),
            SceneEvent::ArcRemoved(arc),
        ]
    );
    assert_eq!(overlay.active_animations(), 0);
    assert_eq!(overlay.marker_count(), 0);
}

#[test]
fn markers_iterate_in_registration_order() {
    let mut overlay = OverlayController::default();
    for id in ["c", "a", "b"] {
        overlay.add_marker(MarkerSpec::new(id, 0.0, 0.0)).unwrap();
    }
    overlay.remove_marker(&"a".into()).unwrap();
    run(&mut overlay, 6);
    let ids: Vec<&str> = overlay.markers().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);
}

#[test]
fn marker_tip_extends_along_the_surface_normal() {
    let mut overlay = OverlayController::default();
    overlay.add_marker(MarkerSpec::new("n", 90.0, 0.0)).unwrap();
    run(&mut overlay, 6);
    let m = overlay.find_marker(&"n".into()).unwrap();
    let tip = m.tip();
    assert!((tip.y - 2.1).abs() < 1e-5);
    assert!(tip.x.abs() < 1e-5 && tip.z.abs() < 1e-5);
}

#[test]
fn arc_ids_survive_a_raw_round_trip() {
    let mut overlay = OverlayController::default();
    let id = overlay.add_line(equator_line()).unwrap();
    let again = ArcId::from_raw(id.raw());
    assert_eq!(again, id);
    assert!(overlay.find_arc(again).is_some());
}

#[test]
fn arc_timeline_finishes_with_endpoints_collapsed() {
    let cfg = OverlayConfig::default();
    let mut seq = Sequencer::new();
    let handle = seq.run(Default::default(), cfg.arc_phases(100.0));
    let mut events = Vec::new();
    for _ in 0..17 {
        seq.tick(STEP, &mut events);
    }
    let finished: Vec<_> = events
        .iter()
        .filter_map(|ev| match ev {
            TweenEvent::Finished { handle: h, values } if *h == handle => Some(*values),
            _ => None,
        })
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].get(Param::EndpointScale), 0.0);
    assert_eq!(finished[0].get(Param::RevealStart), 100.0);
    assert_eq!(finished[0].get(Param::RevealEnd), 100.0);
}

#[test]
fn staggered_entities_follow_their_own_timelines() {
    let mut overlay = OverlayController::default();
    let close = |v: Option<f32>, want: f32| v.is_some_and(|v| (v - want).abs() < 1e-6);

    overlay.add_marker(MarkerSpec::new("m0", 0.0, 0.0)).unwrap();
    let line = overlay.add_line(equator_line()).unwrap();
    run(&mut overlay, 2); // 0.5s
    overlay.add_marker(MarkerSpec::new("m1", 5.0, 5.0)).unwrap();
    assert_eq!(overlay.find_arc(line).unwrap().endpoint_scale, 1.0);
    assert_eq!(scale_of(&overlay, "m0"), Some(0.0));

    run(&mut overlay, 2); // 1.0s
    assert!(close(scale_of(&overlay, "m0"), 0.5));
    assert!(close(scale_of(&overlay, "m1"), 0.0));

    run(&mut overlay, 2); // 1.5s
    assert!(close(scale_of(&overlay, "m0"), 1.0));
    assert!(close(scale_of(&overlay, "m1"), 0.5));
    overlay.remove_marker(&"m0".into()).unwrap();

    run(&mut overlay, 2); // 2.0s: m0 still waiting out its fade delay
    assert!(close(scale_of(&overlay, "m0"), 1.0));
    assert!(close(scale_of(&overlay, "m1"), 1.0));

    run(&mut overlay, 2); // 2.5s
    assert!(close(scale_of(&overlay, "m0"), 0.5));
    assert_eq!(overlay.find_arc(line).unwrap().visible_range(), 0..100);

    let events = run(&mut overlay, 2); // 3.0s
    assert!(events.contains(&SceneEvent::MarkerRemoved("m0".into())));
    assert!(scale_of(&overlay, "m0").is_none());
    assert!(close(scale_of(&overlay, "m1"), 1.0));
}

#[test]
fn scene_tally_counts_each_kind_of_change() {
    let mut overlay = OverlayController::default();
    let mut tally = SceneTally::default();
    overlay.add_marker(MarkerSpec::new("m", 0.0, 0.0)).unwrap();
    let early = overlay.add_line(equator_line()).unwrap();
    overlay.add_line(equator_line()).unwrap();
    overlay.remove_line(early).unwrap();
    tally.record(&run(&mut overlay, 1));
    assert_eq!(tally.markers_added, 1);
    assert_eq!(tally.arcs_added, 2);
    assert_eq!(tally.arcs_removed, 1);

    overlay.remove_marker(&"m".into()).unwrap();
    tally.record(&run(&mut overlay, 16)); // 4.25s
    assert_eq!(tally.markers_removed, 1);
    assert_eq!(tally.arcs_retired, 1);
}
