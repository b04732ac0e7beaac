// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use globe_core::{OrbitCamera, ARC_RADIUS, GLOBE_RADIUS, MARKER_LENGTH};

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(ORBIT_RADIANS_PER_PX > 0.0 && ORBIT_RADIANS_PER_PX < 0.1);
    assert!(ZOOM_PER_WHEEL_PX > 0.0);
    assert!(WHEEL_DELTA_MAX > 0.0);
    assert!(STATS_REFRESH_SEC > 0.0 && STATS_REFRESH_SEC <= 1.0);
    assert!(DISC_SEGMENTS >= 3);
    assert!(GLOBE_WIDTH_SEGMENTS >= 3 && GLOBE_HEIGHT_SEGMENTS >= 2);
    assert!(INITIAL_LINE_VERTICES > 0);
}

#[test]
fn colors_are_normalized() {
    for c in [GLOBE_COLOR, MARKER_COLOR, ARC_COLOR, ENDPOINT_COLOR] {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)), "{c:?}");
    }
    assert!(CLEAR_COLOR.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn marker_color_is_light_blue_at_eighty_percent() {
    assert!((MARKER_COLOR[0] - 133.0 / 255.0).abs() < 1e-6);
    assert!((MARKER_COLOR[1] - 220.0 / 255.0).abs() < 1e-6);
    assert_eq!(MARKER_COLOR[2], 1.0);
    assert_eq!(MARKER_COLOR[3], 0.8);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn globe_fits_in_the_orbit_range() {
    let orbit = OrbitCamera::default();
    // the nearest camera position must stay outside the arcs and marker tips
    assert!(orbit.min_distance > ARC_RADIUS);
    assert!(orbit.min_distance > GLOBE_RADIUS + MARKER_LENGTH);
    assert!(orbit.distance >= orbit.min_distance && orbit.distance <= orbit.max_distance);
}
