// Shared layout and timing constants for the globe overlay.

// Globe layout
pub const GLOBE_RADIUS: f32 = 2.0; // earth sphere
pub const MARKER_RADIUS: f32 = 2.0; // markers sit on the surface
pub const ARC_RADIUS: f32 = 2.01; // arc endpoints float just above the surface
pub const ARC_CONTROL_RADIUS: f32 = 3.0; // Bézier control points lift the arc
pub const ARC_SEGMENTS: usize = 99; // sampled path has ARC_SEGMENTS + 1 points

// Visual sizing
pub const MARKER_LENGTH: f32 = 0.1; // full-scale spike length
pub const ENDPOINT_DISC_RADIUS: f32 = 0.01; // arc endpoint indicator at scale 1

// Marker timings (seconds)
pub const MARKER_FADE_DELAY: f32 = 0.5;
pub const MARKER_FADE_DURATION: f32 = 1.0;

// Arc timings (seconds)
pub const ARC_ENDPOINT_DURATION: f32 = 0.5; // endpoint discs grow / shrink
pub const ARC_DRAW_DELAY: f32 = 0.5;
pub const ARC_DRAW_DURATION: f32 = 1.0; // draw-forward and retract phases

// Demo traffic (milliseconds)
pub const DEMO_MARKER_INTERVAL_MS: u64 = 20;
pub const DEMO_MARKER_LIFETIME_MS: u64 = 1000;
pub const DEMO_LINE_INTERVAL_MS: u64 = 100;

/// Total length of one arc timeline, delays included.
#[inline]
pub fn arc_timeline_secs() -> f32 {
    ARC_ENDPOINT_DURATION * 2.0 + (ARC_DRAW_DELAY + ARC_DRAW_DURATION) * 2.0
}
