/// Front-end tuning constants.
///
/// Interaction sensitivities and overlay colors live here so the frame loop
/// and event handlers stay free of magic numbers.
// Orbit drag: radians of yaw/pitch per CSS pixel of pointer travel
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005;

// Wheel zoom: distance multiplier per pixel of wheel delta (exp-mapped)
pub const ZOOM_PER_WHEEL_PX: f32 = 0.001;
// Single wheel events larger than this are clamped (line/page delta modes)
pub const WHEEL_DELTA_MAX: f32 = 400.0;

// Globe mesh resolution
pub const GLOBE_WIDTH_SEGMENTS: u32 = 64;
pub const GLOBE_HEIGHT_SEGMENTS: u32 = 64;

// Endpoint disc resolution
pub const DISC_SEGMENTS: u32 = 16;

// Colors (linear RGBA)
pub const GLOBE_COLOR: [f32; 4] = [0.08, 0.16, 0.32, 1.0];
// #85dcff at 0.8 opacity
pub const MARKER_COLOR: [f32; 4] = [0x85 as f32 / 255.0, 0xdc as f32 / 255.0, 1.0, 0.8];
pub const ARC_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const ENDPOINT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Overlay vertex budget; the buffer grows past this when needed
pub const INITIAL_LINE_VERTICES: usize = 16 * 1024;

// Stats panel refresh period (seconds)
pub const STATS_REFRESH_SEC: f32 = 0.25;

// Seed for the demo driver's coordinate stream
pub const DEMO_SEED: u64 = 42;
