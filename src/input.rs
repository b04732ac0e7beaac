use crate::constants::{ORBIT_RADIANS_PER_PX, WHEEL_DELTA_MAX, ZOOM_PER_WHEEL_PX};

/// Pointer drag in progress, tracked in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, x: f32, y: f32) {
        *self = Self {
            active: true,
            pointer_id,
            last_x: x,
            last_y: y,
        };
    }

    /// Advance the drag to `(x, y)` and return the pixel delta since the last move.
    pub fn advance(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active || self.pointer_id != pointer_id {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        let was = self.active && self.pointer_id == pointer_id;
        if was {
            self.active = false;
        }
        was
    }
}

/// Map a drag delta to `(yaw, pitch)` deltas. Dragging right spins the globe
/// right, dragging down tilts the north pole toward the viewer.
#[inline]
pub fn drag_to_orbit(dx_px: f32, dy_px: f32) -> (f32, f32) {
    (-dx_px * ORBIT_RADIANS_PER_PX, dy_px * ORBIT_RADIANS_PER_PX)
}

/// Map a wheel delta to a distance multiplier. Scrolling down zooms out.
#[inline]
pub fn wheel_to_zoom(delta_y: f32) -> f32 {
    if !delta_y.is_finite() {
        return 1.0;
    }
    (delta_y.clamp(-WHEEL_DELTA_MAX, WHEEL_DELTA_MAX) * ZOOM_PER_WHEEL_PX).exp()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    ToggleStats,
    ToggleDemo,
    Clear,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::TogglePause),
        "h" | "H" => Some(KeyAction::ToggleStats),
        "d" | "D" => Some(KeyAction::ToggleDemo),
        "c" | "C" => Some(KeyAction::Clear),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

/// `true` when the page query string carries a `debug` flag.
pub fn has_debug_flag(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "debug" || pair.starts_with("debug="))
}
