//! View-side state shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The frontend owns one
//! [`Viewport`] and one [`OrbitCamera`] per demo instance and rebuilds the
//! [`Camera`] from them every frame.

use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Canvas backing-store size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Largest device pixel ratio honored when sizing the backing store.
    pub const MAX_PIXEL_RATIO: f32 = 2.0;

    /// Size a backing store from CSS pixels and the raw device pixel ratio.
    pub fn from_css(css_width: f32, css_height: f32, device_pixel_ratio: f32) -> Self {
        let pixel_ratio = device_pixel_ratio.clamp(1.0, Self::MAX_PIXEL_RATIO);
        Self {
            width: ((css_width * pixel_ratio) as u32).max(1),
            height: ((css_height * pixel_ratio) as u32).max(1),
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Camera orbiting the globe center, driven by pointer drag and wheel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Rotation around +Y, radians. Zero looks down -Z from +Z.
    pub yaw: f32,
    /// Elevation above the equator plane, radians.
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fovy_degrees: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 4.0,
            min_distance: 2.5,
            max_distance: 20.0,
            fovy_degrees: 75.0,
        }
    }
}

impl OrbitCamera {
    /// Keep the eye short of the poles so `look_at` stays well defined.
    pub const PITCH_LIMIT: f32 = 1.5;

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Multiply the distance by `factor`, clamped to the allowed range.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn camera(&self, viewport: &Viewport) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: self.fovy_degrees.to_radians(),
            znear: 0.1,
            zfar: 2000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_caps_pixel_ratio() {
        let vp = Viewport::from_css(800.0, 600.0, 3.0);
        assert_eq!((vp.width, vp.height), (1600, 1200));
        assert_eq!(vp.pixel_ratio, 2.0);

        let vp = Viewport::from_css(0.0, 0.0, 0.5);
        assert_eq!((vp.width, vp.height), (1, 1));
        assert_eq!(vp.pixel_ratio, 1.0);
        assert!((Viewport::from_css(300.0, 150.0, 1.0).aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn default_orbit_looks_at_the_globe_from_plus_z() {
        let cam = OrbitCamera::default().camera(&Viewport::default());
        assert!((cam.eye - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-6);
        assert!((cam.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
        // the globe center projects to the middle of clip space
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    }
}
