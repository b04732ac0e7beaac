//! Geographic coordinates and their placement on the globe.
//!
//! The globe uses a Y-up frame: latitude is measured from the +Y pole and
//! longitude rotates around Y with lon = 0 landing on +X.

use glam::Vec3;

use crate::error::OverlayError;

/// Latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoCoordinate {
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject non-finite values and anything outside [-90, 90] x [-180, 180].
    pub fn validate(self) -> Result<Self, OverlayError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(self)
        } else {
            Err(OverlayError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Project a coordinate onto a sphere of the given radius.
#[inline]
pub fn project(coord: GeoCoordinate, radius: f32) -> Vec3 {
    let polar = (90.0 - coord.latitude).to_radians();
    let azimuth = (90.0 + coord.longitude).to_radians();
    spherical_to_cartesian(radius, polar, azimuth)
}

/// `(r, polar, azimuth)` to Cartesian, polar angle measured from +Y.
#[inline]
pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let sin_polar_r = polar.sin() * radius;
    Vec3::new(
        sin_polar_r * azimuth.sin(),
        polar.cos() * radius,
        sin_polar_r * azimuth.cos(),
    )
}

/// Outward unit normal of the globe at `coord`.
#[inline]
pub fn surface_normal(coord: GeoCoordinate) -> Vec3 {
    project(coord, 1.0)
}

/// Linear interpolation in lat/lon space (not along a great circle).
///
/// Long routes crossing the date line or a pole bend the "wrong" way; arcs
/// keep that look on purpose.
#[inline]
pub fn lerp_coord(a: GeoCoordinate, b: GeoCoordinate, t: f32) -> GeoCoordinate {
    GeoCoordinate {
        latitude: (b.latitude - a.latitude) * t + a.latitude,
        longitude: (b.longitude - a.longitude) * t + a.longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(GeoCoordinate::new(90.0, -180.0).validate().is_ok());
        assert!(GeoCoordinate::new(90.5, 0.0).validate().is_err());
        assert!(GeoCoordinate::new(0.0, 181.0).validate().is_err());
        assert!(GeoCoordinate::new(f32::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn north_pole_is_plus_y() {
        let p = project(GeoCoordinate::new(90.0, 0.0), 2.0);
        assert!(p.x.abs() < 1e-5 && (p.y - 2.0).abs() < 1e-5 && p.z.abs() < 1e-5);
    }
}
