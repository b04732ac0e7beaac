//! CPU-side vertex builders for the globe and its overlay.
//!
//! Everything here is plain math over `globe_core` state so it can be unit
//! tested on the host.

use crate::constants::{ARC_COLOR, DISC_SEGMENTS, ENDPOINT_COLOR, MARKER_COLOR};
use glam::Vec3;
use globe_core::geo::surface_normal;
use globe_core::{ArcPath, Marker, OverlayController, ENDPOINT_DISC_RADIUS};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// UV sphere laid out like three.js `SphereGeometry`: a `(w+1) x (h+1)` vertex
/// grid, with the degenerate triangles at both poles dropped.
pub fn sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    color: [f32; 4],
) -> (Vec<Vertex>, Vec<u32>) {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_v, cos_v) = (v * std::f32::consts::PI).sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_u, cos_u) = (u * std::f32::consts::TAU).sin_cos();
            let p = Vec3::new(-radius * cos_u * sin_v, radius * cos_v, radius * sin_u * sin_v);
            vertices.push(Vertex::new(p, color));
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity((w * (h - 1) * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    (vertices, indices)
}

/// Append a polyline as line-list pairs.
pub fn push_polyline(out: &mut Vec<Vertex>, points: &[Vec3], color: [f32; 4]) {
    for pair in points.windows(2) {
        out.push(Vertex::new(pair[0], color));
        out.push(Vertex::new(pair[1], color));
    }
}

/// Append a circle outline centered on `center`, lying in the plane normal to `normal`.
pub fn push_disc(
    out: &mut Vec<Vertex>,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    segments: u32,
    color: [f32; 4],
) {
    if radius <= 0.0 || segments < 3 {
        return;
    }
    let (t1, t2) = normal.normalize_or_zero().any_orthonormal_pair();
    let at = |i: u32| {
        let (s, c) = (i as f32 / segments as f32 * std::f32::consts::TAU).sin_cos();
        center + (t1 * c + t2 * s) * radius
    };
    for i in 0..segments {
        out.push(Vertex::new(at(i), color));
        out.push(Vertex::new(at(i + 1), color));
    }
}

pub fn push_marker(out: &mut Vec<Vertex>, marker: &Marker) {
    if marker.scale <= 0.0 {
        return;
    }
    out.push(Vertex::new(marker.position, MARKER_COLOR));
    out.push(Vertex::new(marker.tip(), MARKER_COLOR));
}

pub fn push_arc(out: &mut Vec<Vertex>, arc: &ArcPath) {
    push_polyline(out, arc.visible_points(), ARC_COLOR);
    let radius = ENDPOINT_DISC_RADIUS * arc.endpoint_scale;
    push_disc(out, arc.from_point, surface_normal(arc.from), radius, DISC_SEGMENTS, ENDPOINT_COLOR);
    push_disc(out, arc.to_point, surface_normal(arc.to), radius, DISC_SEGMENTS, ENDPOINT_COLOR);
}

/// Rebuild the overlay line list: markers first, then arcs, each in
/// registration order.
pub fn overlay_lines(overlay: &OverlayController, out: &mut Vec<Vertex>) {
    out.clear();
    for marker in overlay.markers() {
        push_marker(out, marker);
    }
    for arc in overlay.arcs() {
        push_arc(out, arc);
    }
}
