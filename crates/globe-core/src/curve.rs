use glam::Vec3;

/// Cubic Bézier segment with two interior control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub c1: Vec3,
    pub c2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    pub fn new(p0: Vec3, c1: Vec3, c2: Vec3, p3: Vec3) -> Self {
        Self { p0, c1, c2, p3 }
    }

    /// Evaluate the curve at `t` in [0, 1].
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.c1 * (3.0 * u * u * t)
            + self.c2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    /// `count + 1` evenly spaced samples, endpoints copied verbatim.
    pub fn points(&self, count: usize) -> Vec<Vec3> {
        if count == 0 {
            return vec![self.p0];
        }
        let mut out = Vec::with_capacity(count + 1);
        out.push(self.p0);
        for i in 1..count {
            out.push(self.point_at(i as f32 / count as f32));
        }
        out.push(self.p3);
        out
    }
}

/// Sample the cubic Bézier `p0 -> c1 -> c2 -> p3` into `count + 1` points.
#[inline]
pub fn sample(p0: Vec3, c1: Vec3, c2: Vec3, p3: Vec3, count: usize) -> Vec<Vec3> {
    CubicBezier::new(p0, c1, c2, p3).points(count)
}
