//! Polygonal outlines sampled around the knob center.
//!
//! Angles follow the knob convention: degrees, 0 at 12 o'clock, clockwise positive.

use crate::foundation::core::{BezPath, Point};
use crate::foundation::math::knob_direction;

/// Shallow lobe depth used for grip knurling.
const GRIP_DEPTH: f64 = 0.05;

pub(crate) fn polar(radius: f64, angle_deg: f64) -> Point {
    let (x, y) = knob_direction(angle_deg);
    Point::new(x * radius, y * radius)
}

/// Cosine-lobed outline with its outermost lobe facing `rotation_deg`.
///
/// `protrusion` in `(0, 1]`: valleys sit at `radius * (1 - 0.6 * protrusion)`.
pub(crate) fn lobed_profile(
    radius: f64,
    lobes: u32,
    protrusion: f64,
    rotation_deg: f64,
    segments: u32,
) -> Vec<Point> {
    let r_inner = radius * lobe_inner_factor(protrusion);
    let r_mid = (radius + r_inner) / 2.0;
    let amp = (radius - r_inner) / 2.0;
    let lobes = f64::from(lobes);
    (0..segments)
        .map(|i| {
            let theta = 360.0 * f64::from(i) / f64::from(segments);
            let r = r_mid + amp * (lobes * (theta - rotation_deg)).to_radians().cos();
            polar(r, theta)
        })
        .collect()
}

pub(crate) fn ridged_profile(
    radius: f64,
    ridges: u32,
    rotation_deg: f64,
    segments: u32,
) -> Vec<Point> {
    lobed_profile(radius, ridges, GRIP_DEPTH, rotation_deg, segments)
}

/// Radius of a lobed outline's valleys as a fraction of its outer radius.
pub(crate) fn lobe_inner_factor(protrusion: f64) -> f64 {
    1.0 - 0.6 * protrusion
}

pub(crate) fn ridge_inner_factor() -> f64 {
    lobe_inner_factor(GRIP_DEPTH)
}

/// Annular sector between two radii, from `from_deg` to `to_deg` clockwise.
pub(crate) fn annular_arc(
    center: Point,
    outer: f64,
    inner: f64,
    from_deg: f64,
    to_deg: f64,
    segments_per_turn: u32,
) -> Vec<Point> {
    let sweep = to_deg - from_deg;
    let steps = ((sweep.abs() / 360.0 * f64::from(segments_per_turn)).ceil() as u32).max(2);
    let mut pts = Vec::with_capacity(2 * (steps as usize + 1));
    for i in 0..=steps {
        let a = from_deg + sweep * f64::from(i) / f64::from(steps);
        pts.push(center + polar(outer, a).to_vec2());
    }
    for i in (0..=steps).rev() {
        let a = from_deg + sweep * f64::from(i) / f64::from(steps);
        pts.push(center + polar(inner, a).to_vec2());
    }
    pts
}

/// Closed ring as two opposite-winding subpaths, so the hole stays empty under either fill rule.
pub(crate) fn ring_path(center: Point, outer: f64, inner: f64, segments: u32) -> BezPath {
    let outer_pts: Vec<Point> = (0..segments)
        .map(|i| center + polar(outer, 360.0 * f64::from(i) / f64::from(segments)).to_vec2())
        .collect();
    let inner_pts: Vec<Point> = (0..segments)
        .rev()
        .map(|i| center + polar(inner, 360.0 * f64::from(i) / f64::from(segments)).to_vec2())
        .collect();
    let mut path = polygon_path(&outer_pts);
    for el in polygon_path(&inner_pts).elements() {
        path.push(*el);
    }
    path
}

pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/profile.rs"]
mod tests;
