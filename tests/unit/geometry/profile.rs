use super::*;

fn radius_of(p: Point) -> f64 {
    p.to_vec2().hypot()
}

#[test]
fn lobed_profile_stays_between_valley_and_rim() {
    let pts = lobed_profile(50.0, 5, 0.5, 0.0, 360);
    assert_eq!(pts.len(), 360);
    let inner = 50.0 * lobe_inner_factor(0.5);
    for p in &pts {
        let r = radius_of(*p);
        assert!(r <= 50.0 + 1e-9 && r >= inner - 1e-9, "r={r}");
    }
    // A lobe peak faces the rotation angle (12 o'clock here).
    assert!((radius_of(pts[0]) - 50.0).abs() < 1e-9);
}

#[test]
fn lobed_profile_rotates_with_knob() {
    let pts = lobed_profile(50.0, 4, 1.0, 45.0, 360);
    // Sample at 45 degrees is a peak, at 0 degrees a valley (4 lobes: 90 degree period).
    assert!((radius_of(pts[45]) - 50.0).abs() < 1e-9);
    assert!((radius_of(pts[0]) - 50.0 * lobe_inner_factor(1.0)).abs() < 1e-9);
}

#[test]
fn ridges_are_shallow() {
    let pts = ridged_profile(40.0, 32, 0.0, 512);
    let min = pts.iter().map(|p| radius_of(*p)).fold(f64::MAX, f64::min);
    assert!(min >= 40.0 * ridge_inner_factor() - 1e-9);
    assert!(ridge_inner_factor() > 0.95);
}

#[test]
fn annular_arc_spans_requested_angles() {
    let pts = annular_arc(Point::ORIGIN, 10.0, 8.0, -90.0, 90.0, 64);
    let first = pts[0];
    assert!((first.x + 10.0).abs() < 1e-9 && first.y.abs() < 1e-9);
    let steps = pts.len() / 2 - 1;
    let last_outer = pts[steps];
    assert!((last_outer.x - 10.0).abs() < 1e-9);
    let last = *pts.last().unwrap();
    assert!((last.x + 8.0).abs() < 1e-9);
}

#[test]
fn polygon_and_ring_paths_close() {
    let empty = polygon_path(&[]);
    assert!(empty.elements().is_empty());

    let tri = polygon_path(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    assert_eq!(tri.elements().len(), 4);

    let ring = ring_path(Point::ORIGIN, 10.0, 5.0, 16);
    let closes = ring
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::ClosePath))
        .count();
    assert_eq!(closes, 2);
}
