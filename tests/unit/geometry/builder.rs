use kurbo::Shape as _;

use super::*;
use crate::geometry::fingerprint::fingerprint;
use crate::model::knob::KnobParams;

fn spec_with(f: impl FnOnce(&mut KnobParams)) -> KnobSpec {
    let mut p = KnobParams::default();
    f(&mut p);
    KnobSpec::from_params(&p).unwrap()
}

fn kinds(prims: &[Primitive]) -> Vec<PrimitiveKind> {
    prims.iter().map(|p| p.kind).collect()
}

fn centroid(path: &BezPath) -> Point {
    let bb = path.bounding_box();
    bb.center()
}

#[test]
fn repeated_builds_are_identical() {
    for style in [
        IndicatorStyle::Line,
        IndicatorStyle::Dot,
        IndicatorStyle::ArcFill,
    ] {
        let spec = spec_with(|p| {
            p.indicator = style;
            p.body = BodyStyle::Lobed {
                lobes: 7,
                depth: 0.4,
            };
        });
        let a = build_primitives(&spec, 33.3);
        let b = build_primitives(&spec, 33.3);
        assert_eq!(a, b);
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&build_primitives(&spec, 33.4)));
    }
}

#[test]
fn layer_order_puts_decorations_after_base() {
    let spec = spec_with(|_| {});
    assert_eq!(
        kinds(&build_primitives(&spec, 0.0)),
        vec![
            PrimitiveKind::Shadow,
            PrimitiveKind::Body,
            PrimitiveKind::Bevel,
            PrimitiveKind::Indicator
        ]
    );

    let bare = spec_with(|p| {
        p.shadow = false;
        p.bevel = false;
    });
    assert_eq!(
        kinds(&build_primitives(&bare, 0.0)),
        vec![PrimitiveKind::Body, PrimitiveKind::Indicator]
    );
}

#[test]
fn line_indicator_points_along_angle() {
    let spec = spec_with(|p| p.stroke_width = 2.0);
    let prims = build_primitives(&spec, 90.0);
    let line = prims.last().unwrap();
    let c = centroid(&line.path);
    // 90 degrees is 3 o'clock: indicator to the right of center, vertically centered.
    assert!(c.x > 20.0, "{c:?}");
    assert!(c.y.abs() < 1e-6, "{c:?}");

    let prims = build_primitives(&spec, -135.0);
    let c = centroid(&prims.last().unwrap().path);
    assert!(c.x < 0.0 && c.y > 0.0, "{c:?}");
}

#[test]
fn dot_indicator_is_sized_and_placed() {
    let spec = spec_with(|p| {
        p.indicator = IndicatorStyle::Dot;
        p.stroke_width = 1.0;
    });
    let prims = build_primitives(&spec, 0.0);
    let dot = prims.last().unwrap();
    let bb = dot.path.bounding_box();
    assert!((bb.width() - 6.0).abs() < 0.02, "{bb:?}");
    assert!((bb.center().y + 36.0).abs() < 0.01, "{bb:?}");
}

#[test]
fn arc_fill_has_track_and_grows_with_angle() {
    let spec = spec_with(|p| {
        p.indicator = IndicatorStyle::ArcFill;
        p.shadow = false;
        p.bevel = false;
    });
    let at_start = build_primitives(&spec, -135.0);
    assert_eq!(
        kinds(&at_start),
        vec![PrimitiveKind::Body, PrimitiveKind::IndicatorTrack]
    );

    let mid = build_primitives(&spec, 0.0);
    assert_eq!(
        kinds(&mid),
        vec![
            PrimitiveKind::Body,
            PrimitiveKind::IndicatorTrack,
            PrimitiveKind::Indicator
        ]
    );
    let fill = mid[2].path.bounding_box();
    // The fill stays left of 12 o'clock.
    assert!(fill.max_x() <= 1e-3, "{fill:?}");
}

#[test]
fn zero_stroke_line_draws_no_indicator() {
    let spec = spec_with(|p| p.stroke_width = 0.0);
    let prims = build_primitives(&spec, 0.0);
    assert!(prims.iter().all(|p| p.kind != PrimitiveKind::Indicator));
}

#[test]
fn body_paint_follows_gradient_flag() {
    let radial = spec_with(|_| {});
    let prims = build_primitives(&radial, 0.0);
    assert!(matches!(prims[1].paint, Paint::Radial { .. }));

    let angular = spec_with(|p| p.gradient = GradientKind::Angular);
    let prims = build_primitives(&angular, 0.0);
    assert!(matches!(prims[1].paint, Paint::Angular { .. }));

    let solid = spec_with(|p| p.fill_stops = vec![ColorStop::new(0.3, Rgba8::WHITE)]);
    let prims = build_primitives(&solid, 0.0);
    assert_eq!(prims[1].paint, Paint::Solid(Rgba8::WHITE));
}

#[test]
fn round_body_is_rotation_invariant_but_lobes_turn() {
    let round = spec_with(|_| {});
    assert_eq!(
        build_primitives(&round, 0.0)[1],
        build_primitives(&round, 45.0)[1]
    );

    let lobed = spec_with(|p| {
        p.body = BodyStyle::Lobed {
            lobes: 5,
            depth: 0.5,
        }
    });
    assert_ne!(
        build_primitives(&lobed, 0.0)[1],
        build_primitives(&lobed, 20.0)[1]
    );
}
