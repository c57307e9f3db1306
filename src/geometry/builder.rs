use kurbo::{Circle, Ellipse, RoundedRect, Shape as _};

use crate::foundation::core::{Affine, BezPath, Point, Rgba8, Vec2};
use crate::geometry::primitive::{Paint, Primitive, PrimitiveKind};
use crate::geometry::profile::{
    annular_arc, lobe_inner_factor, lobed_profile, polar, polygon_path, ridge_inner_factor,
    ridged_profile, ring_path,
};
use crate::model::knob::{BodyStyle, ColorStop, GradientKind, IndicatorStyle, KnobSpec};

/// Line indicator span, as fractions of the radius.
const LINE_INNER: f64 = 0.35;
const LINE_OUTER: f64 = 0.88;
/// Dot indicator center distance and size bounds, as fractions of the radius.
const DOT_DISTANCE: f64 = 0.72;
const DOT_MIN_RADIUS: f64 = 0.06;
const DOT_MAX_RADIUS: f64 = 0.25;
/// Arc indicator outer edge and maximum thickness, as fractions of the radius.
const ARC_OUTER: f64 = 0.92;
const ARC_MAX_THICKNESS: f64 = 0.6;
const ARC_TRACK_ALPHA: f64 = 0.25;
/// Shadow falloff starts at this fraction of the unspread radius.
const SHADOW_CORE: f64 = 0.85;

/// Build the ordered primitive stack for `spec` rotated to `angle_deg`.
///
/// Order: shadow, body, bevel, indicator track, indicator. Pure and deterministic.
pub fn build_primitives(spec: &KnobSpec, angle_deg: f64) -> Vec<Primitive> {
    let r = spec.radius();
    let tol = r * 1e-4;
    let mut out = Vec::with_capacity(5);

    if spec.shadow() {
        out.push(shadow(spec, tol));
    }

    out.push(Primitive {
        kind: PrimitiveKind::Body,
        path: body_path(spec, angle_deg, tol),
        paint: body_paint(spec),
    });

    if spec.bevel() {
        out.push(bevel(spec));
    }

    indicator(spec, angle_deg, tol, &mut out);
    out
}

fn shadow(spec: &KnobSpec, tol: f64) -> Primitive {
    let r = spec.radius();
    let s = &spec.policy().shadow;
    let center = Point::new(s.offset_x * r, s.offset_y * r);
    let outer = r * (1.0 + s.spread);
    let color = s.color.scale_alpha(s.opacity);
    let core = (SHADOW_CORE / (1.0 + s.spread)).min(0.99);
    Primitive {
        kind: PrimitiveKind::Shadow,
        path: Ellipse::new(center, Vec2::new(outer, outer * 0.97), 0.0).to_path(tol),
        paint: Paint::Radial {
            center,
            radius: outer,
            stops: vec![
                ColorStop::new(0.0, color),
                ColorStop::new(core, color),
                ColorStop::new(1.0, Rgba8 { a: 0, ..color }),
            ],
        },
    }
}

/// Outline of the body; ridged and lobed outlines turn with the knob.
fn body_path(spec: &KnobSpec, angle_deg: f64, tol: f64) -> BezPath {
    let r = spec.radius();
    match spec.body() {
        BodyStyle::Round => Circle::new(Point::ORIGIN, r).to_path(tol),
        BodyStyle::Ridged { ridges } => {
            let segments = spec.segments().max(ridges * 8);
            polygon_path(&ridged_profile(r, ridges, angle_deg, segments))
        }
        BodyStyle::Lobed { lobes, depth } => {
            let segments = spec.segments().max(lobes * 16);
            polygon_path(&lobed_profile(r, lobes, depth, angle_deg, segments))
        }
    }
}

/// Innermost radius of the body outline; decorations stay inside it.
fn body_inner_radius(spec: &KnobSpec) -> f64 {
    let r = spec.radius();
    match spec.body() {
        BodyStyle::Round => r,
        BodyStyle::Ridged { .. } => r * ridge_inner_factor(),
        BodyStyle::Lobed { depth, .. } => r * lobe_inner_factor(depth),
    }
}

fn body_paint(spec: &KnobSpec) -> Paint {
    let stops = spec.fill_stops().to_vec();
    if let [only] = stops.as_slice() {
        return Paint::Solid(only.color);
    }
    match spec.gradient() {
        GradientKind::Radial => Paint::Radial {
            center: Point::ORIGIN,
            radius: spec.radius(),
            stops,
        },
        GradientKind::Angular => Paint::Angular {
            center: Point::ORIGIN,
            stops,
        },
    }
}

/// Ring just inside the body edge, lit from the top left. The light does not turn with the knob.
fn bevel(spec: &KnobSpec) -> Primitive {
    let b = &spec.policy().bevel;
    let outer = body_inner_radius(spec);
    let inner = outer * (1.0 - b.width);
    let reach = outer * std::f64::consts::FRAC_1_SQRT_2;
    Primitive {
        kind: PrimitiveKind::Bevel,
        path: ring_path(Point::ORIGIN, outer, inner, spec.segments()),
        paint: Paint::Linear {
            from: Point::new(-reach, -reach),
            to: Point::new(reach, reach),
            stops: vec![
                ColorStop::new(0.0, b.highlight),
                ColorStop::new(0.5, b.highlight.scale_alpha(0.0)),
                ColorStop::new(0.5001, b.shade.scale_alpha(0.0)),
                ColorStop::new(1.0, b.shade),
            ],
        },
    }
}

fn indicator(spec: &KnobSpec, angle_deg: f64, tol: f64, out: &mut Vec<Primitive>) {
    let r = spec.radius();
    let w = spec.stroke_width();
    let color = spec.indicator_color();

    match spec.indicator() {
        IndicatorStyle::Line => {
            if w <= 0.0 {
                return;
            }
            let upright =
                RoundedRect::new(-w / 2.0, -r * LINE_OUTER, w / 2.0, -r * LINE_INNER, w / 2.0);
            let mut path = upright.to_path(tol);
            path.apply_affine(Affine::rotate(angle_deg.to_radians()));
            out.push(Primitive {
                kind: PrimitiveKind::Indicator,
                path,
                paint: Paint::Solid(color),
            });
        }
        IndicatorStyle::Dot => {
            let dot_r = w.max(r * DOT_MIN_RADIUS).min(r * DOT_MAX_RADIUS);
            out.push(Primitive {
                kind: PrimitiveKind::Indicator,
                path: Circle::new(polar(r * DOT_DISTANCE, angle_deg), dot_r).to_path(tol),
                paint: Paint::Solid(color),
            });
        }
        IndicatorStyle::ArcFill => {
            let thickness = w.min(r * ARC_MAX_THICKNESS);
            if thickness <= 0.0 {
                return;
            }
            let outer = r * ARC_OUTER;
            let inner = outer - thickness;
            let start = spec.start_angle();
            let segments = spec.segments();
            out.push(Primitive {
                kind: PrimitiveKind::IndicatorTrack,
                path: polygon_path(&annular_arc(
                    Point::ORIGIN,
                    outer,
                    inner,
                    start,
                    spec.end_angle(),
                    segments,
                )),
                paint: Paint::Solid(color.scale_alpha(ARC_TRACK_ALPHA)),
            });
            if angle_deg > start {
                out.push(Primitive {
                    kind: PrimitiveKind::Indicator,
                    path: polygon_path(&annular_arc(
                        Point::ORIGIN,
                        outer,
                        inner,
                        start,
                        angle_deg,
                        segments,
                    )),
                    paint: Paint::Solid(color),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/builder.rs"]
mod tests;
