use kurbo::PathEl;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::Fnv1a64;
use crate::geometry::primitive::{Paint, Primitive};
use crate::model::knob::ColorStop;

/// Stable 64-bit digest of a primitive stack.
///
/// Equal stacks always hash equal across runs and platforms (exact `f64` bit patterns are hashed),
/// so the value can key caches and pin test fixtures.
pub fn fingerprint(primitives: &[Primitive]) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(primitives.len() as u64);
    for prim in primitives {
        h.write_u8(prim.kind.tag());
        write_path(&mut h, prim.path.elements());
        write_paint(&mut h, &prim.paint);
    }
    h.finish()
}

fn write_path(h: &mut Fnv1a64, elements: &[PathEl]) {
    h.write_u64(elements.len() as u64);
    for el in elements {
        match *el {
            PathEl::MoveTo(p) => {
                h.write_u8(0);
                write_point(h, p);
            }
            PathEl::LineTo(p) => {
                h.write_u8(1);
                write_point(h, p);
            }
            PathEl::QuadTo(p1, p2) => {
                h.write_u8(2);
                write_point(h, p1);
                write_point(h, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                h.write_u8(3);
                write_point(h, p1);
                write_point(h, p2);
                write_point(h, p3);
            }
            PathEl::ClosePath => h.write_u8(4),
        }
    }
}

fn write_paint(h: &mut Fnv1a64, paint: &Paint) {
    match paint {
        Paint::Solid(c) => {
            h.write_u8(0);
            write_color(h, *c);
        }
        Paint::Radial {
            center,
            radius,
            stops,
        } => {
            h.write_u8(1);
            write_point(h, *center);
            h.write_f64(*radius);
            write_stops(h, stops);
        }
        Paint::Angular { center, stops } => {
            h.write_u8(2);
            write_point(h, *center);
            write_stops(h, stops);
        }
        Paint::Linear { from, to, stops } => {
            h.write_u8(3);
            write_point(h, *from);
            write_point(h, *to);
            write_stops(h, stops);
        }
    }
}

fn write_stops(h: &mut Fnv1a64, stops: &[ColorStop]) {
    h.write_u64(stops.len() as u64);
    for s in stops {
        h.write_f64(s.offset);
        write_color(h, s.color);
    }
}

fn write_point(h: &mut Fnv1a64, p: Point) {
    h.write_f64(p.x);
    h.write_f64(p.y);
}

fn write_color(h: &mut Fnv1a64, c: Rgba8) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}
