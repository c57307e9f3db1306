//! Per-pixel paint evaluation in design coordinates.

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::{lerp, linear_to_srgb, srgb_to_linear};
use crate::geometry::primitive::Paint;
use crate::model::knob::{ColorSpace, ColorStop};
use crate::render::composite::PremulRgba8;

/// Stop color as premultiplied floats in the interpolation space.
#[derive(Clone, Copy, Debug)]
struct StopColor {
    offset: f64,
    rgba: [f64; 4],
}

enum Shape {
    Solid,
    Radial { center: Point, radius: f64 },
    Angular { center: Point },
    Linear {
        from: Point,
        dir: (f64, f64),
        len_sq: f64,
    },
}

/// A [`Paint`] prepared for repeated sampling.
pub(crate) struct PaintSampler {
    shape: Shape,
    space: ColorSpace,
    stops: Vec<StopColor>,
    solid: PremulRgba8,
}

impl PaintSampler {
    pub(crate) fn new(paint: &Paint, space: ColorSpace) -> Self {
        let (shape, stops): (Shape, &[ColorStop]) = match paint {
            Paint::Solid(c) => {
                return Self {
                    shape: Shape::Solid,
                    space,
                    stops: Vec::new(),
                    solid: c.to_premul().to_array(),
                };
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => (
                Shape::Radial {
                    center: *center,
                    radius: *radius,
                },
                stops.as_slice(),
            ),
            Paint::Angular { center, stops } => {
                (Shape::Angular { center: *center }, stops.as_slice())
            }
            Paint::Linear { from, to, stops } => {
                let dir = (to.x - from.x, to.y - from.y);
                (
                    Shape::Linear {
                        from: *from,
                        dir,
                        len_sq: dir.0 * dir.0 + dir.1 * dir.1,
                    },
                    stops.as_slice(),
                )
            }
        };

        let stops: Vec<StopColor> = stops
            .iter()
            .map(|s| StopColor {
                offset: s.offset,
                rgba: premul_in_space(s.color, space),
            })
            .collect();
        let solid = match stops.first() {
            Some(first) => encode(first.rgba, space),
            None => [0; 4],
        };
        Self {
            shape,
            space,
            stops,
            solid,
        }
    }

    /// Paint color at design-space point `p`.
    pub(crate) fn sample(&self, p: Point) -> PremulRgba8 {
        let t = match self.shape {
            Shape::Solid => return self.solid,
            Shape::Radial { center, radius } => {
                if radius <= 0.0 {
                    1.0
                } else {
                    (p - center).hypot() / radius
                }
            }
            Shape::Angular { center } => {
                let d = p - center;
                // Clockwise from 12 o'clock with y pointing down.
                let deg = d.x.atan2(-d.y).to_degrees();
                deg.rem_euclid(360.0) / 360.0
            }
            Shape::Linear { from, dir, len_sq } => {
                if len_sq <= 0.0 {
                    0.0
                } else {
                    ((p.x - from.x) * dir.0 + (p.y - from.y) * dir.1) / len_sq
                }
            }
        };
        self.at(t)
    }

    fn at(&self, t: f64) -> PremulRgba8 {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return self.solid;
        };
        if self.stops.len() == 1 || t <= first.offset {
            return encode(first.rgba, self.space);
        }
        if t >= last.offset {
            return encode(last.rgba, self.space);
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let u = if span > 0.0 {
                    (t - a.offset) / span
                } else {
                    1.0
                };
                let mut rgba = [0.0; 4];
                for (i, c) in rgba.iter_mut().enumerate() {
                    *c = lerp(a.rgba[i], b.rgba[i], u);
                }
                return encode(rgba, self.space);
            }
        }
        encode(last.rgba, self.space)
    }
}

fn premul_in_space(c: Rgba8, space: ColorSpace) -> [f64; 4] {
    let a = f64::from(c.a) / 255.0;
    let ch = |v: u8| {
        let v = f64::from(v) / 255.0;
        match space {
            ColorSpace::Srgb => v,
            ColorSpace::LinearSrgb => srgb_to_linear(v),
        }
    };
    [ch(c.r) * a, ch(c.g) * a, ch(c.b) * a, a]
}

/// Premultiplied floats in `space` back to premultiplied sRGB bytes.
fn encode(rgba: [f64; 4], space: ColorSpace) -> PremulRgba8 {
    let a = rgba[3].clamp(0.0, 1.0);
    if a <= 0.0 {
        return [0; 4];
    }
    let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let ch = |v: f64| match space {
        ColorSpace::Srgb => to_byte(v.min(a)),
        ColorSpace::LinearSrgb => to_byte(linear_to_srgb((v / a).clamp(0.0, 1.0)) * a),
    };
    [ch(rgba[0]), ch(rgba[1]), ch(rgba[2]), to_byte(a)]
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
