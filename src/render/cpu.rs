use kurbo::{PathEl, Shape as _};

use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{KnobError, KnobResult};
use crate::geometry::builder::build_primitives;
use crate::geometry::primitive::Primitive;
use crate::model::export::RenderTarget;
use crate::model::knob::{KnobSpec, RenderPolicy};
use crate::render::buffer::RasterBuffer;
use crate::render::composite::over;
use crate::render::paint::PaintSampler;

/// Build and rasterize `spec` at `angle_deg` into a fresh buffer.
pub fn render_frame(
    spec: &KnobSpec,
    angle_deg: f64,
    target: &RenderTarget,
) -> KnobResult<RasterBuffer> {
    let primitives = build_primitives(spec, angle_deg);
    rasterize(&primitives, target, spec.nominal_extent(), spec.policy())
}

/// Rasterize `primitives` in draw order onto the target background.
///
/// The design square of side `extent` is scaled uniformly to fit the smaller pixel dimension and
/// centered, so proportions do not depend on the output size. Edge coverage comes from
/// `vello_cpu`; paints are sampled at pixel centers in design space.
pub fn rasterize(
    primitives: &[Primitive],
    target: &RenderTarget,
    extent: f64,
    policy: &RenderPolicy,
) -> KnobResult<RasterBuffer> {
    let (w, h) = surface_dims(target)?;
    if !(extent.is_finite() && extent > 0.0) {
        return Err(KnobError::render(format!(
            "design extent must be positive and finite, got {extent}"
        )));
    }

    let mut out = RasterBuffer::new_filled(
        target.width,
        target.height,
        target.background.color().to_premul(),
    )?;
    let to_pixels = design_to_pixels(target, extent);
    let to_design = to_pixels.inverse();
    let mut mask = MaskSurface::new(w, h);

    for prim in primitives {
        let bbox = to_pixels.transform_rect_bbox(prim.path.bounding_box());
        let Some(rows_cols) = pixel_span(bbox, target) else {
            continue;
        };
        mask.fill(&prim.path, to_pixels);
        let sampler = PaintSampler::new(&prim.paint, policy.color_space);
        composite_masked(&mut out, &mask, &sampler, to_design, rows_cols);
    }
    Ok(out)
}

/// Transform from design units (knob centered at the origin) to pixel space.
pub fn design_to_pixels(target: &RenderTarget, extent: f64) -> Affine {
    let w = f64::from(target.width);
    let h = f64::from(target.height);
    let s = w.min(h) / extent;
    Affine::translate((w / 2.0, h / 2.0)) * Affine::scale(s)
}

fn surface_dims(target: &RenderTarget) -> KnobResult<(u16, u16)> {
    let dim = |v: u32, name: &str| -> KnobResult<u16> {
        if v == 0 {
            return Err(KnobError::render(format!("target {name} must be > 0")));
        }
        u16::try_from(v)
            .map_err(|_| KnobError::render(format!("target {name} {v} exceeds {}", u16::MAX)))
    };
    Ok((dim(target.width, "width")?, dim(target.height, "height")?))
}

/// Pixel rectangle `(x0, y0, x1, y1)` (exclusive end) touched by `bbox`, clipped to the target.
fn pixel_span(bbox: kurbo::Rect, target: &RenderTarget) -> Option<(u32, u32, u32, u32)> {
    if !bbox.is_finite() {
        return None;
    }
    let clamp = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
    let x0 = clamp(bbox.x0.floor() - 1.0, target.width);
    let y0 = clamp(bbox.y0.floor() - 1.0, target.height);
    let x1 = clamp(bbox.x1.ceil() + 1.0, target.width);
    let y1 = clamp(bbox.y1.ceil() + 1.0, target.height);
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn composite_masked(
    out: &mut RasterBuffer,
    mask: &MaskSurface,
    sampler: &PaintSampler,
    to_design: Affine,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
) {
    let width = out.width() as usize;
    let data = out.data_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let idx = ((y as usize) * width + (x as usize)) * 4;
            let coverage = mask.coverage_at(idx);
            if coverage == 0 {
                continue;
            }
            let p = to_design * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let src = sampler.sample(p);
            let dst = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
            data[idx..idx + 4].copy_from_slice(&over(dst, src, coverage));
        }
    }
}

/// Scratch pixmap holding one path's anti-aliased coverage in its alpha channel.
struct MaskSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl MaskSurface {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    fn fill(&mut self, path: &BezPath, transform: Affine) {
        clear_pixmap(&mut self.pixmap);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    fn coverage_at(&self, byte_index: usize) -> u8 {
        self.pixmap
            .data_as_u8_slice()
            .get(byte_index + 3)
            .copied()
            .unwrap_or(0)
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
