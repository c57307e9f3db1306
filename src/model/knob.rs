use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{KnobError, KnobResult};

/// Padding around the knob (fraction of the radius) so edge anti-aliasing never clips.
pub const EDGE_PAD: f64 = 0.02;

/// How the knob position is marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStyle {
    /// Radial bar from near the center toward the rim.
    Line,
    /// Small disc near the rim.
    Dot,
    /// Annular arc filled from the sweep start to the current angle.
    #[serde(alias = "arc-fill")]
    ArcFill,
}

/// Base fill gradient geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Offset 0 at the center, 1 at the radius.
    Radial,
    /// Offset 0 at 12 o'clock, increasing clockwise to 1 after a full turn.
    Angular,
}

/// Outline of the knob body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyStyle {
    Round,
    /// Round knob with shallow grip knurling.
    Ridged { ridges: u32 },
    /// Cosine-lobed outline; `depth` in `(0, 1]` scales how deep the valleys cut in.
    Lobed {
        lobes: u32,
        #[serde(default = "default_lobe_depth")]
        depth: f64,
    },
}

fn default_lobe_depth() -> f64 {
    0.3
}

/// One gradient point: `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba8,
}

impl ColorStop {
    pub fn new(offset: f64, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// Color space gradient stops are interpolated in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    #[default]
    Srgb,
    LinearSrgb,
}

/// Drop shadow look. Offsets and spread are fractions of the radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowPolicy {
    pub offset_x: f64,
    pub offset_y: f64,
    pub spread: f64,
    pub opacity: f64,
    pub color: Rgba8,
}

impl Default for ShadowPolicy {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.06,
            spread: 0.06,
            opacity: 0.45,
            color: Rgba8::BLACK,
        }
    }
}

/// Bevel ring look. `width` is a fraction of the radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BevelPolicy {
    pub width: f64,
    pub highlight: Rgba8,
    pub shade: Rgba8,
}

impl Default for BevelPolicy {
    fn default() -> Self {
        Self {
            width: 0.08,
            highlight: Rgba8::new(255, 255, 255, 128),
            shade: Rgba8::new(0, 0, 0, 102),
        }
    }
}

/// Visual policy points with documented defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderPolicy {
    pub color_space: ColorSpace,
    pub shadow: ShadowPolicy,
    pub bevel: BevelPolicy,
}

/// Raw, unvalidated knob parameter set as supplied by a caller.
///
/// Every key has a default, so partial JSON documents are accepted. Convert with
/// [`KnobSpec::from_params`] before rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnobParams {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Angle used for single-frame output; `start_angle` when unset.
    pub neutral_angle: Option<f64>,
    pub indicator: IndicatorStyle,
    pub indicator_color: Rgba8,
    pub stroke_width: f64,
    pub fill_stops: Vec<ColorStop>,
    pub gradient: GradientKind,
    pub shadow: bool,
    pub bevel: bool,
    pub frame_count: u32,
    pub body: BodyStyle,
    /// Outline resolution for ridged and lobed bodies.
    pub segments: u32,
    pub policy: RenderPolicy,
}

impl Default for KnobParams {
    fn default() -> Self {
        Self {
            radius: 50.0,
            start_angle: -135.0,
            end_angle: 135.0,
            neutral_angle: None,
            indicator: IndicatorStyle::Line,
            indicator_color: Rgba8::opaque(0xf9, 0x73, 0x16),
            stroke_width: 4.0,
            fill_stops: vec![
                ColorStop::new(0.0, Rgba8::opaque(0xcb, 0xd5, 0xe1)),
                ColorStop::new(1.0, Rgba8::opaque(0x1e, 0x29, 0x3b)),
            ],
            gradient: GradientKind::Radial,
            shadow: true,
            bevel: true,
            frame_count: 1,
            body: BodyStyle::Round,
            segments: 256,
            policy: RenderPolicy::default(),
        }
    }
}

/// Validated, immutable description of one knob design.
///
/// Shared by reference across every frame of a render run.
#[derive(Clone, Debug, PartialEq)]
pub struct KnobSpec {
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    neutral_angle: Option<f64>,
    indicator: IndicatorStyle,
    indicator_color: Rgba8,
    stroke_width: f64,
    fill_stops: Vec<ColorStop>,
    gradient: GradientKind,
    shadow: bool,
    bevel: bool,
    frame_count: u32,
    body: BodyStyle,
    segments: u32,
    policy: RenderPolicy,
}

impl KnobSpec {
    /// Validate a raw parameter set.
    ///
    /// Fails with [`KnobError::Validation`] naming the first offending field.
    pub fn from_params(p: &KnobParams) -> KnobResult<Self> {
        ensure(
            p.radius.is_finite() && p.radius > 0.0,
            "radius",
            "must be a finite number > 0",
        )?;
        ensure_angle(p.start_angle, "start_angle")?;
        ensure_angle(p.end_angle, "end_angle")?;
        ensure(
            p.start_angle < p.end_angle,
            "end_angle",
            "must be greater than start_angle",
        )?;
        ensure(
            p.end_angle - p.start_angle <= 360.0,
            "end_angle",
            "sweep span must be <= 360 degrees",
        )?;
        if let Some(a) = p.neutral_angle {
            ensure_angle(a, "neutral_angle")?;
        }

        ensure(
            p.stroke_width.is_finite() && p.stroke_width >= 0.0,
            "stroke_width",
            "must be a finite number >= 0",
        )?;
        ensure(
            p.stroke_width < p.radius,
            "stroke_width",
            "must be smaller than radius",
        )?;

        validate_stops(&p.fill_stops)?;

        ensure(p.frame_count >= 1, "frame_count", "must be >= 1")?;

        match p.body {
            BodyStyle::Round => {}
            BodyStyle::Ridged { ridges } => {
                ensure(
                    (3..=256).contains(&ridges),
                    "body.ridges",
                    "must be in 3..=256",
                )?;
            }
            BodyStyle::Lobed { lobes, depth } => {
                ensure((3..=32).contains(&lobes), "body.lobes", "must be in 3..=32")?;
                ensure(
                    depth.is_finite() && depth > 0.0 && depth <= 1.0,
                    "body.depth",
                    "must be in (0, 1]",
                )?;
            }
        }
        ensure(
            (16..=4096).contains(&p.segments),
            "segments",
            "must be in 16..=4096",
        )?;

        validate_policy(&p.policy)?;

        Ok(Self {
            radius: p.radius,
            start_angle: p.start_angle,
            end_angle: p.end_angle,
            neutral_angle: p.neutral_angle,
            indicator: p.indicator,
            indicator_color: p.indicator_color,
            stroke_width: p.stroke_width,
            fill_stops: p.fill_stops.clone(),
            gradient: p.gradient,
            shadow: p.shadow,
            bevel: p.bevel,
            frame_count: p.frame_count,
            body: p.body,
            segments: p.segments,
            policy: p.policy,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn neutral_angle(&self) -> Option<f64> {
        self.neutral_angle
    }

    pub fn indicator(&self) -> IndicatorStyle {
        self.indicator
    }

    pub fn indicator_color(&self) -> Rgba8 {
        self.indicator_color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn fill_stops(&self) -> &[ColorStop] {
        &self.fill_stops
    }

    pub fn gradient(&self) -> GradientKind {
        self.gradient
    }

    pub fn shadow(&self) -> bool {
        self.shadow
    }

    pub fn bevel(&self) -> bool {
        self.bevel
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// `true` when the spec describes a rotation sweep rather than a static image.
    pub fn is_animated(&self) -> bool {
        self.frame_count > 1
    }

    pub fn body(&self) -> BodyStyle {
        self.body
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn policy(&self) -> &RenderPolicy {
        &self.policy
    }

    /// Side length, in design units, of the square canvas that holds the knob.
    ///
    /// Covers the diameter plus room for the drop shadow and edge anti-aliasing. Rasterizing
    /// maps this extent onto the target's pixel size.
    pub fn nominal_extent(&self) -> f64 {
        let mut pad = EDGE_PAD;
        if self.shadow {
            let s = &self.policy.shadow;
            pad += s.offset_x.hypot(s.offset_y) + s.spread;
        }
        2.0 * self.radius * (1.0 + pad)
    }
}

impl TryFrom<&KnobParams> for KnobSpec {
    type Error = KnobError;

    fn try_from(p: &KnobParams) -> KnobResult<Self> {
        Self::from_params(p)
    }
}

fn ensure(cond: bool, field: &str, message: &str) -> KnobResult<()> {
    if cond {
        Ok(())
    } else {
        Err(KnobError::validation(field, message))
    }
}

fn ensure_angle(a: f64, field: &str) -> KnobResult<()> {
    ensure(
        a.is_finite() && (-360.0..=360.0).contains(&a),
        field,
        "must be a finite angle within [-360, 360] degrees",
    )
}

fn validate_stops(stops: &[ColorStop]) -> KnobResult<()> {
    ensure(
        !stops.is_empty(),
        "fill_stops",
        "at least one color stop is required",
    )?;
    for (i, stop) in stops.iter().enumerate() {
        if !(stop.offset.is_finite() && (0.0..=1.0).contains(&stop.offset)) {
            return Err(KnobError::validation(
                format!("fill_stops[{i}].offset"),
                "must be within [0, 1]",
            ));
        }
        if i > 0 && stop.offset <= stops[i - 1].offset {
            return Err(KnobError::validation(
                format!("fill_stops[{i}].offset"),
                "offsets must be strictly increasing",
            ));
        }
    }
    Ok(())
}

fn validate_policy(p: &RenderPolicy) -> KnobResult<()> {
    let s = &p.shadow;
    ensure(
        s.offset_x.is_finite() && s.offset_x.abs() <= 1.0,
        "policy.shadow.offset_x",
        "must be within [-1, 1]",
    )?;
    ensure(
        s.offset_y.is_finite() && s.offset_y.abs() <= 1.0,
        "policy.shadow.offset_y",
        "must be within [-1, 1]",
    )?;
    ensure(
        s.spread.is_finite() && (0.0..=1.0).contains(&s.spread),
        "policy.shadow.spread",
        "must be within [0, 1]",
    )?;
    ensure(
        s.opacity.is_finite() && (0.0..=1.0).contains(&s.opacity),
        "policy.shadow.opacity",
        "must be within [0, 1]",
    )?;
    let b = &p.bevel;
    ensure(
        b.width.is_finite() && b.width > 0.0 && b.width < 0.5,
        "policy.bevel.width",
        "must be within (0, 0.5)",
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/knob.rs"]
mod tests;
