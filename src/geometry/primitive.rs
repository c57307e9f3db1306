use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::model::knob::ColorStop;

/// How a primitive's interior is colored. Coordinates are design units.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8),
    /// Offset 0 at `center`, 1 at `radius` and beyond.
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<ColorStop>,
    },
    /// Offset 0 at 12 o'clock around `center`, growing clockwise.
    Angular {
        center: Point,
        stops: Vec<ColorStop>,
    },
    /// Offset 0 at `from`, 1 at `to`, projected along the segment.
    Linear {
        from: Point,
        to: Point,
        stops: Vec<ColorStop>,
    },
}

/// Role of a primitive in the knob's layer stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Shadow,
    Body,
    Bevel,
    IndicatorTrack,
    Indicator,
}

impl PrimitiveKind {
    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::Shadow => 0,
            Self::Body => 1,
            Self::Bevel => 2,
            Self::IndicatorTrack => 3,
            Self::Indicator => 4,
        }
    }
}

/// A filled outline in knob-centered design units (y down).
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub path: BezPath,
    pub paint: Paint,
}
