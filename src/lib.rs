//! knobgen procedurally renders rotary-knob image assets for audio plugins and controller skins.
//!
//! A declarative [`KnobParams`] set is validated into an immutable [`KnobSpec`], turned into
//! vector primitives for any rotation angle, rasterized on the CPU, and exported as PNG sprite
//! sheets or frame sequences at several pixel sizes:
//!
//! - Validate parameters with [`KnobSpec::from_params`] and [`ExportConfig::from_def`]
//! - Render one image with [`render_frame`], or a whole sweep with [`render_sweep`]
//! - Write every configured size with [`export`] / [`export_with_progress`]
//!
//! Angles are degrees, 0 at 12 o'clock, positive clockwise.
#![forbid(unsafe_code)]

mod foundation;

pub mod export;
pub mod geometry;
pub mod model;
pub mod render;
pub mod sequence;
pub mod sheet;

pub use crate::foundation::core::{Affine, BezPath, Point, Rgba8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ErrorKind, KnobError, KnobResult};

pub use crate::export::manifest::{CellRect, Manifest, ManifestFrame, SheetInfo};
pub use crate::export::pipeline::{
    ExportEvent, ExportOptions, export, export_params, export_with_progress, preflight,
};
pub use crate::export::report::{ExportReport, RunStatus, SizeOutcome, SizeReport};
pub use crate::export::writer::{RetryPolicy, encode_png, write_png};
pub use crate::geometry::builder::build_primitives;
pub use crate::geometry::fingerprint::fingerprint;
pub use crate::geometry::primitive::{Paint, Primitive, PrimitiveKind};
pub use crate::model::export::{Background, ExportConfig, ExportConfigDef, Layout, RenderTarget};
pub use crate::model::knob::{
    BevelPolicy, BodyStyle, ColorSpace, ColorStop, GradientKind, IndicatorStyle, KnobParams,
    KnobSpec, RenderPolicy, ShadowPolicy,
};
pub use crate::render::buffer::RasterBuffer;
pub use crate::render::cpu::{rasterize, render_frame};
pub use crate::sequence::cancel::CancelToken;
pub use crate::sequence::frames::{Frame, FrameSequence};
pub use crate::sequence::sweep::{RenderThreading, Sweep, build_thread_pool, render_sweep};
pub use crate::sheet::compose::{OutputImage, arrange, cell_origin, compose_sheet};
pub use crate::sheet::naming::NamingPattern;
