//! CPU rasterizer: primitives to premultiplied RGBA8 buffers.

pub mod buffer;
pub mod composite;
pub mod cpu;
pub(crate) mod paint;
