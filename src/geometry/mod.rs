//! Geometry builder: knob spec + rotation angle to resolution-independent primitives.

pub mod builder;
pub mod fingerprint;
pub mod primitive;
pub(crate) mod profile;
