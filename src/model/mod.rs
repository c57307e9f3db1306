//! Parameter model: raw caller input and its validated, immutable forms.

pub mod color;
pub mod export;
pub mod knob;
