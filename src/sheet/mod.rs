//! Sprite-sheet composition and output naming.

pub mod compose;
pub mod naming;
