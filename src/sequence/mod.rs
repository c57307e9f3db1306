//! Frame sequencing across a rotation sweep, and parallel sweep rendering.

/// Cooperative cancellation shared between a caller and running work.
pub mod cancel;
/// Frame index to angle mapping.
pub mod frames;
/// Rendering every frame of a sweep, optionally on a worker pool.
pub mod sweep;
