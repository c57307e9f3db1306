use rayon::prelude::*;

use crate::foundation::error::{KnobError, KnobResult};
use crate::model::export::RenderTarget;
use crate::model::knob::KnobSpec;
use crate::render::buffer::RasterBuffer;
use crate::render::cpu::render_frame;
use crate::sequence::cancel::CancelToken;
use crate::sequence::frames::FrameSequence;

/// Worker pool controls for sweep rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Render frames on a worker pool when `true`, on the calling thread otherwise.
    pub parallel: bool,
    /// Worker count; `None` uses one per core.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl RenderThreading {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }

    /// Pool matching these settings, or `None` for sequential rendering.
    pub fn build_pool(&self) -> KnobResult<Option<rayon::ThreadPool>> {
        if !self.parallel {
            return Ok(None);
        }
        build_thread_pool(self.threads).map(Some)
    }
}

/// Outcome of rendering a whole sweep.
#[derive(Debug)]
pub enum Sweep {
    /// Every frame, in index order.
    Complete(Vec<RasterBuffer>),
    Cancelled,
}

pub fn build_thread_pool(threads: Option<usize>) -> KnobResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(KnobError::validation("threads", "must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| KnobError::render(format!("failed to build rayon thread pool: {e}")))
}

/// Render every frame of `spec` at `target`.
///
/// Frames run on `pool` when given. Results are collected in index order regardless of
/// completion order. `cancel` is checked before each frame starts; frames already running
/// finish and the sweep reports [`Sweep::Cancelled`]. `on_frame` is called with each finished
/// frame index, possibly from worker threads.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(frames = spec.frame_count(), size = target.width)
)]
pub fn render_sweep(
    spec: &KnobSpec,
    target: &RenderTarget,
    pool: Option<&rayon::ThreadPool>,
    cancel: &CancelToken,
    on_frame: &(dyn Fn(u32) + Sync),
) -> KnobResult<Sweep> {
    let seq = FrameSequence::new(spec);
    let render_one = |index: u32| -> KnobResult<Option<RasterBuffer>> {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let buf = render_frame(spec, seq.angle_at(index), target)?;
        on_frame(index);
        Ok(Some(buf))
    };

    let results: Vec<KnobResult<Option<RasterBuffer>>> = match pool {
        Some(pool) => pool.install(|| (0..seq.len()).into_par_iter().map(render_one).collect()),
        None => (0..seq.len()).map(render_one).collect(),
    };

    let mut out = Vec::with_capacity(results.len());
    let mut skipped = false;
    for item in results {
        match item? {
            Some(buf) => out.push(buf),
            None => skipped = true,
        }
    }
    if skipped {
        tracing::debug!(rendered = out.len(), "sweep cancelled");
        return Ok(Sweep::Cancelled);
    }
    Ok(Sweep::Complete(out))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sweep.rs"]
mod tests;
