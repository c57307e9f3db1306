use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::export::manifest::Manifest;
use crate::export::report::{ExportReport, SizeOutcome, SizeReport};
use crate::export::writer::{RetryPolicy, write_atomic, write_png};
use crate::foundation::error::{KnobError, KnobResult};
use crate::model::export::{ExportConfig, ExportConfigDef, RenderTarget};
use crate::model::knob::{KnobParams, KnobSpec};
use crate::sequence::cancel::CancelToken;
use crate::sequence::sweep::{RenderThreading, Sweep, render_sweep};
use crate::sheet::compose::arrange;

/// Execution controls for [`export`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub threading: RenderThreading,
    /// Render sizes concurrently on the frame pool. Ignored without a pool.
    pub parallel_sizes: bool,
    pub retry: RetryPolicy,
}

/// Progress notifications. May arrive from worker threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportEvent {
    SizeStarted { size: u32, frames: u32 },
    FrameRendered { size: u32, index: u32 },
    FileWritten { size: u32, path: PathBuf },
    SizeFinished { size: u32, outcome: SizeOutcome },
}

/// Export every configured size of `spec`.
///
/// See [`export_with_progress`].
pub fn export(
    spec: &KnobSpec,
    config: &ExportConfig,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> KnobResult<ExportReport> {
    export_with_progress(spec, config, options, cancel, &|_| {})
}

/// Validate raw inputs, then export. Invalid input returns before any file is created.
pub fn export_params(
    params: &KnobParams,
    config: &ExportConfigDef,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> KnobResult<ExportReport> {
    let spec = KnobSpec::from_params(params)?;
    let config = ExportConfig::from_def(config)?;
    export(&spec, &config, options, cancel)
}

/// Export every configured size of `spec`, reporting progress through `on_event`.
///
/// The output directory is created and probed first; if that fails the whole run fails with a
/// validation error on `output_dir` and nothing is rendered. After that, each size either
/// succeeds, fails, or is skipped as cancelled on its own: one size failing never stops the
/// others. The returned report lists sizes in configured order.
#[tracing::instrument(
    skip_all,
    fields(sizes = ?config.sizes(), out = %config.output_dir().display())
)]
pub fn export_with_progress(
    spec: &KnobSpec,
    config: &ExportConfig,
    options: &ExportOptions,
    cancel: &CancelToken,
    on_event: &(dyn Fn(&ExportEvent) + Sync),
) -> KnobResult<ExportReport> {
    let pool = options.threading.build_pool()?;
    preflight(config.output_dir())?;
    let targets: Vec<RenderTarget> = config.targets().collect();

    let job = SizeJob {
        spec,
        config,
        retry: options.retry,
        pool: pool.as_ref(),
        cancel,
        on_event,
    };

    let sizes: Vec<SizeReport> = match pool.as_ref() {
        Some(pool) if options.parallel_sizes => {
            pool.install(|| targets.par_iter().map(|t| job.run(t)).collect())
        }
        _ => targets.iter().map(|t| job.run(t)).collect(),
    };

    let report = ExportReport::from_sizes(sizes);
    tracing::debug!(status = ?report.status, "export finished");
    Ok(report)
}

/// Create `dir` if needed and check that files can be written into it.
pub fn preflight(dir: &Path) -> KnobResult<()> {
    let unusable = |e: std::io::Error| {
        KnobError::validation(
            "output_dir",
            format!("'{}' is not writable: {e}", dir.display()),
        )
    };
    std::fs::create_dir_all(dir).map_err(unusable)?;
    let probe = dir.join(format!(".knobgen-probe-{}", std::process::id()));
    std::fs::write(&probe, b"").map_err(unusable)?;
    let _ = std::fs::remove_file(&probe);
    Ok(())
}

struct SizeJob<'a> {
    spec: &'a KnobSpec,
    config: &'a ExportConfig,
    retry: RetryPolicy,
    pool: Option<&'a rayon::ThreadPool>,
    cancel: &'a CancelToken,
    on_event: &'a (dyn Fn(&ExportEvent) + Sync),
}

impl SizeJob<'_> {
    #[tracing::instrument(level = "debug", skip_all, fields(size = target.width))]
    fn run(&self, target: &RenderTarget) -> SizeReport {
        let size = target.width;
        let outcome = if self.cancel.is_cancelled() {
            SizeOutcome::Cancelled
        } else {
            (self.on_event)(&ExportEvent::SizeStarted {
                size,
                frames: self.spec.frame_count(),
            });
            let started = Instant::now();
            match self.render_and_write(target) {
                Ok(Some(paths)) => {
                    tracing::debug!(
                        files = paths.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "size done"
                    );
                    SizeOutcome::Success { paths }
                }
                Ok(None) => SizeOutcome::Cancelled,
                Err(e) => {
                    tracing::warn!(error = %e, "size failed");
                    SizeOutcome::failed(&e)
                }
            }
        };
        (self.on_event)(&ExportEvent::SizeFinished {
            size,
            outcome: outcome.clone(),
        });
        SizeReport { size, outcome }
    }

    /// Written paths, or `None` when cancelled before all frames rendered.
    fn render_and_write(&self, target: &RenderTarget) -> KnobResult<Option<Vec<PathBuf>>> {
        let size = target.width;
        let on_frame = |index: u32| {
            (self.on_event)(&ExportEvent::FrameRendered { size, index });
        };
        let frames = match render_sweep(self.spec, target, self.pool, self.cancel, &on_frame)? {
            Sweep::Complete(frames) => frames,
            Sweep::Cancelled => return Ok(None),
        };

        let config = self.config;
        let outputs = arrange(
            frames,
            config.layout(),
            config.background(),
            config.naming(),
            config.base_name(),
            size,
        )?;

        let mut written = WrittenFiles::default();
        for out in &outputs {
            let path = config.output_dir().join(&out.file_name);
            write_png(&path, &out.buffer, &self.retry)?;
            written.push(path.clone());
            tracing::info!(path = %path.display(), "wrote");
            (self.on_event)(&ExportEvent::FileWritten { size, path });
        }

        if config.manifest() {
            let manifest = Manifest::build(
                self.spec,
                config.layout(),
                config.naming(),
                config.base_name(),
                size,
            );
            let path = config
                .output_dir()
                .join(config.naming().manifest_file_name(config.base_name(), size));
            let bytes = manifest
                .to_json_bytes()
                .map_err(|e| KnobError::encode(format!("manifest: {e}")))?;
            write_atomic(&path, &bytes, &self.retry)?;
            written.push(path.clone());
            tracing::info!(path = %path.display(), "wrote");
            (self.on_event)(&ExportEvent::FileWritten { size, path });
        }

        Ok(Some(written.commit()))
    }
}

/// Files written for one size, removed on drop unless committed.
#[derive(Default)]
struct WrittenFiles {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl WrittenFiles {
    fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.paths)
    }
}

impl Drop for WrittenFiles {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.paths {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not remove partial output"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
