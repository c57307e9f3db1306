use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::error::{KnobError, KnobResult};
use crate::render::buffer::RasterBuffer;

/// Bounded retry for transient filesystem errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries per write, including the first. Zero behaves like one.
    pub attempts: u32,
    /// Delay before the first retry; doubled for every further retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(20),
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_before(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }
}

/// Errors worth retrying: the same write may succeed a moment later.
pub fn is_transient(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::ResourceBusy
    )
}

/// Run `op` until it succeeds, fails permanently, or `policy` runs out of attempts.
pub fn with_retry<T>(
    policy: &RetryPolicy,
    path: &Path,
    mut op: impl FnMut() -> io::Result<T>,
) -> KnobResult<T> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts && is_transient(e.kind()) => {
                let delay = policy.delay_before(attempt - 1);
                tracing::warn!(
                    path = %path.display(),
                    attempt,
                    error = %e,
                    ?delay,
                    "write failed, retrying"
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(KnobError::io(path, e)),
        }
    }
}

/// Encode `buffer` as an RGBA8 PNG (straight alpha) in memory.
pub fn encode_png(buffer: &RasterBuffer) -> KnobResult<Vec<u8>> {
    let rgba = buffer.to_straight_rgba8();
    let mut bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut bytes),
        &rgba,
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| KnobError::encode(format!("png {}x{}: {e}", buffer.width(), buffer.height())))?;
    Ok(bytes)
}

/// Write `bytes` to `path` through a temporary sibling, so readers never see a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8], policy: &RetryPolicy) -> KnobResult<()> {
    let tmp = TempFileGuard(Some(temp_sibling(path)));
    let tmp_path = tmp.path();
    with_retry(policy, path, || {
        std::fs::write(tmp_path, bytes)?;
        std::fs::rename(tmp_path, path)
    })?;
    tmp.disarm();
    Ok(())
}

/// Encode and write one PNG.
pub fn write_png(path: &Path, buffer: &RasterBuffer, policy: &RetryPolicy) -> KnobResult<()> {
    let bytes = encode_png(buffer)?;
    write_atomic(path, &bytes, policy)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Removes a leftover temporary file unless disarmed.
struct TempFileGuard(Option<PathBuf>);

impl TempFileGuard {
    fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or(Path::new(""))
    }

    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/writer.rs"]
mod tests;
