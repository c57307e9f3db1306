use std::cell::Cell;

use super::*;
use crate::foundation::core::Rgba8;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_writer").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn quick(attempts: u32) -> RetryPolicy {
    RetryPolicy {
        attempts,
        base_delay: Duration::from_millis(1),
    }
}

#[test]
fn transient_errors_are_retried_until_success() {
    let calls = Cell::new(0);
    let out = with_retry(&quick(3), Path::new("x.png"), || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 {
            Err(io::Error::from(io::ErrorKind::Interrupted))
        } else {
            Ok(7)
        }
    })
    .unwrap();
    assert_eq!(out, 7);
    assert_eq!(calls.get(), 3);
}

#[test]
fn retries_are_bounded() {
    let calls = Cell::new(0);
    let err = with_retry(&quick(2), Path::new("x.png"), || -> io::Result<()> {
        calls.set(calls.get() + 1);
        Err(io::Error::from(io::ErrorKind::TimedOut))
    })
    .unwrap_err();
    assert_eq!(calls.get(), 2);
    assert!(matches!(err, KnobError::Io { .. }));
}

#[test]
fn permanent_errors_fail_immediately() {
    let calls = Cell::new(0);
    let err = with_retry(&quick(5), Path::new("x.png"), || -> io::Result<()> {
        calls.set(calls.get() + 1);
        Err(io::Error::from(io::ErrorKind::NotFound))
    })
    .unwrap_err();
    assert_eq!(calls.get(), 1);
    assert_eq!(err.kind(), crate::foundation::error::ErrorKind::Io);
}

#[test]
fn backoff_doubles() {
    let p = RetryPolicy {
        attempts: 4,
        base_delay: Duration::from_millis(10),
    };
    assert_eq!(p.delay_before(0), Duration::from_millis(10));
    assert_eq!(p.delay_before(2), Duration::from_millis(40));
}

#[test]
fn png_round_trips_straight_alpha() {
    let dir = scratch("png");
    let path = dir.join("px.png");
    let color = Rgba8::new(200, 100, 50, 255);
    let buf = RasterBuffer::new_filled(3, 2, color.to_premul()).unwrap();
    write_png(&path, &buf, &RetryPolicy::default()).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [200, 100, 50, 255]);

    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = scratch("missing");
    let path = dir.join("nope").join("out.png");
    let err = write_atomic(&path, b"data", &quick(2)).unwrap_err();
    assert!(matches!(err, KnobError::Io { .. }));
}
