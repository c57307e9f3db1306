use std::sync::Mutex;

use super::*;
use crate::model::export::Background;
use crate::model::knob::KnobParams;

fn spec(frame_count: u32) -> KnobSpec {
    KnobSpec::from_params(&KnobParams {
        frame_count,
        ..KnobParams::default()
    })
    .unwrap()
}

fn target() -> RenderTarget {
    RenderTarget::square(32, Background::Transparent)
}

fn complete(sweep: Sweep) -> Vec<RasterBuffer> {
    match sweep {
        Sweep::Complete(frames) => frames,
        Sweep::Cancelled => panic!("sweep cancelled"),
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = build_thread_pool(Some(0)).unwrap_err();
    assert_eq!(err.field(), Some("threads"));
    assert!(build_thread_pool(Some(2)).is_ok());
}

#[test]
fn parallel_matches_sequential_in_order() {
    let s = spec(6);
    let pool = build_thread_pool(Some(3)).unwrap();
    let cancel = CancelToken::new();

    let seq = complete(render_sweep(&s, &target(), None, &cancel, &|_| {}).unwrap());
    let par = complete(render_sweep(&s, &target(), Some(&pool), &cancel, &|_| {}).unwrap());
    assert_eq!(seq.len(), 6);
    assert_eq!(seq, par);
    assert_ne!(seq[0], seq[5]);
}

#[test]
fn progress_reports_every_frame() {
    let s = spec(5);
    let seen = Mutex::new(Vec::new());
    let pool = build_thread_pool(Some(2)).unwrap();
    render_sweep(&s, &target(), Some(&pool), &CancelToken::new(), &|i| {
        seen.lock().unwrap().push(i);
    })
    .unwrap();
    let mut seen = seen.into_inner().unwrap();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
}

#[test]
fn cancelled_token_stops_new_frames() {
    let s = spec(4);
    let cancel = CancelToken::new();
    cancel.cancel();
    let out = render_sweep(&s, &target(), None, &cancel, &|_| unreachable!()).unwrap();
    assert!(matches!(out, Sweep::Cancelled));
}

#[test]
fn cancel_mid_sweep_reports_cancelled() {
    let s = spec(6);
    let cancel = CancelToken::new();
    let out = render_sweep(&s, &target(), None, &cancel, &|i| {
        if i == 1 {
            cancel.cancel();
        }
    })
    .unwrap();
    assert!(matches!(out, Sweep::Cancelled));
}

#[test]
fn threading_defaults_to_parallel() {
    assert!(RenderThreading::default().parallel);
    assert!(RenderThreading::sequential().build_pool().unwrap().is_none());
}
