use super::*;
use crate::model::knob::KnobParams;

fn spec(frame_count: u32, neutral: Option<f64>) -> KnobSpec {
    KnobSpec::from_params(&KnobParams {
        frame_count,
        neutral_angle: neutral,
        ..KnobParams::default()
    })
    .unwrap()
}

#[test]
fn endpoints_are_exact() {
    for n in [2, 3, 7, 64, 101] {
        let s = spec(n, None);
        let seq = FrameSequence::new(&s);
        assert_eq!(seq.len(), n);
        assert_eq!(seq.angle_at(0), -135.0);
        assert_eq!(seq.angle_at(n - 1), 135.0);
    }
}

#[test]
fn angles_increase_strictly() {
    let s = spec(64, None);
    let angles: Vec<f64> = FrameSequence::new(&s).iter().collect();
    assert_eq!(angles.len(), 64);
    assert!(angles.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn midpoint_of_odd_sweep_is_center() {
    let s = spec(5, None);
    assert!((FrameSequence::new(&s).angle_at(2) - 0.0).abs() < 1e-12);
}

#[test]
fn single_frame_uses_neutral_or_start() {
    let plain = spec(1, None);
    let seq = FrameSequence::new(&plain);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.angle_at(0), -135.0);

    let centered = spec(1, Some(0.0));
    assert_eq!(FrameSequence::new(&centered).angle_at(0), 0.0);
}

#[test]
fn iteration_restarts_and_frames_share_spec() {
    let s = spec(4, None);
    let seq = FrameSequence::new(&s);
    let a: Vec<f64> = seq.iter().collect();
    let b: Vec<f64> = seq.iter().collect();
    assert_eq!(a, b);

    let frames: Vec<Frame<'_>> = seq.frames().collect();
    assert_eq!(frames.len(), 4);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index as usize, i);
        assert_eq!(f.angle, a[i]);
        assert!(std::ptr::eq(f.spec, &s));
    }
}
