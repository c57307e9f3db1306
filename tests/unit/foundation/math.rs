use super::*;

#[test]
fn fnv_is_stable_and_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"knob");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"knob");
    assert_eq!(a.finish(), b.finish());

    let mut empty = Fnv1a64::new_default();
    empty.write_bytes(&[]);
    assert_eq!(empty.finish(), Fnv1a64::OFFSET_BASIS);

    let mut c = Fnv1a64::new_default();
    c.write_u8(1);
    c.write_u8(2);
    let mut d = Fnv1a64::new_default();
    d.write_u8(2);
    d.write_u8(1);
    assert_ne!(c.finish(), d.finish());
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn srgb_transfer_roundtrips() {
    for i in 0..=20 {
        let c = f64::from(i) / 20.0;
        assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-9);
    }
}

#[test]
fn knob_direction_convention() {
    let (x, y) = knob_direction(0.0);
    assert!(x.abs() < 1e-12 && (y + 1.0).abs() < 1e-12);
    let (x, y) = knob_direction(90.0);
    assert!((x - 1.0).abs() < 1e-12 && y.abs() < 1e-12);
    let (x, y) = knob_direction(-135.0);
    assert!(x < 0.0 && y > 0.0);
}
