use super::*;

#[test]
fn premul_roundtrips_opaque_and_clears_transparent() {
    let c = Rgba8::opaque(249, 115, 22);
    assert_eq!(c.to_premul().to_straight(), c);
    assert_eq!(
        Rgba8::new(10, 20, 30, 0).to_premul(),
        Rgba8Premul::transparent()
    );
    assert_eq!(Rgba8Premul::transparent().to_straight(), Rgba8::TRANSPARENT);
}

#[test]
fn premul_half_alpha() {
    let p = Rgba8Premul::from_straight_rgba(255, 0, 128, 128);
    assert_eq!(p.to_array(), [128, 0, 64, 128]);
    let back = p.to_straight();
    assert_eq!(back.r, 255);
    assert_eq!(back.a, 128);
    assert!((i32::from(back.b) - 128).abs() <= 1);
}

#[test]
fn scale_alpha_clamps() {
    let c = Rgba8::WHITE.scale_alpha(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(Rgba8::WHITE.scale_alpha(4.0).a, 255);
    assert_eq!(Rgba8::WHITE.scale_alpha(-1.0).a, 0);
}

#[test]
fn hex_is_lowercase_with_alpha() {
    assert_eq!(Rgba8::opaque(0x1e, 0x29, 0x3b).to_hex(), "#1e293bff");
}
