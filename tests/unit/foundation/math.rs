use super::*;

#[test]
fn lerp_hits_endpoints_exactly() {
    for a in [0u8, 1, 127, 128, 254, 255] {
        for b in [0u8, 3, 128, 255] {
            assert_eq!(lerp_channel(a, b, 0.0), a);
            assert_eq!(lerp_channel(a, b, 1.0), b);
        }
    }
}

#[test]
fn lerp_rounds_half_up_and_clamps_overshoot() {
    assert_eq!(lerp_channel(255, 0, 0.5), 128);
    assert_eq!(lerp_channel(0, 255, 0.5), 128);
    assert_eq!(lerp_channel(0, 200, 1.5), 255);
    assert_eq!(lerp_channel(200, 0, 1.5), 0);
    assert_eq!(lerp_channel(10, 20, -1.0), 0);
}

#[test]
fn saturating_helpers() {
    assert_eq!(add_scaled(200, 100, 1.0), 255);
    assert_eq!(add_scaled(100, 100, 0.5), 150);
    assert_eq!(sub_scaled(50, 100, 1.0), 0);
    assert_eq!(sub_scaled(200, 100, 0.5), 150);
    assert_eq!(scale_channel(200, 0.5), 100);
    assert_eq!(scale_channel(200, 2.0), 255);
    assert_eq!(round_channel(f64::NAN), 0);
}
