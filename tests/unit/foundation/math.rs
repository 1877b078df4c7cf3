use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
}

#[test]
fn lerp_u8_endpoints_and_midpoint() {
    assert_eq!(lerp_u8(0, 200, 0.0), 0);
    assert_eq!(lerp_u8(0, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 200, 0.5), 100);
    assert_eq!(lerp_u8(10, 10, 0.3), 10);
}
