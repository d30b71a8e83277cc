use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn over_respects_alpha_extremes() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
    assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn over_blends_half_alpha() {
    let out = over([0, 0, 254, 254], [128, 0, 0, 128]);
    assert_eq!(out[0], 128);
    assert_eq!(out[2], 127);
    assert_eq!(out[3], 255);
}

#[test]
fn wrap_degrees_stays_in_range() {
    assert_eq!(wrap_degrees(370.0), 10.0);
    assert_eq!(wrap_degrees(-30.0), 330.0);
    assert!(wrap_degrees(-1e-20) < 360.0);
}
