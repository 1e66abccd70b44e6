use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
}

#[test]
fn fps_requires_non_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn backing_size_scales_by_density() {
    let s = SurfaceSize::new(280, 200).with_dpr(2.0);
    assert_eq!(s.backing(), (560, 400));
    assert_eq!(s.side(), 400);
    assert_eq!(SurfaceSize::new(280, 280).side(), 280);
}

#[test]
fn degenerate_density_collapses_to_zero() {
    let s = SurfaceSize::new(280, 280).with_dpr(0.0);
    assert_eq!(s.backing(), (0, 0));
    assert!(s.validate().is_err());
    assert!(SurfaceSize::new(10, 10).with_dpr(f64::NAN).validate().is_err());
}

#[test]
fn with_alpha_clamps_and_rounds() {
    let c = Rgb8::new(255, 110, 180);
    assert_eq!(c.with_alpha(1.0), [255, 110, 180, 255]);
    assert_eq!(c.with_alpha(2.0)[3], 255);
    assert_eq!(c.with_alpha(-1.0)[3], 0);
    assert_eq!(c.with_alpha(0.5)[3], 128);
}
