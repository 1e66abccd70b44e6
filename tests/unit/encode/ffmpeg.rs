use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::default(),
        background: [18, 12, 24, 255],
    }
}

fn frame(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("lovespark-ffmpeg-{}", std::process::id()))
        .join(name)
}

#[test]
fn transparent_pixels_take_the_background() {
    let mut dst = vec![0u8; 4];
    composite_over(&mut dst, &[0, 0, 0, 0], [10, 20, 30, 255]);
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let mut dst = vec![0u8; 4];
    composite_over(&mut dst, &[255, 110, 180, 255], [10, 20, 30, 255]);
    assert_eq!(dst, vec![255, 110, 180, 255]);
}

#[test]
fn half_covered_glyph_blends_with_background() {
    // Pink at ~50% coverage, premultiplied.
    let mut dst = vec![0u8; 4];
    composite_over(&mut dst, &[128, 55, 90, 128], [100, 100, 100, 255]);
    assert_eq!(dst[3], 255);
    assert_eq!(dst[0], 128 + 50);
    assert_eq!(dst[1], 55 + 50);
    assert_eq!(dst[2], 90 + 50);
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(scratch_path("odd.mp4"));
    let err = sink.begin(cfg(281, 280)).unwrap_err();
    assert!(err.to_string().contains("even"));
    assert!(!sink.is_encoding());
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let path = scratch_path("keep.mp4");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"keep").unwrap();

    let mut sink = FfmpegSink::new(&path).overwrite(false);
    assert!(sink.begin(cfg(64, 64)).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"keep");
}

#[test]
fn push_and_end_before_begin_fail() {
    let mut sink = FfmpegSink::new(scratch_path("idle.mp4"));
    assert!(
        sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 4]))
            .is_err()
    );
    assert!(sink.end().is_err());
    sink.abort();
    assert!(!sink.is_encoding());
}

#[test]
fn failed_push_leaves_no_running_encoder_after_drop() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let path = scratch_path("aborted.mp4");
    let mut sink = FfmpegSink::new(&path);
    sink.begin(cfg(64, 64)).unwrap();
    assert!(sink.is_encoding());

    assert!(
        sink.push_frame(FrameIndex(0), &frame(32, 32, [0; 4]))
            .is_err()
    );
    sink.abort();
    assert!(!sink.is_encoding());

    // The path is free again for a fresh encoder.
    let mut again = FfmpegSink::new(&path);
    again.begin(cfg(64, 64)).unwrap();
    again
        .push_frame(FrameIndex(0), &frame(64, 64, [0; 4]))
        .unwrap();
    drop(again);
}

#[test]
fn out_of_order_frames_are_rejected() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let mut sink = FfmpegSink::new(scratch_path("order.mp4"));
    sink.begin(cfg(16, 16)).unwrap();
    let f = frame(16, 16, [0, 0, 0, 255]);
    sink.push_frame(FrameIndex(3), &f).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &f).is_err());
    assert!(sink.push_frame(FrameIndex(2), &f).is_err());
    sink.push_frame(FrameIndex(4), &f).unwrap();
    sink.end().unwrap();
}
