#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use heartcam_core::error::HeartcamError;
use heartcam_core::io::image_io::{load_color_image, ImageSequence};
use heartcam_core::io::landmarks::LandmarkTrack;
use heartcam_core::io::FrameSource;
use heartcam_core::pipeline::config::PipelineConfig;
use heartcam_core::pipeline::run_pipeline;
use heartcam_core::roi::RoiStrategy;

#[test]
fn test_png_roundtrip_preserves_8bit_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.png");
    let frame = common::solid_frame(4, 6, 1.0, 100.0 / 255.0, 0.0);

    common::save_color_png(&frame, &path);
    let loaded = load_color_image(&path).unwrap();

    assert_eq!((loaded.width(), loaded.height()), (6, 4));
    assert_abs_diff_eq!(loaded.red.data[[0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.green.data[[3, 5]], 100.0 / 255.0, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.blue.data[[2, 2]], 0.0, epsilon = 1e-6);
}

#[test]
fn test_sequence_sorted_by_name() {
    let dir = TempDir::new().unwrap();
    for (name, g) in [("frame_002.png", 0.2), ("frame_000.png", 0.0), ("frame_001.png", 0.1)] {
        let frame = common::solid_frame(2, 2, 0.0, g, 0.0);
        common::save_color_png(&frame, &dir.path().join(name));
    }
    std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let seq = ImageSequence::open(dir.path()).unwrap();
    assert_eq!(seq.frame_count(), 3);
    assert_eq!(seq.dimensions(), (2, 2));
    assert!(seq.frame_rate().is_none());
    assert!(seq.paths()[0].ends_with("frame_000.png"));

    let greens: Vec<f32> = seq
        .color_frames()
        .map(|f| f.unwrap().green.data[[0, 0]])
        .collect();
    assert!(greens[0] < greens[1] && greens[1] < greens[2]);
    assert_eq!(seq.read_color_frame(2).unwrap().metadata.frame_index, 2);
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("readme.md"), "nothing here").unwrap();
    assert!(matches!(
        ImageSequence::open(dir.path()),
        Err(HeartcamError::EmptySequence)
    ));
}

#[test]
fn test_mismatched_frame_size() {
    let dir = TempDir::new().unwrap();
    common::save_color_png(&common::solid_frame(2, 2, 0.0, 0.0, 0.0), &dir.path().join("a.png"));
    common::save_color_png(&common::solid_frame(3, 2, 0.0, 0.0, 0.0), &dir.path().join("b.png"));

    let seq = ImageSequence::open(dir.path()).unwrap();
    assert!(seq.read_color_frame(0).is_ok());
    assert!(matches!(
        seq.read_color_frame(1),
        Err(HeartcamError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        seq.read_color_frame(5),
        Err(HeartcamError::FrameIndexOutOfRange { .. })
    ));
}

#[test]
fn test_sequence_end_to_end() {
    let dir = TempDir::new().unwrap();
    for i in 0..150 {
        let t = i as f64 / 30.0;
        let g = (128.0 + 20.0 * (std::f64::consts::TAU * 1.2 * t).sin()).round() / 255.0;
        let frame = common::solid_frame(8, 8, 0.4, g as f32, 0.3);
        common::save_color_png(&frame, &dir.path().join(format!("{i:05}.png")));
    }

    let seq = ImageSequence::open(dir.path()).unwrap();
    let track = LandmarkTrack::static_box(0.25, 0.25, 0.5, 0.5, seq.frame_count());
    let mut config = PipelineConfig::default();
    config.roi.strategy = RoiStrategy::Polygon {
        indices: vec![0, 1, 2, 3],
    };

    let report = run_pipeline(&config, &seq, &track).unwrap();
    assert_eq!(report.sampling_rate, 30.0);
    assert_eq!(report.raw.len(), 150);
    assert_abs_diff_eq!(report.bpm, 72.0, epsilon = 1e-6);
}
