use heartcam_core::consts::FOREHEAD_LANDMARKS;
use heartcam_core::frame::Channel;
use heartcam_core::pipeline::config::{GapPolicy, PipelineConfig, SlidingWindowConfig};
use heartcam_core::roi::RoiStrategy;
use heartcam_core::signal::FilterSpec;

#[test]
fn test_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.sampling_rate, None);
    assert_eq!(config.filter, FilterSpec::default());
    assert_eq!(config.filter.order, 3);
    assert_eq!(config.roi.channel, Channel::Green);
    assert_eq!(
        config.roi.strategy,
        RoiStrategy::Polygon {
            indices: FOREHEAD_LANDMARKS.to_vec()
        }
    );
    assert_eq!(config.estimation.min_window_secs, 5.0);
    assert_eq!(config.estimation.gap_policy, GapPolicy::Skip);
    assert!(config.sliding_window.is_none());
}

#[test]
fn test_toml_roundtrip() {
    let mut config = PipelineConfig::default();
    config.sampling_rate = Some(60.0);
    config.filter.order = 4;
    config.roi.channel = Channel::Red;
    config.roi.strategy = RoiStrategy::BoundingBox { indices: vec![1, 2] };
    config.estimation.gap_policy = GapPolicy::Resample;
    config.sliding_window = Some(SlidingWindowConfig::default());

    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: PipelineConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let text = r#"
[filter]
high_cut_hz = 2.5

[estimation]
gap_policy = "Resample"
"#;
    let config: PipelineConfig = toml::from_str(text).unwrap();
    assert_eq!(config.filter.high_cut_hz, 2.5);
    assert_eq!(config.filter.low_cut_hz, 0.75);
    assert_eq!(config.filter.order, 3);
    assert_eq!(config.estimation.gap_policy, GapPolicy::Resample);
    assert_eq!(config.estimation.min_window_secs, 5.0);
    assert_eq!(config.roi, Default::default());
}

#[test]
fn test_empty_toml_is_default() {
    let config: PipelineConfig = toml::from_str("").unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
fn test_strategy_toml() {
    let text = r#"
[roi]
channel = "Blue"

[roi.strategy.BoundingBox]
indices = []
"#;
    let config: PipelineConfig = toml::from_str(text).unwrap();
    assert_eq!(config.roi.channel, Channel::Blue);
    assert_eq!(config.roi.strategy, RoiStrategy::BoundingBox { indices: vec![] });
}

#[test]
fn test_display() {
    assert_eq!(GapPolicy::Resample.to_string(), "Resample");
    assert_eq!(Channel::Green.to_string(), "Green");
    assert_eq!(
        RoiStrategy::BoundingBox { indices: vec![3, 4] }.to_string(),
        "Bounding Box (2 points)"
    );
}

#[test]
fn test_filter_spec_bpm_bounds() {
    let spec = FilterSpec::default();
    assert_eq!(spec.low_cut_bpm(), 45.0);
    assert_eq!(spec.high_cut_bpm(), 180.0);
}

#[test]
fn test_resolve_sampling_rate() {
    let mut config = PipelineConfig::default();
    assert_eq!(config.resolve_sampling_rate(Some(29.97)), 29.97);
    assert_eq!(config.resolve_sampling_rate(Some(f64::NAN)), 30.0);
    assert_eq!(config.resolve_sampling_rate(None), 30.0);

    config.sampling_rate = Some(50.0);
    assert_eq!(config.resolve_sampling_rate(Some(29.97)), 50.0);
}

#[test]
fn test_validate() {
    let config = PipelineConfig::default();
    assert!(config.validate(30.0).is_ok());
    // High cutoff of 3 Hz needs more than 6 fps.
    assert!(config.validate(6.0).is_err());
    assert!(config.validate(6.5).is_ok());

    let mut config = PipelineConfig::default();
    config.sliding_window = Some(SlidingWindowConfig {
        window_secs: 10.0,
        hop_secs: 0.0,
    });
    assert!(config.validate(30.0).is_err());
}
