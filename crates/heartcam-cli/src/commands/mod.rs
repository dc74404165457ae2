pub mod config;
pub mod info;
pub mod run;
pub mod signal;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use heartcam_core::frame::Channel;
use heartcam_core::pipeline::config::{GapPolicy, PipelineConfig, SlidingWindowConfig};
use heartcam_core::pipeline::PulseReport;

#[derive(Clone, Copy, ValueEnum)]
pub enum ChannelArg {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GapPolicyArg {
    Skip,
    Resample,
}

/// Estimation options shared by `run` and `signal`.
#[derive(Args)]
pub struct EstimationArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frame rate override (frames per second)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Lower pass-band edge in Hz
    #[arg(long)]
    pub low_cut: Option<f64>,

    /// Upper pass-band edge in Hz
    #[arg(long)]
    pub high_cut: Option<f64>,

    /// How to treat frames that produced no sample
    #[arg(long, value_enum)]
    pub gaps: Option<GapPolicyArg>,

    /// Also estimate over a sliding window of this many seconds
    #[arg(long)]
    pub window: Option<f64>,

    /// Hop between sliding windows in seconds
    #[arg(long, default_value = "1.0")]
    pub hop: f64,

    /// Write the full report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl EstimationArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn build_config(&self) -> Result<PipelineConfig> {
        let mut config: PipelineConfig = if let Some(ref path) = self.config {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid pipeline config")?
        } else {
            PipelineConfig::default()
        };

        if let Some(fps) = self.fps {
            config.sampling_rate = Some(fps);
        }
        if let Some(low) = self.low_cut {
            config.filter.low_cut_hz = low;
        }
        if let Some(high) = self.high_cut {
            config.filter.high_cut_hz = high;
        }
        if let Some(gaps) = self.gaps {
            config.estimation.gap_policy = match gaps {
                GapPolicyArg::Skip => GapPolicy::Skip,
                GapPolicyArg::Resample => GapPolicy::Resample,
            };
        }
        if let Some(window_secs) = self.window {
            config.sliding_window = Some(SlidingWindowConfig {
                window_secs,
                hop_secs: self.hop,
            });
        }
        Ok(config)
    }
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Red => Channel::Red,
            ChannelArg::Green => Channel::Green,
            ChannelArg::Blue => Channel::Blue,
        }
    }
}

pub fn write_report(report: &PulseReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    println!("Report saved to {}", path.display());
    Ok(())
}
