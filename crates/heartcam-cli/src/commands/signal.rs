use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use heartcam_core::pipeline::run_samples;

use super::{write_report, EstimationArgs};
use crate::summary::print_report;

#[derive(Args)]
pub struct SignalArgs {
    /// Text file with one sample per line; blank or "nan" lines are tracking gaps
    pub file: PathBuf,

    #[command(flatten)]
    pub estimation: EstimationArgs,
}

pub fn run(args: &SignalArgs) -> Result<()> {
    let config = args.estimation.build_config()?;

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let samples = parse_samples(&contents)?;

    let report = run_samples(&config, None, &samples)?;
    print_report(&report);

    if let Some(ref path) = args.estimation.report {
        write_report(&report, path)?;
    }

    Ok(())
}

fn parse_samples(contents: &str) -> Result<Vec<Option<f64>>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with('#'))
        .map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() || line.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }
            line.parse::<f64>()
                .map(Some)
                .with_context(|| format!("Line {}: invalid sample '{line}'", i + 1))
        })
        .collect()
}
