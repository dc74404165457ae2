use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use heartcam_core::io::image_io::ImageSequence;
use heartcam_core::io::landmarks::LandmarkTrack;
use heartcam_core::io::ser::SerReader;
use heartcam_core::io::FrameSource;
use heartcam_core::pipeline::run_pipeline_reported;
use heartcam_core::roi::RoiStrategy;

use super::{write_report, ChannelArg, EstimationArgs};
use crate::progress::BarReporter;
use crate::summary::{print_report, print_run_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Input SER file or directory of frames
    pub input: PathBuf,

    /// Per-frame face landmarks (JSON array, null for untracked frames)
    #[arg(long, conflicts_with = "static_box")]
    pub landmarks: Option<PathBuf>,

    /// Fixed region as normalized x,y,width,height instead of a landmark track
    #[arg(long)]
    pub static_box: Option<String>,

    /// Color channel to average
    #[arg(long, value_enum)]
    pub channel: Option<ChannelArg>,

    #[command(flatten)]
    pub estimation: EstimationArgs,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = args.estimation.build_config()?;
    if let Some(channel) = args.channel {
        config.roi.channel = channel.into();
    }

    let source = open_source(&args.input)?;
    let frame_count = source.frame_count();

    let track = match (&args.landmarks, &args.static_box) {
        (Some(path), _) => LandmarkTrack::load(path)
            .with_context(|| format!("Failed to load landmarks {}", path.display()))?,
        (None, Some(spec)) => {
            let [x, y, w, h] = parse_box(spec)?;
            config.roi.strategy = RoiStrategy::BoundingBox { indices: vec![] };
            LandmarkTrack::static_box(x, y, w, h, frame_count)
        }
        (None, None) => bail!("Either --landmarks or --static-box is required"),
    };
    if track.len() < frame_count {
        tracing::warn!(
            frames = frame_count,
            tracked = track.len(),
            "Landmark track is shorter than the video; trailing frames are gaps"
        );
    }

    print_run_summary(&config, &args.input, frame_count, source.frame_rate());

    let reporter = Arc::new(BarReporter::new()?);
    let report = run_pipeline_reported(&config, source.as_ref(), &track, reporter.clone())?;
    reporter.finish();

    print_report(&report);

    if let Some(ref path) = args.estimation.report {
        write_report(&report, path)?;
    }

    Ok(())
}

fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        Ok(Box::new(ImageSequence::open(path)?))
    } else {
        let reader = SerReader::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Box::new(reader))
    }
}

fn parse_box(spec: &str) -> Result<[f32; 4]> {
    let values: Vec<f32> = spec
        .split(',')
        .map(|s| s.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid box '{spec}'"))?;
    match values.as_slice() {
        &[x, y, w, h] if w > 0.0 && h > 0.0 => Ok([x, y, w, h]),
        _ => bail!("Box must be four values x,y,width,height with positive size, got '{spec}'"),
    }
}
