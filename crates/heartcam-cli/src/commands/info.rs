use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use heartcam_core::io::image_io::ImageSequence;
use heartcam_core::io::ser::SerReader;
use heartcam_core::io::FrameSource;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file or directory of frames
    pub input: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    if args.input.is_dir() {
        let seq = ImageSequence::open(&args.input)?;
        let (w, h) = seq.dimensions();
        println!("Directory:   {}", args.input.display());
        println!("Frames:      {}", seq.frame_count());
        println!("Dimensions:  {}x{}", w, h);
        if let (Some(first), Some(last)) = (seq.paths().first(), seq.paths().last()) {
            println!("First:       {}", first.display());
            println!("Last:        {}", last.display());
        }
        return Ok(());
    }

    let reader = SerReader::open(&args.input)?;
    let info = reader.source_info(&args.input);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);
    match info.frame_rate {
        Some(fps) => {
            println!("Frame rate:  {:.3} fps", fps);
            println!("Duration:    {:.1} s", info.total_frames as f64 / fps);
        }
        None => println!("Frame rate:  unknown (no timestamps)"),
    }

    if let Some(ref obs) = info.observer {
        println!("Observer:    {}", obs);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    if let Some(frame_bytes) = reader.header.frame_byte_size() {
        let total_mb = (frame_bytes * info.total_frames) as f64 / (1024.0 * 1024.0);
        println!("Data size:   {:.1} MB", total_mb);
    }

    Ok(())
}
