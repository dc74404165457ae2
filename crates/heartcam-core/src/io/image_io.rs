use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::info;

use crate::error::{HeartcamError, Result};
use crate::frame::{ColorFrame, Frame, FrameMetadata};

use super::FrameSource;

const FRAME_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Load an image file into separate R, G, B planes in [0.0, 1.0].
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?.to_rgb32f();
    let (w, h) = img.dimensions();
    let (h, w) = (h as usize, w as usize);

    let mut red = Array2::<f32>::zeros((h, w));
    let mut green = Array2::<f32>::zeros((h, w));
    let mut blue = Array2::<f32>::zeros((h, w));
    for (col, row, pixel) in img.enumerate_pixels() {
        let (r, c) = (row as usize, col as usize);
        red[[r, c]] = pixel.0[0];
        green[[r, c]] = pixel.0[1];
        blue[[r, c]] = pixel.0[2];
    }

    Ok(ColorFrame::new(
        Frame::new(red, 32),
        Frame::new(green, 32),
        Frame::new(blue, 32),
    ))
}

/// A directory of still frames, ordered by file name.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl ImageSequence {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_frame_extension(p))
            .collect();
        if paths.is_empty() {
            return Err(HeartcamError::EmptySequence);
        }
        paths.sort();

        let (width, height) = image::image_dimensions(&paths[0])?;
        info!(
            frames = paths.len(),
            width,
            height,
            dir = %dir.display(),
            "Opened image sequence"
        );

        Ok(Self {
            paths,
            width,
            height,
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for ImageSequence {
    fn frame_count(&self) -> usize {
        self.paths.len()
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_rate(&self) -> Option<f64> {
        None
    }

    fn read_color_frame(&self, index: usize) -> Result<ColorFrame> {
        let path = self
            .paths
            .get(index)
            .ok_or(HeartcamError::FrameIndexOutOfRange {
                index,
                total: self.paths.len(),
            })?;
        let mut frame = load_color_image(path)?;
        if frame.width() != self.width as usize || frame.height() != self.height as usize {
            return Err(HeartcamError::InvalidDimensions {
                width: frame.width() as u32,
                height: frame.height() as u32,
            });
        }
        frame.metadata = FrameMetadata {
            frame_index: index,
            timestamp_us: None,
        };
        Ok(frame)
    }
}

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
