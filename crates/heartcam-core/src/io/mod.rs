pub mod image_io;
pub mod landmarks;
pub mod ser;

use crate::error::Result;
use crate::frame::ColorFrame;

/// Random-access source of decoded color frames.
///
/// Decoding is the only blocking operation the pipeline performs; frames
/// are requested strictly in order, one at a time.
pub trait FrameSource {
    fn frame_count(&self) -> usize;

    /// (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Capture rate reported by the container, if it records one.
    fn frame_rate(&self) -> Option<f64>;

    fn read_color_frame(&self, index: usize) -> Result<ColorFrame>;

    /// Iterator over all frames in capture order.
    fn color_frames(&self) -> Box<dyn Iterator<Item = Result<ColorFrame>> + '_> {
        Box::new((0..self.frame_count()).map(move |i| self.read_color_frame(i)))
    }
}
