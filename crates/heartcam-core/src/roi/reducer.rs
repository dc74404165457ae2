use crate::frame::{Channel, ColorFrame, Frame};

use super::config::{RoiConfig, RoiStrategy};
use super::landmarks::{LandmarkPoint, PixelPoint};
use super::mask::{polygon_spans, Span};

/// Pixel-space region whose mean intensity becomes one sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    /// Axis-aligned box `[x0, x1) x [y0, y1)` in pixel coordinates.
    BoundingBox { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Closed polygon, vertices in drawing order.
    Polygon(Vec<PixelPoint>),
}

impl Region {
    /// Build the region for one frame from tracker landmarks.
    ///
    /// Indices past the end of `landmarks` and non-finite points are
    /// unresolvable and dropped. Returns `None` when too few points remain
    /// to form the region (three for a polygon, one for a box).
    pub fn from_landmarks(
        strategy: &RoiStrategy,
        landmarks: &[LandmarkPoint],
        width: usize,
        height: usize,
    ) -> Option<Self> {
        match strategy {
            RoiStrategy::Polygon { indices } => {
                let vertices = resolve(indices, landmarks, width, height);
                if vertices.len() < 3 {
                    return None;
                }
                Some(Self::Polygon(vertices))
            }
            RoiStrategy::BoundingBox { indices } => {
                let points = if indices.is_empty() {
                    landmarks
                        .iter()
                        .filter(|p| p.is_finite())
                        .map(|p| p.to_pixel(width, height))
                        .collect()
                } else {
                    resolve(indices, landmarks, width, height)
                };
                let first = points.first()?;
                let init = (first.x, first.y, first.x, first.y);
                let (x0, y0, x1, y1) = points.iter().fold(init, |(x0, y0, x1, y1), p| {
                    (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
                });
                Some(Self::BoundingBox { x0, y0, x1, y1 })
            }
        }
    }

    /// Masked pixel runs for a `height` x `width` frame.
    pub fn spans(&self, height: usize, width: usize) -> Vec<Span> {
        match self {
            Self::BoundingBox { x0, y0, x1, y1 } => {
                let corners = [
                    PixelPoint::new(*x0, *y0),
                    PixelPoint::new(*x1, *y0),
                    PixelPoint::new(*x1, *y1),
                    PixelPoint::new(*x0, *y1),
                ];
                polygon_spans(&corners, height, width)
            }
            Self::Polygon(vertices) => polygon_spans(vertices, height, width),
        }
    }
}

fn resolve(
    indices: &[usize],
    landmarks: &[LandmarkPoint],
    width: usize,
    height: usize,
) -> Vec<PixelPoint> {
    indices
        .iter()
        .filter_map(|&i| landmarks.get(i))
        .filter(|p| p.is_finite())
        .map(|p| p.to_pixel(width, height))
        .collect()
}

/// Mean of `plane` over every pixel inside `region`.
///
/// Returns `None` when the region covers no pixels (degenerate polygon,
/// zero area, or entirely outside the frame).
pub fn reduce_region(plane: &Frame, region: &Region) -> Option<f64> {
    let spans = region.spans(plane.height(), plane.width());

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for span in &spans {
        let row = plane.data.row(span.row);
        for col in span.col_start..span.col_end {
            sum += row[col] as f64;
        }
        count += span.len();
    }

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Reduces a color frame plus landmarks to one sample, per [`RoiConfig`].
#[derive(Clone, Debug, Default)]
pub struct RoiReducer {
    pub strategy: RoiStrategy,
    pub channel: Channel,
}

impl RoiReducer {
    pub fn new(config: &RoiConfig) -> Self {
        Self {
            strategy: config.strategy.clone(),
            channel: config.channel,
        }
    }

    /// `None` is a tracking gap: the frame contributes no sample.
    pub fn reduce(&self, frame: &ColorFrame, landmarks: &[LandmarkPoint]) -> Option<f64> {
        let region =
            Region::from_landmarks(&self.strategy, landmarks, frame.width(), frame.height())?;
        reduce_region(frame.channel(self.channel), &region)
    }
}
