//! Region-of-interest reduction: facial geometry in, one scalar per frame out.

pub mod config;
pub mod landmarks;
pub mod mask;
pub mod reducer;

pub use config::{RoiConfig, RoiStrategy};
pub use landmarks::{LandmarkPoint, PixelPoint};
pub use mask::{polygon_mask, polygon_spans, spans_to_mask, Span};
pub use reducer::{reduce_region, Region, RoiReducer};
