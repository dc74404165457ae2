use serde::{Deserialize, Serialize};

use crate::consts::FOREHEAD_LANDMARKS;
use crate::frame::Channel;

/// How the configured landmark indices become a pixel region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoiStrategy {
    /// Fill the polygon traced by the landmarks, in index order.
    Polygon { indices: Vec<usize> },
    /// Fill the axis-aligned box enclosing the landmarks.
    /// An empty index list uses every landmark (whole-face box).
    BoundingBox { indices: Vec<usize> },
}

impl Default for RoiStrategy {
    fn default() -> Self {
        Self::Polygon {
            indices: FOREHEAD_LANDMARKS.to_vec(),
        }
    }
}

impl std::fmt::Display for RoiStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polygon { indices } => write!(f, "Polygon ({} points)", indices.len()),
            Self::BoundingBox { indices } if indices.is_empty() => {
                write!(f, "Bounding Box (all landmarks)")
            }
            Self::BoundingBox { indices } => {
                write!(f, "Bounding Box ({} points)", indices.len())
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiConfig {
    #[serde(default)]
    pub strategy: RoiStrategy,
    #[serde(default)]
    pub channel: Channel,
}
