use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::roi::LandmarkPoint;

/// Per-frame output of an external face tracker.
///
/// Serialized as a JSON array with one entry per frame: either an array of
/// `{"x": .., "y": ..}` normalized points, or `null` when tracking failed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkTrack {
    pub frames: Vec<Option<Vec<LandmarkPoint>>>,
}

impl LandmarkTrack {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let track: Self = serde_json::from_reader(reader)?;
        info!(
            frames = track.len(),
            tracked = track.tracked_count(),
            path = %path.display(),
            "Loaded landmark track"
        );
        Ok(track)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A constant four-corner track for sources without a tracker.
    /// Coordinates are normalized; corners run clockwise from top-left.
    pub fn static_box(x: f32, y: f32, width: f32, height: f32, frame_count: usize) -> Self {
        let corners = vec![
            LandmarkPoint::new(x, y),
            LandmarkPoint::new(x + width, y),
            LandmarkPoint::new(x + width, y + height),
            LandmarkPoint::new(x, y + height),
        ];
        Self {
            frames: vec![Some(corners); frame_count],
        }
    }

    /// Landmarks for a frame; `None` for tracking gaps and frames past the end.
    pub fn get(&self, frame_index: usize) -> Option<&[LandmarkPoint]> {
        self.frames.get(frame_index)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn tracked_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }
}
