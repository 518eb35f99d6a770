//! Detector Interface
//!
//! Text regions produced by the external text detector. Coordinates are in
//! sensor space; the overlay maps them into view space at draw time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned rectangle given by its four edges
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict containment: points on an edge are outside
    pub fn contains_strict(&self, x: f32, y: f32) -> bool {
        self.left < x && self.right > x && self.top < y && self.bottom > y
    }
}

/// Recognized text with its sensor-space bounds
///
/// A block's `components` are its lines, in detection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Raw recognized string
    pub value: String,
    /// Bounding rectangle in sensor space
    pub rect: Rect,
    /// Sub-regions (lines within a block)
    #[serde(default)]
    pub components: Vec<TextRegion>,
}

impl TextRegion {
    /// Create a leaf region with no components
    pub fn new(value: impl Into<String>, rect: Rect) -> Self {
        Self {
            value: value.into(),
            rect,
            components: Vec::new(),
        }
    }

    /// Attach components to this region
    pub fn with_components(mut self, components: Vec<TextRegion>) -> Self {
        self.components = components;
        self
    }
}

/// One processed detector frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedFrame {
    /// Sensor width in pixels
    pub sensor_width: u32,
    /// Sensor height in pixels
    pub sensor_height: u32,
    /// Detected text blocks
    #[serde(default)]
    pub blocks: Vec<TextRegion>,
}

impl DetectedFrame {
    /// Sensor dimensions as (width, height)
    pub fn sensor_size(&self) -> (u32, u32) {
        (self.sensor_width, self.sensor_height)
    }
}

/// Load a detector frame from a JSON file
pub fn load_detections(path: &Path) -> Result<DetectedFrame> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read detections: {:?}", path))?;
    let frame: DetectedFrame = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse detections: {:?}", path))?;
    Ok(frame)
}
