//! Sensor-to-view coordinate mapping

use anyhow::{bail, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::vision::Rect;

/// Coordinate frame shared between the overlay and its graphics
pub type SharedFrame = Arc<RwLock<CoordinateFrame>>;

/// Translates sensor-space coordinates into view space
pub trait CoordinateMapper {
    fn translate_x(&self, x: f32) -> f32;
    fn translate_y(&self, y: f32) -> f32;

    /// Map a rectangle edge by edge, so per-axis scales stay independent
    fn map_rect(&self, rect: &Rect) -> Rect {
        Rect {
            left: self.translate_x(rect.left),
            top: self.translate_y(rect.top),
            right: self.translate_x(rect.right),
            bottom: self.translate_y(rect.bottom),
        }
    }
}

/// Per-axis scale and offset from sensor to view space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateFrame {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateFrame {
    pub fn new(scale_x: f32, scale_y: f32, offset_x: f32, offset_y: f32) -> Self {
        Self { scale_x, scale_y, offset_x, offset_y }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }

    /// Stretch the sensor image over the view, one scale per axis
    pub fn from_sizes(sensor: (u32, u32), view: (u32, u32)) -> Result<Self> {
        if sensor.0 == 0 || sensor.1 == 0 {
            bail!("Sensor size must be non-zero, got {}x{}", sensor.0, sensor.1);
        }
        Ok(Self::new(
            view.0 as f32 / sensor.0 as f32,
            view.1 as f32 / sensor.1 as f32,
            0.0,
            0.0,
        ))
    }

    /// Wrap into a shareable handle
    pub fn shared(self) -> SharedFrame {
        Arc::new(RwLock::new(self))
    }
}

impl CoordinateMapper for CoordinateFrame {
    fn translate_x(&self, x: f32) -> f32 {
        x * self.scale_x + self.offset_x
    }

    fn translate_y(&self, y: f32) -> f32 {
        y * self.scale_y + self.offset_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_x_scale_and_offset() {
        let frame = CoordinateFrame::new(2.0, 1.0, 10.0, 0.0);

        assert!((frame.translate_x(5.0) - 20.0).abs() < 0.001);
        assert!((frame.translate_y(5.0) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_identity_leaves_rect_unchanged() {
        let rect = Rect::new(3.0, 4.0, 50.0, 60.0);

        assert_eq!(CoordinateFrame::identity().map_rect(&rect), rect);
    }

    #[test]
    fn test_non_uniform_scale_maps_edges_independently() {
        let frame = CoordinateFrame::new(2.0, 3.0, 10.0, 5.0);
        let square = Rect::new(10.0, 10.0, 20.0, 20.0);

        let mapped = frame.map_rect(&square);

        assert!((mapped.left - 30.0).abs() < 0.001);
        assert!((mapped.top - 35.0).abs() < 0.001);
        assert!((mapped.right - 50.0).abs() < 0.001);
        assert!((mapped.bottom - 65.0).abs() < 0.001);
        assert!((mapped.width() - 20.0).abs() < 0.001);
        assert!((mapped.height() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_from_sizes() {
        let frame = CoordinateFrame::from_sizes((640, 480), (1280, 1440)).unwrap();

        assert!((frame.scale_x - 2.0).abs() < 0.001);
        assert!((frame.scale_y - 3.0).abs() < 0.001);
        assert_eq!(frame.offset_x, 0.0);
        assert_eq!(frame.offset_y, 0.0);
    }

    #[test]
    fn test_from_sizes_rejects_empty_sensor() {
        assert!(CoordinateFrame::from_sizes((0, 480), (1280, 720)).is_err());
    }
}
