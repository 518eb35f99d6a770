//! Drawing surfaces consumed by overlay graphics

use serde::Serialize;

use crate::assets::Badge;
use crate::catalog::{BadgeKind, ProductFamily};
use crate::overlay::widgets::{RectPaint, TextPaint};
use crate::vision::Rect;

/// Target for overlay draw calls, in view space
pub trait Surface {
    /// Draw text with its baseline starting at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &TextPaint);
    /// Draw a badge with its top-left corner at (x, y)
    fn draw_image(&mut self, badge: &Badge, x: f32, y: f32, paint: &TextPaint);
    /// Outline a rectangle
    fn draw_rect(&mut self, rect: &Rect, paint: &RectPaint);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        text: String,
        x: f32,
        y: f32,
    },
    Image {
        family: ProductFamily,
        kind: BadgeKind,
        x: f32,
        y: f32,
    },
    Rect {
        rect: Rect,
    },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for RecordingSurface {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, _paint: &TextPaint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, badge: &Badge, x: f32, y: f32, _paint: &TextPaint) {
        self.commands.push(DrawCommand::Image {
            family: badge.family,
            kind: badge.kind,
            x,
            y,
        });
    }

    fn draw_rect(&mut self, rect: &Rect, _paint: &RectPaint) {
        self.commands.push(DrawCommand::Rect { rect: *rect });
    }
}
