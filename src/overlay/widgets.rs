//! Paint configuration for overlay drawing
//!
//! Built once at startup and passed by reference into every draw call.

/// Text size the paint is created with
pub const BASE_TEXT_SIZE: f32 = 54.0;
/// Text size used while drawing labels
pub const DRAW_TEXT_SIZE: f32 = 70.0;

/// Paint used for labels and badge images
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    /// Color (RGBA)
    pub color: [u8; 4],
    /// Font size in view pixels
    pub text_size: f32,
    pub anti_alias: bool,
    pub filter_bitmap: bool,
    pub dither: bool,
}

impl Default for TextPaint {
    fn default() -> Self {
        Self {
            color: [255, 255, 255, 255],
            text_size: BASE_TEXT_SIZE,
            anti_alias: false,
            filter_bitmap: false,
            dither: false,
        }
    }
}

impl TextPaint {
    /// Paint with the draw-time size and smoothing enabled
    pub fn for_draw(&self) -> Self {
        Self {
            text_size: DRAW_TEXT_SIZE,
            anti_alias: true,
            filter_bitmap: true,
            dither: true,
            ..self.clone()
        }
    }
}

/// Outline paint for region boxes
#[derive(Debug, Clone, PartialEq)]
pub struct RectPaint {
    /// Color (RGBA)
    pub color: [u8; 4],
    pub stroke_width: f32,
}

impl Default for RectPaint {
    fn default() -> Self {
        Self {
            color: [255, 255, 255, 255],
            stroke_width: 4.0,
        }
    }
}

/// Styles shared by every graphic
#[derive(Debug, Clone, Default)]
pub struct OverlayStyle {
    pub text: TextPaint,
    pub rect: RectPaint,
    /// Outline matched regions before drawing their label
    pub outline_regions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = OverlayStyle::default();

        assert_eq!(style.text.color, [255, 255, 255, 255]);
        assert!((style.text.text_size - 54.0).abs() < 0.01);
        assert!((style.rect.stroke_width - 4.0).abs() < 0.01);
        assert!(!style.outline_regions);
    }

    #[test]
    fn test_draw_paint_rescales_text() {
        let base = TextPaint::default();
        let paint = base.for_draw();

        assert!((paint.text_size - 70.0).abs() < 0.01);
        assert!(paint.anti_alias && paint.filter_bitmap && paint.dither);
        assert_eq!(paint.color, base.color);
        // Base paint is untouched
        assert!((base.text_size - 54.0).abs() < 0.01);
    }
}
