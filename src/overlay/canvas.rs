//! Raster surface compositing the overlay onto an RGBA image

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use std::path::Path;
use tracing::warn;

use crate::assets::Badge;
use crate::overlay::surface::Surface;
use crate::overlay::widgets::{RectPaint, TextPaint};
use crate::vision::Rect;

/// Surface backed by an in-memory image
pub struct CanvasSurface {
    canvas: RgbaImage,
    font: Option<FontArc>,
    warned_no_font: bool,
}

impl CanvasSurface {
    /// Draw on top of an existing frame
    pub fn new(canvas: RgbaImage) -> Self {
        Self {
            canvas,
            font: None,
            warned_no_font: false,
        }
    }

    /// Transparent canvas of the given view size
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::new(width, height))
    }

    /// Use a TrueType/OpenType font for labels
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    /// Write the canvas as PNG (or any format inferred from the extension)
    pub fn save(&self, path: &Path) -> Result<()> {
        self.canvas
            .save(path)
            .with_context(|| format!("Failed to write overlay image: {:?}", path))
    }
}

/// Load a font file for label rendering
pub fn load_font(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read font: {:?}", path))?;
    FontArc::try_from_vec(data).with_context(|| format!("Invalid font file: {:?}", path))
}

impl Surface for CanvasSurface {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &TextPaint) {
        let Some(font) = &self.font else {
            if !self.warned_no_font {
                warn!("No font loaded, labels will not be rasterized");
                self.warned_no_font = true;
            }
            return;
        };

        let scale = PxScale::from(paint.text_size);
        // imageproc positions text by its top edge; y is the baseline
        let ascent = font.as_scaled(scale).ascent();
        draw_text_mut(
            &mut self.canvas,
            Rgba(paint.color),
            x.round() as i32,
            (y - ascent).round() as i32,
            scale,
            font,
            text,
        );
    }

    fn draw_image(&mut self, badge: &Badge, x: f32, y: f32, _paint: &TextPaint) {
        image::imageops::overlay(&mut self.canvas, &badge.image, x.round() as i64, y.round() as i64);
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &RectPaint) {
        let strokes = paint.stroke_width.round().max(1.0) as i32;
        for inset in 0..strokes {
            let width = rect.width().round() as i32 - inset * 2;
            let height = rect.height().round() as i32 - inset * 2;
            if width <= 0 || height <= 0 {
                break;
            }
            draw_hollow_rect_mut(
                &mut self.canvas,
                imageproc::rect::Rect::at(rect.left.round() as i32 + inset, rect.top.round() as i32 + inset)
                    .of_size(width as u32, height as u32),
                Rgba(paint.color),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BadgeKind, ProductFamily};

    fn badge() -> Badge {
        Badge {
            family: ProductFamily::Luna,
            kind: BadgeKind::Sodium,
            image: RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255])),
        }
    }

    #[test]
    fn test_image_composited_at_position() {
        let mut surface = CanvasSurface::blank(20, 20);

        surface.draw_image(&badge(), 5.0, 6.0, &TextPaint::default());

        let image = surface.image();
        assert_eq!(*image.get_pixel(5, 6), Rgba([10, 20, 30, 255]));
        assert_eq!(*image.get_pixel(8, 7), Rgba([10, 20, 30, 255]));
        assert_eq!(image.get_pixel(9, 6)[3], 0);
        assert_eq!(image.get_pixel(5, 8)[3], 0);
    }

    #[test]
    fn test_image_clipped_at_canvas_edge() {
        let mut surface = CanvasSurface::blank(6, 6);

        surface.draw_image(&badge(), 4.0, 5.0, &TextPaint::default());

        assert_eq!(*surface.image().get_pixel(5, 5), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut surface = CanvasSurface::blank(10, 10);

        surface.draw_text("Welch's", 0.0, 9.0, &TextPaint::default());

        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_rect_outline_stroke() {
        let mut surface = CanvasSurface::blank(20, 20);
        let paint = RectPaint { color: [255, 255, 255, 255], stroke_width: 2.0 };

        surface.draw_rect(&Rect::new(2.0, 2.0, 12.0, 12.0), &paint);

        let image = surface.image();
        assert_eq!(image.get_pixel(2, 2)[3], 255);
        assert_eq!(image.get_pixel(3, 3)[3], 255);
        assert_eq!(image.get_pixel(7, 7)[3], 0);
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"not a font").unwrap();

        assert!(load_font(temp.path()).is_err());
    }
}
