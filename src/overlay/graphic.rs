//! Text block graphic
//!
//! Draws the product label and nutrition badges for each line of one detected
//! text block, and answers hit-tests against the block's view-space bounds.

use std::collections::HashMap;
use tracing::debug;

use crate::assets::{AssetError, BadgeCache, BadgeSet};
use crate::catalog::{LabelCatalog, ProductFamily, ProductMatch};
use crate::overlay::frame::{CoordinateFrame, CoordinateMapper, SharedFrame};
use crate::overlay::surface::Surface;
use crate::overlay::widgets::OverlayStyle;
use crate::vision::{Rect, TextRegion};

/// Vertical distance between stacked badges
pub const BADGE_SPACING: f32 = 200.0;
/// Extra height below the block covered by hit-tests (the badge stack)
pub const HIT_MARGIN: f32 = 600.0;

/// One text component resolved for the current draw pass
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRegion {
    pub source_text: String,
    pub screen_rect: Rect,
    /// `None` when the text is not drawable
    pub matched: Option<ProductMatch>,
}

impl AnnotatedRegion {
    /// Resolve a component against the catalog and the active frame
    pub fn resolve(
        component: &TextRegion,
        frame: &CoordinateFrame,
        catalog: &LabelCatalog,
    ) -> Self {
        let found = catalog.lookup(&component.value);
        let matched = if found.is_unknown() || !catalog.is_known(&component.value) {
            None
        } else {
            Some(found)
        };

        Self {
            source_text: component.value.clone(),
            screen_rect: frame.map_rect(&component.rect),
            matched,
        }
    }
}

/// Overlay graphic for one detected text block
pub struct TextGraphic {
    id: u32,
    block: Option<TextRegion>,
    frame: SharedFrame,
    catalog: LabelCatalog,
    badges: HashMap<ProductFamily, BadgeSet>,
}

impl TextGraphic {
    /// Create a graphic, resolving every family's badge set up front
    pub fn new(
        block: Option<TextRegion>,
        frame: SharedFrame,
        cache: &BadgeCache,
    ) -> Result<Self, AssetError> {
        let mut badges = HashMap::new();
        for family in ProductFamily::ALL {
            badges.insert(family, cache.badge_set(family)?);
        }

        Ok(Self {
            id: 0,
            block,
            frame,
            catalog: LabelCatalog::standard(),
            badges,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn text_block(&self) -> Option<&TextRegion> {
        self.block.as_ref()
    }

    /// Resolve each line of the block against the current frame
    pub fn annotate(&self) -> Vec<AnnotatedRegion> {
        let Some(block) = &self.block else {
            return Vec::new();
        };
        let frame = *self.frame.read();

        block
            .components
            .iter()
            .map(|component| AnnotatedRegion::resolve(component, &frame, &self.catalog))
            .collect()
    }

    /// Draw labels and badges for every recognized line, in detection order
    pub fn draw(&self, surface: &mut dyn Surface, style: &OverlayStyle) {
        let paint = style.text.for_draw();

        for region in self.annotate() {
            let Some(matched) = region.matched else {
                debug!("Skipping unmatched text {:?}", region.source_text);
                continue;
            };
            let Some(label) = matched.label() else {
                continue;
            };

            let left = region.screen_rect.left;
            let bottom = region.screen_rect.bottom;

            if style.outline_regions {
                surface.draw_rect(&region.screen_rect, &style.rect);
            }
            surface.draw_text(label, left, bottom, &paint);

            let Some(set) = matched.family().and_then(|family| self.badges.get(&family)) else {
                continue;
            };
            for (slot, badge) in set.iter().enumerate() {
                surface.draw_image(badge, left, bottom + BADGE_SPACING * slot as f32, &paint);
            }
        }
    }

    /// Whether a view-space point falls on the block or its badge stack
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let Some(block) = &self.block else {
            return false;
        };
        let frame = *self.frame.read();

        let mut rect = frame.map_rect(&block.rect);
        rect.bottom += HIT_MARGIN;
        rect.contains_strict(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::in_memory_cache;
    use crate::catalog::BadgeKind;
    use crate::overlay::surface::{DrawCommand, RecordingSurface};

    fn block_of(lines: Vec<TextRegion>) -> TextRegion {
        TextRegion::new("block", Rect::new(0.0, 0.0, 100.0, 20.0)).with_components(lines)
    }

    fn graphic(block: Option<TextRegion>, frame: CoordinateFrame) -> TextGraphic {
        TextGraphic::new(block, frame.shared(), &in_memory_cache()).unwrap()
    }

    fn draw(graphic: &TextGraphic) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new();
        graphic.draw(&mut surface, &OverlayStyle::default());
        surface.into_commands()
    }

    fn image(family: ProductFamily, kind: BadgeKind, x: f32, y: f32) -> DrawCommand {
        DrawCommand::Image { family, kind, x, y }
    }

    #[test]
    fn test_welchs_draw_sequence() {
        let line = TextRegion::new("Welch's", Rect::new(0.0, 0.0, 100.0, 20.0));
        let graphic = graphic(Some(block_of(vec![line])), CoordinateFrame::identity());

        let commands = draw(&graphic);

        assert_eq!(
            commands,
            vec![
                DrawCommand::Text { text: "Welch's Fruit Snacks".to_string(), x: 0.0, y: 20.0 },
                image(ProductFamily::Welchs, BadgeKind::SaturatedFat, 0.0, 20.0),
                image(ProductFamily::Welchs, BadgeKind::Sodium, 0.0, 220.0),
                image(ProductFamily::Welchs, BadgeKind::Calories, 0.0, 420.0),
                image(ProductFamily::Welchs, BadgeKind::Sugars, 0.0, 620.0),
            ]
        );
    }

    #[test]
    fn test_draw_uses_mapped_left_and_bottom() {
        let line = TextRegion::new("LUNA BAR", Rect::new(10.0, 5.0, 60.0, 15.0));
        let frame = CoordinateFrame::new(2.0, 3.0, 1.0, 4.0);
        let graphic = graphic(Some(block_of(vec![line])), frame);

        let commands = draw(&graphic);

        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::Text { text: "Luna: Whole Nutrition Bar".to_string(), x: 21.0, y: 49.0 }
        );
        assert_eq!(commands[4], image(ProductFamily::Luna, BadgeKind::Sugars, 21.0, 649.0));
    }

    #[test]
    fn test_unknown_and_alias_lines_are_skipped() {
        let lines = vec![
            TextRegion::new("banana", Rect::new(0.0, 0.0, 10.0, 10.0)),
            TextRegion::new("Jeremy Ho", Rect::new(0.0, 10.0, 10.0, 20.0)),
            TextRegion::new("CRUNCHY", Rect::new(0.0, 20.0, 10.0, 30.0)),
        ];
        let graphic = graphic(Some(block_of(lines)), CoordinateFrame::identity());

        let commands = draw(&graphic);

        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::Text { text: "Nature Valley Crunchy Bar".to_string(), x: 0.0, y: 30.0 }
        );
        assert!(commands[1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Image { family: ProductFamily::NatureValleyCrunchy, .. })));
    }

    #[test]
    fn test_lines_draw_in_detection_order() {
        let lines = vec![
            TextRegion::new("CRUNCHY", Rect::new(0.0, 0.0, 10.0, 10.0)),
            TextRegion::new("Welch's", Rect::new(50.0, 0.0, 60.0, 10.0)),
        ];
        let graphic = graphic(Some(block_of(lines)), CoordinateFrame::identity());

        let labels: Vec<String> = draw(&graphic)
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();

        assert_eq!(labels, vec!["Nature Valley Crunchy Bar", "Welch's Fruit Snacks"]);
    }

    #[test]
    fn test_absent_block_draws_nothing() {
        let graphic = graphic(None, CoordinateFrame::identity());

        assert!(draw(&graphic).is_empty());
        assert!(!graphic.contains(1.0, 1.0));
    }

    #[test]
    fn test_outline_precedes_label() {
        let line = TextRegion::new("Welch's", Rect::new(0.0, 0.0, 100.0, 20.0));
        let graphic = graphic(Some(block_of(vec![line])), CoordinateFrame::identity());
        let style = OverlayStyle { outline_regions: true, ..Default::default() };

        let mut surface = RecordingSurface::new();
        graphic.draw(&mut surface, &style);

        assert_eq!(
            surface.commands()[0],
            DrawCommand::Rect { rect: Rect::new(0.0, 0.0, 100.0, 20.0) }
        );
        assert_eq!(surface.commands().len(), 6);
    }

    #[test]
    fn test_contains_edges_are_exclusive() {
        let graphic = graphic(Some(block_of(Vec::new())), CoordinateFrame::identity());

        assert!(!graphic.contains(100.0, 10.0));
        assert!(graphic.contains(99.0, 10.0));
        assert!(!graphic.contains(0.0, 10.0));
        assert!(!graphic.contains(50.0, 0.0));
    }

    #[test]
    fn test_contains_covers_badge_margin() {
        let graphic = graphic(Some(block_of(Vec::new())), CoordinateFrame::identity());

        // Block bottom is 20; the margin extends it to 620
        assert!(graphic.contains(50.0, 20.0 + 550.0));
        assert!(graphic.contains(50.0, 619.0));
        assert!(!graphic.contains(50.0, 620.0));
        assert!(!graphic.contains(50.0, 20.0 + 650.0));
    }

    #[test]
    fn test_contains_follows_frame_updates() {
        let frame = CoordinateFrame::identity().shared();
        let graphic = TextGraphic::new(
            Some(block_of(Vec::new())),
            frame.clone(),
            &in_memory_cache(),
        )
        .unwrap();

        assert!(!graphic.contains(150.0, 10.0));
        *frame.write() = CoordinateFrame::new(2.0, 1.0, 0.0, 0.0);
        assert!(graphic.contains(150.0, 10.0));
    }

    #[test]
    fn test_annotate_keeps_every_line() {
        let lines = vec![
            TextRegion::new("banana", Rect::new(0.0, 0.0, 10.0, 10.0)),
            TextRegion::new("LUNA", Rect::new(0.0, 10.0, 10.0, 20.0)),
        ];
        let graphic = graphic(Some(block_of(lines)), CoordinateFrame::new(2.0, 2.0, 0.0, 0.0));

        let regions = graphic.annotate();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].matched, None);
        assert_eq!(regions[1].matched, Some(ProductMatch::Product(ProductFamily::Luna)));
        assert_eq!(regions[1].screen_rect, Rect::new(0.0, 20.0, 20.0, 40.0));
    }

    #[test]
    fn test_missing_badges_fail_construction() {
        let cache = BadgeCache::new(tempfile::TempDir::new().unwrap().path());
        let result = TextGraphic::new(None, CoordinateFrame::identity().shared(), &cache);

        assert!(result.is_err());
    }
}
