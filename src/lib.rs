//! NutritionLens - product label overlay
//!
//! Matches text found by a detector against known product labels and draws
//! the product name with a stack of nutrition badges beneath each match.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod overlay;
pub mod storage;
pub mod vision;

pub use assets::{AssetError, Badge, BadgeCache, BadgeSet};
pub use catalog::{BadgeKind, LabelCatalog, ProductFamily, ProductMatch};
pub use overlay::frame::{CoordinateFrame, CoordinateMapper};
pub use overlay::graphic::{AnnotatedRegion, TextGraphic};
pub use overlay::surface::{DrawCommand, RecordingSurface, Surface};
pub use overlay::widgets::OverlayStyle;
pub use overlay::GraphicOverlay;
pub use vision::{DetectedFrame, Rect, TextRegion};
