//! Label Catalog
//!
//! Maps raw recognized text to a known product. Rules are checked in a fixed
//! order and the first hit wins; later rules are broader substring checks, so
//! the order is part of the behavior. Matching is case-sensitive with no
//! trimming or normalization.

use serde::{Deserialize, Serialize};

/// Known product families with a nutrition badge set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFamily {
    Welchs,
    Luna,
    NatureValleyCrunchy,
}

impl ProductFamily {
    pub const ALL: [ProductFamily; 3] = [
        ProductFamily::Welchs,
        ProductFamily::Luna,
        ProductFamily::NatureValleyCrunchy,
    ];

    /// Label drawn in place of the recognized text
    pub fn display_label(self) -> &'static str {
        match self {
            ProductFamily::Welchs => "Welch's Fruit Snacks",
            ProductFamily::Luna => "Luna: Whole Nutrition Bar",
            ProductFamily::NatureValleyCrunchy => "Nature Valley Crunchy Bar",
        }
    }

    /// Suffix used in badge asset file names
    pub fn asset_suffix(self) -> &'static str {
        match self {
            ProductFamily::Welchs => "welchs",
            ProductFamily::Luna => "luna",
            ProductFamily::NatureValleyCrunchy => "nv",
        }
    }
}

/// Nutrition facts shown as badges, in stacking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    SaturatedFat,
    Sodium,
    Calories,
    Sugars,
}

impl BadgeKind {
    /// Top-to-bottom stacking order
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::SaturatedFat,
        BadgeKind::Sodium,
        BadgeKind::Calories,
        BadgeKind::Sugars,
    ];

    /// Prefix used in badge asset file names
    pub fn asset_stem(self) -> &'static str {
        match self {
            BadgeKind::SaturatedFat => "saturatedfat",
            BadgeKind::Sodium => "sodium",
            BadgeKind::Calories => "calories",
            BadgeKind::Sugars => "sugars",
        }
    }
}

/// Result of looking up a piece of recognized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMatch {
    /// A product family with its badge set
    Product(ProductFamily),
    /// Text substitution only, no badges
    Alias(&'static str),
    /// No rule matched
    Unknown,
}

impl ProductMatch {
    /// Replacement label, if any rule matched
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ProductMatch::Product(family) => Some(family.display_label()),
            ProductMatch::Alias(label) => Some(*label),
            ProductMatch::Unknown => None,
        }
    }

    /// Product family carrying a badge set
    pub fn family(&self) -> Option<ProductFamily> {
        match self {
            ProductMatch::Product(family) => Some(*family),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ProductMatch::Unknown)
    }
}

/// How a rule compares against the raw text
#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Contains(&'static str),
}

impl Pattern {
    fn matches(self, text: &str) -> bool {
        match self {
            Pattern::Exact(literal) => text == literal,
            Pattern::Contains(needle) => text.contains(needle),
        }
    }
}

/// A single catalog rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pattern: Pattern,
    resolves: ProductMatch,
    /// Whether `is_known` accepts text matching this rule
    fast_path: bool,
}

const STANDARD_RULES: &[Rule] = &[
    Rule {
        pattern: Pattern::Exact("FAMILY FARMER OWNED"),
        resolves: ProductMatch::Product(ProductFamily::Welchs),
        fast_path: true,
    },
    Rule {
        pattern: Pattern::Contains("OWNED"),
        resolves: ProductMatch::Product(ProductFamily::Welchs),
        fast_path: true,
    },
    Rule {
        pattern: Pattern::Exact("Welch's"),
        resolves: ProductMatch::Product(ProductFamily::Welchs),
        fast_path: true,
    },
    // Resolves in lookup but is rejected by is_known, so draw never shows it.
    Rule {
        pattern: Pattern::Exact("Jeremy Ho"),
        resolves: ProductMatch::Alias("Wewlad"),
        fast_path: false,
    },
    Rule {
        pattern: Pattern::Contains("LUNA"),
        resolves: ProductMatch::Product(ProductFamily::Luna),
        fast_path: true,
    },
    Rule {
        pattern: Pattern::Contains("CRUNCHY"),
        resolves: ProductMatch::Product(ProductFamily::NatureValleyCrunchy),
        fast_path: true,
    },
];

/// Ordered rule table for product label lookup
#[derive(Debug, Clone, Copy)]
pub struct LabelCatalog {
    rules: &'static [Rule],
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LabelCatalog {
    /// The product catalog shipped with the overlay
    pub const fn standard() -> Self {
        Self { rules: STANDARD_RULES }
    }

    /// Resolve raw text to a product, first matching rule wins
    pub fn lookup(&self, raw: &str) -> ProductMatch {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(raw))
            .map(|rule| rule.resolves)
            .unwrap_or(ProductMatch::Unknown)
    }

    /// Label to draw for raw text; unknown text passes through unchanged
    pub fn display<'a>(&self, raw: &'a str) -> &'a str {
        match self.lookup(raw).label() {
            Some(label) => label,
            None => raw,
        }
    }

    /// Fast-path filter used before drawing
    pub fn is_known(&self, raw: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.fast_path && rule.pattern.matches(raw))
    }
}
