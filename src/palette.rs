//! Color palettes available for recolorable garment layers.
//!
//! Palettes are a fixed, read-only catalog: the admin assigns a palette to a
//! layer by id, and the customer picks one of its colors at customization
//! time. Each color carries a price delta that the pricing engine adds when
//! the color is active on a visible layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Color
// ============================================================================

/// A single selectable color within a palette.
///
/// `value` is an opaque CSS color string (e.g. `"#C8102E"`); the engine
/// passes it through to render instructions without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// Identifier, unique within its palette.
    pub id: String,
    /// Display name (e.g. "Scarlet").
    pub name: String,
    /// CSS color value used as the tint.
    pub value: String,
    /// Non-negative price delta added when this color is selected.
    pub price: f64,
}

impl Color {
    /// Creates a color with a negative price clamped to zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
            price: price.max(0.0),
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// An ordered set of colors, looked up by id from the [`PaletteCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: String,
    pub name: String,
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn new(id: impl Into<String>, name: impl Into<String>, colors: Vec<Color>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors,
        }
    }

    /// Looks up a color by id.
    pub fn color(&self, color_id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == color_id)
    }

    /// Returns true if the palette contains the given color id.
    pub fn contains(&self, color_id: &str) -> bool {
        self.color(color_id).is_some()
    }
}

// ============================================================================
// PaletteCatalog
// ============================================================================

/// Registry of named palettes, read-only at customization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteCatalog {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of palettes. Later entries with a
    /// duplicate id replace earlier ones.
    pub fn from_palettes(palettes: Vec<Palette>) -> Self {
        let mut catalog = Self::new();
        for palette in palettes {
            catalog.insert(palette);
        }
        catalog
    }

    /// The stock palettes shipped with the studio.
    pub fn preset() -> Self {
        Self::from_palettes(vec![
            Palette::new(
                "lycra",
                "Lycra",
                vec![
                    Color::new("white", "White", "#FFFFFF", 0.0),
                    Color::new("black", "Black", "#1A1A1A", 0.0),
                    Color::new("royal", "Royal Blue", "#2244AA", 0.0),
                    Color::new("scarlet", "Scarlet", "#C8102E", 0.0),
                    Color::new("emerald", "Emerald", "#0E7C4A", 2.5),
                    Color::new("gold", "Metallic Gold", "#D4AF37", 5.0),
                ],
            ),
            Palette::new(
                "velvet",
                "Velvet",
                vec![
                    Color::new("midnight", "Midnight", "#101828", 0.0),
                    Color::new("burgundy", "Burgundy", "#6E1423", 3.0),
                    Color::new("forest", "Forest", "#14452F", 3.0),
                    Color::new("plum", "Plum", "#4A2545", 4.0),
                ],
            ),
        ])
    }

    /// Adds or replaces a palette.
    pub fn insert(&mut self, palette: Palette) {
        self.palettes.insert(palette.id.clone(), palette);
    }

    /// Looks up a palette by id.
    pub fn get(&self, palette_id: &str) -> Option<&Palette> {
        self.palettes.get(palette_id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Iterates palettes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.values()
    }
}

// ============================================================================
// Tests
// ============================================================================
