//! Garment definitions: the admin-authored product description.
//!
//! A [`Garment`] is a base price plus an ordered stack of [`GarmentLayer`]s.
//! Each layer is one of three kinds (see [`LayerKind`]): recolorable through a
//! palette, fixed-tint (e.g. a shadow overlay), or plain artwork. The garment
//! also declares which customer-facing options (logo, text) are offered.
//!
//! Garments are immutable from the engine's point of view; the admin-side
//! editing helpers here exist for the product workshop, not the customizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// ColorSettings
// ============================================================================

/// Tint adjustment applied when a layer's color overlay is rendered.
///
/// Opacity is clamped to `[0, 1]`; brightness and contrast to `[0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSettings {
    pub opacity: f64,
    pub brightness: f64,
    pub contrast: f64,
}

impl Default for ColorSettings {
    /// Neutral settings: fully opaque, no brightness or contrast change.
    fn default() -> Self {
        Self {
            opacity: 1.0,
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

impl ColorSettings {
    /// Creates settings with out-of-range values clamped.
    pub fn new(opacity: f64, brightness: f64, contrast: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            brightness: brightness.clamp(0.0, 2.0),
            contrast: contrast.clamp(0.0, 2.0),
        }
    }
}

// ============================================================================
// LayerKind
// ============================================================================

/// How a layer resolves its tint at render time.
///
/// Modeled as an explicit variant rather than optional-field inspection so
/// the compositor's dispatch is exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// The customer picks a color from the referenced palette; per-color
    /// adjustment settings are keyed by color id.
    Recolorable {
        palette_id: String,
        color_settings: BTreeMap<String, ColorSettings>,
    },
    /// A single tint applied unconditionally whenever the layer is visible
    /// (shadow and highlight overlays).
    FixedTint { settings: ColorSettings },
    /// Raw artwork, no tint overlay.
    Plain,
}

impl LayerKind {
    /// Returns the palette id for recolorable layers.
    pub fn palette_id(&self) -> Option<&str> {
        match self {
            LayerKind::Recolorable { palette_id, .. } => Some(palette_id),
            _ => None,
        }
    }

    pub fn is_recolorable(&self) -> bool {
        matches!(self, LayerKind::Recolorable { .. })
    }
}

/// Serde key under which a fixed tint's single settings entry is persisted.
const FIXED_TINT_KEY: &str = "fixed";

// ============================================================================
// GarmentLayer
// ============================================================================

/// One image layer in a garment's paint stack.
///
/// `z_index` values need not be contiguous; only relative order matters, and
/// the compositor breaks ties by declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGarmentLayer", into = "RawGarmentLayer")]
pub struct GarmentLayer {
    pub id: String,
    pub name: String,
    /// Reference to the layer's greyscale artwork (data URI or URL).
    pub image_ref: String,
    /// Stacking order, higher paints on top.
    pub z_index: i32,
    /// Flat add-on charged when the layer is optional and enabled.
    pub price: f64,
    pub kind: LayerKind,
    /// Optional layers are visible only when the customer enables them.
    pub is_optional: bool,
    /// Checkbox label shown for optional layers.
    pub optional_label: Option<String>,
}

impl GarmentLayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_ref: image_ref.into(),
            z_index: 0,
            price: 0.0,
            kind: LayerKind::Plain,
            is_optional: false,
            optional_label: None,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price.max(0.0);
        self
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the layer optional with the given checkbox label.
    pub fn optional(mut self, label: impl Into<String>) -> Self {
        self.is_optional = true;
        self.optional_label = Some(label.into());
        self
    }
}

/// Wire shape of a layer: the persisted record keeps the flat
/// `paletteId` / `colorSettings` fields, and [`LayerKind`] is derived from
/// their presence on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGarmentLayer {
    id: String,
    name: String,
    image_ref: String,
    z_index: i32,
    #[serde(default)]
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    palette_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color_settings: Option<BTreeMap<String, ColorSettings>>,
    #[serde(default)]
    is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optional_label: Option<String>,
}

impl From<RawGarmentLayer> for GarmentLayer {
    fn from(raw: RawGarmentLayer) -> Self {
        let kind = match (raw.palette_id, raw.color_settings) {
            (Some(palette_id), color_settings) => LayerKind::Recolorable {
                palette_id,
                color_settings: color_settings.unwrap_or_default(),
            },
            // Without a palette, any settings present act as a single fixed
            // tint; the first entry wins.
            (None, Some(settings)) => match settings.into_values().next() {
                Some(settings) => LayerKind::FixedTint { settings },
                None => LayerKind::Plain,
            },
            (None, None) => LayerKind::Plain,
        };
        Self {
            id: raw.id,
            name: raw.name,
            image_ref: raw.image_ref,
            z_index: raw.z_index,
            price: raw.price.max(0.0),
            kind,
            is_optional: raw.is_optional,
            optional_label: raw.optional_label,
        }
    }
}

impl From<GarmentLayer> for RawGarmentLayer {
    fn from(layer: GarmentLayer) -> Self {
        let (palette_id, color_settings) = match layer.kind {
            LayerKind::Recolorable {
                palette_id,
                color_settings,
            } => (Some(palette_id), Some(color_settings)),
            LayerKind::FixedTint { settings } => (
                None,
                Some(BTreeMap::from([(FIXED_TINT_KEY.to_string(), settings)])),
            ),
            LayerKind::Plain => (None, None),
        };
        Self {
            id: layer.id,
            name: layer.name,
            image_ref: layer.image_ref,
            z_index: layer.z_index,
            price: layer.price,
            palette_id,
            color_settings,
            is_optional: layer.is_optional,
            optional_label: layer.optional_label,
        }
    }
}

// ============================================================================
// Garment
// ============================================================================

/// Customer-facing options a garment offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentOptions {
    pub logo: bool,
    pub text: bool,
}

/// Synthetic id carried by garments that have never been saved.
pub const DRAFT_ID: &str = "g-initial";

/// A customizable product: base price, layer stack, and offered options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garment {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    pub enabled_options: GarmentOptions,
    pub layers: Vec<GarmentLayer>,
}

impl Garment {
    /// Creates an empty garment with the given identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price: base_price.max(0.0),
            enabled_options: GarmentOptions::default(),
            layers: Vec::new(),
        }
    }

    /// The blank garment the admin workshop starts from: one plain base
    /// layer, no options, awaiting a permanent id on first save.
    pub fn draft() -> Self {
        let mut garment = Self::new(DRAFT_ID, "New Custom Garment", 20.0);
        garment.push_layer(GarmentLayer::new(
            "l-base",
            "Base Layer",
            "https://placehold.co/800x800.png",
        ));
        garment
    }

    /// Returns true if this garment has never been persisted.
    pub fn is_draft(&self) -> bool {
        self.id == DRAFT_ID
    }

    /// Looks up a layer by id.
    pub fn layer(&self, layer_id: &str) -> Option<&GarmentLayer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    /// Appends a layer and renumbers the stack.
    pub fn push_layer(&mut self, layer: GarmentLayer) {
        self.layers.push(layer);
        self.renumber_layers();
    }

    /// Removes the layer with the given id. Returns true if one was removed.
    pub fn remove_layer(&mut self, layer_id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != layer_id);
        let removed = self.layers.len() != before;
        if removed {
            self.renumber_layers();
        }
        removed
    }

    /// Moves the layer at `index` one position earlier in the stack
    /// (painted sooner, so further toward the bottom). Returns true if a
    /// move happened.
    pub fn move_layer_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.layers.len() {
            return false;
        }
        self.layers.swap(index, index - 1);
        self.renumber_layers();
        true
    }

    /// Moves the layer at `index` one position toward the top of the stack.
    pub fn move_layer_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.layers.len() {
            return false;
        }
        self.layers.swap(index, index + 1);
        self.renumber_layers();
        true
    }

    /// Reassigns z-indices from sequence position (1-based, steps of 10),
    /// matching how the workshop keeps the stack ordered after edits.
    pub fn renumber_layers(&mut self) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.z_index = (i as i32 + 1) * 10;
        }
    }

    /// Serializes the garment to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the garment to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a garment from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
