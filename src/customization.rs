//! A customer's in-progress selections.
//!
//! [`CustomizationState`] is owned by exactly one UI session; the pricing and
//! compositing functions only ever read it. Selections are allowed to go
//! stale (e.g. a color chosen for a layer the admin has since deleted); the
//! engine silently skips anything it cannot resolve, and
//! [`CustomizationState::retain_valid`] can prune such leftovers explicitly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::garment::Garment;
use crate::palette::Color;

/// Default font stack offered by the text option.
pub const DEFAULT_TEXT_FONT: &str = "Arial, sans-serif";

/// Which side of the garment the preview shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Front,
    Back,
}

/// Logo option state: the toggle and, once an upload has passed moderation,
/// the image it points at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSelection {
    pub enabled: bool,
    pub image_ref: Option<String>,
}

/// Text option state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSelection {
    pub enabled: bool,
    pub content: String,
    pub font: String,
    pub color: String,
}

impl Default for TextSelection {
    fn default() -> Self {
        Self {
            enabled: false,
            content: String::new(),
            font: DEFAULT_TEXT_FONT.to_string(),
            color: "#000000".to_string(),
        }
    }
}

/// Everything the customer has picked so far.
///
/// Ephemeral: lives for the duration of a browsing session and is never
/// persisted. The selected [`Color`] is stored whole, so pricing and tinting
/// need no palette lookup at read time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationState {
    /// Selected color per recolorable layer, keyed by layer id.
    pub layer_colors: BTreeMap<String, Color>,
    /// Enabled flag per optional layer, keyed by layer id.
    pub optional_layers: BTreeMap<String, bool>,
    pub logo: LogoSelection,
    pub text: TextSelection,
    pub view: View,
}

impl CustomizationState {
    /// A pristine state: nothing selected, front view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a color choice for a layer, replacing any previous choice.
    pub fn select_color(&mut self, layer_id: impl Into<String>, color: Color) {
        self.layer_colors.insert(layer_id.into(), color);
    }

    /// Returns the selected color for a layer, if any.
    pub fn selected_color(&self, layer_id: &str) -> Option<&Color> {
        self.layer_colors.get(layer_id)
    }

    /// Enables or disables an optional layer. The color selection for the
    /// layer is kept either way, so re-enabling restores the prior look.
    pub fn set_optional_layer(&mut self, layer_id: impl Into<String>, enabled: bool) {
        self.optional_layers.insert(layer_id.into(), enabled);
    }

    /// Returns true if the optional layer with this id is enabled.
    pub fn optional_layer_enabled(&self, layer_id: &str) -> bool {
        self.optional_layers.get(layer_id).copied().unwrap_or(false)
    }

    pub fn set_logo_enabled(&mut self, enabled: bool) {
        self.logo.enabled = enabled;
    }

    /// Attaches a moderated logo image, or clears it with `None`.
    pub fn set_logo_image(&mut self, image_ref: Option<String>) {
        self.logo.image_ref = image_ref;
    }

    pub fn set_text_enabled(&mut self, enabled: bool) {
        self.text.enabled = enabled;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Drops selections that reference layers no longer present on the
    /// garment. Useful when an admin preview keeps a live state across layer
    /// deletions; the engine tolerates stale entries without this.
    pub fn retain_valid(&mut self, garment: &Garment) {
        self.layer_colors
            .retain(|layer_id, _| garment.layer(layer_id).is_some());
        self.optional_layers
            .retain(|layer_id, _| garment.layer(layer_id).is_some());
    }
}

// ============================================================================
// Tests
// ============================================================================
