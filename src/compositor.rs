//! Layer resolution: turning a garment plus a customization into paint order.
//!
//! The compositor decides *what* to render, never *how*: it emits
//! [`RenderInstruction`]s (image reference, tint, adjustment settings,
//! z-order) sorted bottom-to-top, plus the logo and text overlays that always
//! sit above the garment stack. A renderer consumes this list verbatim.

use serde::{Deserialize, Serialize};

use crate::customization::{CustomizationState, View};
use crate::garment::{ColorSettings, Garment, LayerKind};

/// Tint applied to fixed-tint layers (shadow and highlight overlays).
pub const FIXED_TINT_COLOR: &str = "#000000";

/// Z-order of the logo overlay, above any garment layer.
pub const LOGO_Z_INDEX: i32 = 100;

/// Z-order of the text overlay, above the logo.
pub const TEXT_Z_INDEX: i32 = 101;

/// Rendered width of the logo overlay in preview pixels.
pub const LOGO_WIDTH_PX: u32 = 150;

/// A point in unit coordinates relative to the preview square, (0,0) top
/// left. Overlays are centered on their anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Where the logo overlay is centered: horizontally centered, upper third.
pub const LOGO_ANCHOR: Anchor = Anchor { x: 0.5, y: 1.0 / 3.0 };

/// Where the text overlay is centered: horizontally centered, lower third.
pub const TEXT_ANCHOR: Anchor = Anchor { x: 0.5, y: 2.0 / 3.0 };

// ============================================================================
// Render instructions
// ============================================================================

/// One garment layer ready to paint: the greyscale artwork plus an optional
/// tint overlay with its adjustment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInstruction {
    pub layer_id: String,
    pub image_ref: String,
    pub z_index: i32,
    /// CSS color of the tint overlay; `None` renders the raw artwork.
    pub tint: Option<String>,
    pub opacity: f64,
    pub brightness: f64,
    pub contrast: f64,
}

/// Logo overlay, painted above every garment layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoOverlay {
    pub image_ref: String,
    pub z_index: i32,
    pub width_px: u32,
    pub anchor: Anchor,
}

/// Text overlay, painted above the logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub content: String,
    pub font: String,
    pub color: String,
    pub z_index: i32,
    pub anchor: Anchor,
}

/// Everything a renderer needs for one frame, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// Garment layers, bottom to top.
    pub layers: Vec<RenderInstruction>,
    pub logo: Option<LogoOverlay>,
    pub text: Option<TextOverlay>,
}

impl RenderPlan {
    /// Resolves the full paint plan for a garment and customization.
    pub fn resolve(garment: &Garment, state: &CustomizationState) -> Self {
        Self {
            layers: resolve_render_layers(garment, state),
            logo: resolve_logo_overlay(garment, state),
            text: resolve_text_overlay(garment, state),
        }
    }
}

// ============================================================================
// Layer resolution
// ============================================================================

/// Resolves the garment layer stack into ordered render instructions.
///
/// - The back view renders nothing: only front-side layer sets exist today,
///   and an empty plan is the documented behavior rather than a fallback.
/// - Optional layers are dropped unless enabled.
/// - Tint resolution dispatches on [`LayerKind`]: a recolorable layer tints
///   with its selected color (per-color settings, or neutral defaults), a
///   fixed-tint layer always tints [`FIXED_TINT_COLOR`], a plain layer
///   renders raw.
/// - Output is sorted by ascending z-index, stable on ties, and is exactly
///   the paint order bottom-to-top.
///
/// Never mutates its inputs and never fails; unresolvable selections fall
/// back to rendering the raw artwork.
pub fn resolve_render_layers(
    garment: &Garment,
    state: &CustomizationState,
) -> Vec<RenderInstruction> {
    if state.view == View::Back {
        return Vec::new();
    }

    let mut instructions: Vec<RenderInstruction> = garment
        .layers
        .iter()
        .filter(|layer| !layer.is_optional || state.optional_layer_enabled(&layer.id))
        .map(|layer| {
            let (tint, settings) = match &layer.kind {
                LayerKind::Recolorable { color_settings, .. } => {
                    match state.selected_color(&layer.id) {
                        Some(color) => {
                            let settings = color_settings
                                .get(&color.id)
                                .copied()
                                .unwrap_or_default();
                            (Some(color.value.clone()), settings)
                        }
                        // No selection yet: raw greyscale artwork.
                        None => (None, ColorSettings::default()),
                    }
                }
                LayerKind::FixedTint { settings } => {
                    (Some(FIXED_TINT_COLOR.to_string()), *settings)
                }
                LayerKind::Plain => (None, ColorSettings::default()),
            };
            RenderInstruction {
                layer_id: layer.id.clone(),
                image_ref: layer.image_ref.clone(),
                z_index: layer.z_index,
                tint,
                opacity: settings.opacity,
                brightness: settings.brightness,
                contrast: settings.contrast,
            }
        })
        .collect();

    instructions.sort_by_key(|i| i.z_index);
    instructions
}

/// Resolves the logo overlay, if one should be painted.
///
/// Requires the garment to offer the option, the customer to have enabled it
/// with a moderated image attached, and the front view.
pub fn resolve_logo_overlay(garment: &Garment, state: &CustomizationState) -> Option<LogoOverlay> {
    if state.view == View::Back || !garment.enabled_options.logo || !state.logo.enabled {
        return None;
    }
    let image_ref = state.logo.image_ref.clone()?;
    Some(LogoOverlay {
        image_ref,
        z_index: LOGO_Z_INDEX,
        width_px: LOGO_WIDTH_PX,
        anchor: LOGO_ANCHOR,
    })
}

/// Resolves the text overlay, if one should be painted. Empty content paints
/// nothing even when the option is enabled.
pub fn resolve_text_overlay(garment: &Garment, state: &CustomizationState) -> Option<TextOverlay> {
    if state.view == View::Back || !garment.enabled_options.text || !state.text.enabled {
        return None;
    }
    if state.text.content.is_empty() {
        return None;
    }
    Some(TextOverlay {
        content: state.text.content.clone(),
        font: state.text.font.clone(),
        color: state.text.color.clone(),
        z_index: TEXT_Z_INDEX,
        anchor: TEXT_ANCHOR,
    })
}

// ============================================================================
// Tests
// ============================================================================
