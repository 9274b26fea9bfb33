//! Deterministic price computation.
//!
//! The total is the garment's base price plus every applicable add-on:
//! enabled optional layers, selected colors on visible layers, and the logo
//! and text surcharges. The computation is pure, never fails, and silently
//! skips selections it cannot resolve against the garment.

use crate::customization::CustomizationState;
use crate::garment::Garment;

/// Flat surcharge for the logo option.
pub const LOGO_SURCHARGE: f64 = 10.0;

/// Flat surcharge for the text option.
pub const TEXT_SURCHARGE: f64 = 7.0;

/// Computes the total price for a customization.
///
/// Guarantees `total >= garment.base_price`: every contribution is clamped
/// to be non-negative, and dangling layer or color references contribute
/// nothing. A color selected on a disabled optional layer is excluded until
/// the layer is enabled.
///
/// # Example
///
/// ```
/// use garment_studio::{compute_total_price, CustomizationState, Garment};
///
/// let garment = Garment::new("g1", "Leotard", 20.0);
/// let state = CustomizationState::new();
/// assert_eq!(compute_total_price(&garment, &state), 20.0);
/// ```
pub fn compute_total_price(garment: &Garment, state: &CustomizationState) -> f64 {
    let mut total = garment.base_price.max(0.0);

    // Flat add-ons for enabled optional layers.
    for (layer_id, enabled) in &state.optional_layers {
        if !enabled {
            continue;
        }
        if let Some(layer) = garment.layer(layer_id) {
            if layer.is_optional {
                total += layer.price.max(0.0);
            }
        }
    }

    // Color deltas, only where the carrying layer is currently visible.
    for (layer_id, color) in &state.layer_colors {
        let Some(layer) = garment.layer(layer_id) else {
            continue;
        };
        if !layer.is_optional || state.optional_layer_enabled(layer_id) {
            total += color.price.max(0.0);
        }
    }

    if state.logo.enabled {
        total += LOGO_SURCHARGE;
    }
    if state.text.enabled {
        total += TEXT_SURCHARGE;
    }

    total
}

/// Formats a price for display with two decimals (e.g. `"$57.50"`).
///
/// Display formatting is a presentation concern; [`compute_total_price`]
/// itself never rounds.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

// ============================================================================
// Tests
// ============================================================================
