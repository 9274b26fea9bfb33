//! Engine Invariant Tests
//!
//! End-to-end checks of the guarantees the pricing engine and compositor
//! make to the UI: price floors, toggle round-trips, paint ordering, and
//! tolerance for stale selections.

use std::collections::BTreeMap;

use garment_studio::{
    Color, ColorSettings, CustomizationState, Garment, GarmentLayer, LayerKind, PaletteCatalog,
    RenderPlan, View, compute_total_price, resolve_render_layers,
};

/// The worked example: base 20, one non-optional recolorable layer, one
/// optional layer at 30, one fixed shadow overlay.
fn studio_garment() -> Garment {
    let mut garment = Garment::new("g1", "New Custom Garment", 20.0);
    garment.enabled_options.logo = true;
    garment.enabled_options.text = true;
    garment.layers = vec![
        GarmentLayer::new("l1", "Base Fabric", "base.png")
            .with_z_index(10)
            .with_kind(LayerKind::Recolorable {
                palette_id: "lycra".into(),
                color_settings: BTreeMap::new(),
            }),
        GarmentLayer::new("l3", "Arm Gauntlets", "gauntlets.png")
            .with_z_index(15)
            .with_price(30.0)
            .with_kind(LayerKind::Recolorable {
                palette_id: "velvet".into(),
                color_settings: BTreeMap::new(),
            })
            .optional("Add Arm Gauntlets?"),
        GarmentLayer::new("l2", "Shadows", "shadow.png")
            .with_z_index(20)
            .with_kind(LayerKind::FixedTint {
                settings: ColorSettings::new(0.15, 1.0, 1.0),
            }),
    ];
    garment
}

fn color(id: &str, price: f64) -> Color {
    Color::new(id, id.to_uppercase(), "#123456", price)
}

#[test]
fn invariant_total_never_below_base_price() {
    let garment = studio_garment();

    // A grab-bag of states, including hostile ones.
    let mut states = vec![CustomizationState::new()];

    let mut s = CustomizationState::new();
    s.select_color("l1", color("c", 0.0));
    s.select_color("dangling", color("c", 50.0));
    s.set_optional_layer("l3", true);
    s.set_optional_layer("also-dangling", true);
    s.set_logo_enabled(true);
    s.set_text_enabled(true);
    states.push(s);

    let mut s = CustomizationState::new();
    s.set_view(View::Back);
    states.push(s);

    for state in &states {
        assert!(compute_total_price(&garment, state) >= garment.base_price);
    }
}

#[test]
fn invariant_optional_toggle_round_trip_is_idempotent() {
    let garment = studio_garment();
    let mut state = CustomizationState::new();
    state.set_optional_layer("l3", true);
    state.select_color("l3", color("burgundy", 3.0));

    let with_layer = compute_total_price(&garment, &state);
    assert_eq!(with_layer, 20.0 + 30.0 + 3.0);

    // Disabling removes both the flat price and the color delta.
    state.set_optional_layer("l3", false);
    assert_eq!(compute_total_price(&garment, &state), 20.0);

    // Re-enabling restores exactly the prior total.
    state.set_optional_layer("l3", true);
    assert_eq!(compute_total_price(&garment, &state), with_layer);
}

#[test]
fn invariant_render_order_is_ascending_and_stable() {
    let mut garment = studio_garment();
    // Two extra layers sharing a z-index with the shadows layer.
    garment.layers.push(
        GarmentLayer::new("tie-a", "Tie A", "a.png").with_z_index(20),
    );
    garment.layers.push(
        GarmentLayer::new("tie-b", "Tie B", "b.png").with_z_index(20),
    );

    let mut state = CustomizationState::new();
    state.set_optional_layer("l3", true);

    let layers = resolve_render_layers(&garment, &state);
    let zs: Vec<i32> = layers.iter().map(|l| l.z_index).collect();
    let mut sorted = zs.clone();
    sorted.sort();
    assert_eq!(zs, sorted);

    let ids: Vec<&str> = layers.iter().map(|l| l.layer_id.as_str()).collect();
    assert_eq!(ids, vec!["l1", "l3", "l2", "tie-a", "tie-b"]);
}

#[test]
fn invariant_plain_layer_renders_untinted_with_neutral_settings() {
    let mut garment = Garment::new("g", "Plain", 0.0);
    garment.push_layer(GarmentLayer::new("p", "Plain Art", "art.png"));

    let layers = resolve_render_layers(&garment, &CustomizationState::new());
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].tint, None);
    assert_eq!(layers[0].opacity, 1.0);
    assert_eq!(layers[0].brightness, 1.0);
    assert_eq!(layers[0].contrast, 1.0);
}

#[test]
fn worked_example_optional_layer_pricing() {
    let garment = studio_garment();
    let mut state = CustomizationState::new();
    assert_eq!(compute_total_price(&garment, &state), 20.0);

    state.set_optional_layer("l3", true);
    assert_eq!(compute_total_price(&garment, &state), 50.0);
}

#[test]
fn worked_example_color_and_logo_pricing() {
    let garment = studio_garment();
    let mut state = CustomizationState::new();
    state.select_color("l1", color("premium", 5.0));
    state.set_logo_enabled(true);

    assert_eq!(
        compute_total_price(&garment, &state),
        garment.base_price + 5.0 + 10.0
    );
}

#[test]
fn color_on_disabled_layer_is_latent_until_enabled() {
    let garment = studio_garment();
    let mut state = CustomizationState::new();

    state.select_color("l3", color("plum", 4.0));
    assert_eq!(compute_total_price(&garment, &state), 20.0);

    state.set_optional_layer("l3", true);
    assert_eq!(compute_total_price(&garment, &state), 20.0 + 30.0 + 4.0);
}

#[test]
fn stale_selection_neither_errors_nor_charges() {
    let mut garment = studio_garment();
    let mut state = CustomizationState::new();
    state.set_optional_layer("l3", true);
    state.select_color("l3", color("plum", 4.0));

    // The admin deletes the layer after the customer selected a color.
    garment.remove_layer("l3");

    assert_eq!(compute_total_price(&garment, &state), 20.0);
    let ids: Vec<String> = resolve_render_layers(&garment, &state)
        .into_iter()
        .map(|l| l.layer_id)
        .collect();
    assert!(!ids.contains(&"l3".to_string()));
}

#[test]
fn preset_palette_selection_end_to_end() {
    let catalog = PaletteCatalog::preset();
    let garment = studio_garment();
    let mut state = CustomizationState::new();

    let gold = catalog.get("lycra").unwrap().color("gold").unwrap().clone();
    state.select_color("l1", gold.clone());

    assert_eq!(
        compute_total_price(&garment, &state),
        garment.base_price + gold.price
    );

    let plan = RenderPlan::resolve(&garment, &state);
    assert_eq!(plan.layers[0].tint.as_deref(), Some(gold.value.as_str()));
}
