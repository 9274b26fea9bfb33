//! garment-studio: product customization pricing and compositing engine
//!
//! An admin builds a garment from image layers and palettes; a customer picks
//! colors, optional layers, a logo, and text. This crate decides what that
//! configuration *costs* and what a renderer must *paint*. It performs no
//! I/O and touches no pixels. Persistence and logo moderation are external
//! collaborators behind traits.
//!
//! # Example
//!
//! ```
//! use garment_studio::{
//!     compute_total_price, CustomizationState, Garment, GarmentLayer, LayerKind,
//!     PaletteCatalog, RenderPlan,
//! };
//!
//! let catalog = PaletteCatalog::preset();
//!
//! let mut garment = Garment::new("g1", "Leotard", 20.0);
//! garment.push_layer(GarmentLayer::new("base", "Base Fabric", "base.png").with_kind(
//!     LayerKind::Recolorable {
//!         palette_id: "lycra".into(),
//!         color_settings: Default::default(),
//!     },
//! ));
//!
//! let mut state = CustomizationState::new();
//! let scarlet = catalog.get("lycra").unwrap().color("scarlet").unwrap().clone();
//! state.select_color("base", scarlet);
//!
//! // Pure functions: call them on every state change.
//! let total = compute_total_price(&garment, &state);
//! assert_eq!(total, 20.0);
//!
//! let plan = RenderPlan::resolve(&garment, &state);
//! assert_eq!(plan.layers[0].tint.as_deref(), Some("#C8102E"));
//! ```
//!
//! # Ownership model
//!
//! The engine holds no state. The caller owns one mutable
//! [`CustomizationState`] per session and passes it, together with the
//! immutable [`Garment`], into [`compute_total_price`] and
//! [`RenderPlan::resolve`] on every change. Both functions are
//! deterministic, reentrant, and never fail: selections that no longer
//! resolve against the garment are silently skipped.

mod compositor;
mod customization;
mod garment;
mod moderation;
mod palette;
mod pricing;
mod repository;
mod upload;

pub use compositor::{
    Anchor, FIXED_TINT_COLOR, LOGO_ANCHOR, LOGO_WIDTH_PX, LOGO_Z_INDEX, LogoOverlay,
    RenderInstruction, RenderPlan, TEXT_ANCHOR, TEXT_Z_INDEX, TextOverlay, resolve_logo_overlay,
    resolve_render_layers, resolve_text_overlay,
};
pub use customization::{
    CustomizationState, DEFAULT_TEXT_FONT, LogoSelection, TextSelection, View,
};
pub use garment::{ColorSettings, DRAFT_ID, Garment, GarmentLayer, GarmentOptions, LayerKind};
pub use moderation::{
    LogoModeration, ModerationError, ModerationVerdict, UploadTicket, UploadTracker, check_logo,
};
pub use palette::{Color, Palette, PaletteCatalog};
pub use pricing::{LOGO_SURCHARGE, TEXT_SURCHARGE, compute_total_price, format_price};
pub use repository::{GarmentRepository, JsonFileRepository, RepositoryError};
pub use upload::{ACCEPTED_MIME_TYPES, ImagePayload, MAX_UPLOAD_BYTES, UploadError};
