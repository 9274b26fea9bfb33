//! Logo content moderation gateway.
//!
//! The classifier itself is an external collaborator behind the
//! [`LogoModeration`] trait; this module owns the calling policy around it:
//! any failure is treated as an unsafe verdict with a descriptive reason, and
//! a completion that has been superseded by a newer upload is discarded via
//! [`UploadTracker`]. A moderation problem never crashes the customization
//! session.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::upload::ImagePayload;

/// Failure from the moderation gateway itself (network, quota, timeout).
/// Callers normally fold this into a rejection via [`check_logo`] rather
/// than surfacing it.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("moderation gateway failure: {0}")]
    Gateway(String),
}

/// Outcome of classifying a logo image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub is_safe: bool,
    pub reason: String,
}

impl ModerationVerdict {
    /// The image passed the content policy check.
    pub fn approved() -> Self {
        Self {
            is_safe: true,
            reason: String::new(),
        }
    }

    /// The image was flagged, with a reason shown to the user.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            reason: reason.into(),
        }
    }
}

/// External classifier for uploaded logo images.
///
/// Implementations are expected to be slow and unreliable; use
/// [`check_logo`] to get the defensive calling policy.
pub trait LogoModeration {
    fn classify(&self, payload: &ImagePayload) -> Result<ModerationVerdict, ModerationError>;
}

/// Classifies a logo with the session-safe failure policy: an empty payload
/// or a gateway failure yields an unsafe verdict instead of an error.
pub fn check_logo<M: LogoModeration>(gateway: &M, payload: &ImagePayload) -> ModerationVerdict {
    if payload.is_empty() {
        return ModerationVerdict::rejected("No logo data provided.");
    }
    match gateway.classify(payload) {
        Ok(verdict) => verdict,
        Err(err) => {
            error!(%err, "logo content policy check failed");
            ModerationVerdict::rejected(format!("An unexpected error occurred: {err}"))
        }
    }
}

// ============================================================================
// UploadTracker
// ============================================================================

/// Ticket identifying one in-flight logo upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Guards against out-of-order moderation completions.
///
/// Each upload takes a ticket from [`begin`](Self::begin); when its check
/// completes, [`accept`](Self::accept) hands the verdict back only if no
/// newer upload has started in the meantime. A stale completion is dropped,
/// so a superseded check can never overwrite the current logo state.
#[derive(Debug, Default)]
pub struct UploadTracker {
    latest: u64,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new upload, superseding any in-flight one.
    pub fn begin(&mut self) -> UploadTicket {
        self.latest += 1;
        UploadTicket(self.latest)
    }

    /// Returns true if the ticket still belongs to the newest upload.
    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Accepts a completed check: returns the verdict if the ticket is still
    /// current, or `None` if the upload was superseded.
    pub fn accept(
        &self,
        ticket: UploadTicket,
        verdict: ModerationVerdict,
    ) -> Option<ModerationVerdict> {
        self.is_current(ticket).then_some(verdict)
    }
}

// ============================================================================
// Tests
// ============================================================================
