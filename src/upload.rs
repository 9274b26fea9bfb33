//! Boundary validation for user-supplied images.
//!
//! Both logo uploads and admin layer artwork arrive as data URIs. They are
//! checked here, at the boundary, before moderation or any state change; the
//! pricing and compositing engine never sees raw image bytes.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// Uploads larger than this are rejected before any further processing.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Image types the upload boundary accepts.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Rejection raised at the upload boundary. Every variant carries a message
/// suitable for showing to the user directly.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please upload an image smaller than 4MB.")]
    TooLarge { size: usize },

    #[error("Unsupported image type: {0}. Use PNG, JPEG, or WebP.")]
    UnsupportedType(String),

    #[error("Could not read the selected file.")]
    InvalidDataUri,

    #[error("Could not read the selected file.")]
    Decode(#[from] base64::DecodeError),
}

/// A decoded image upload: mime type plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, UploadError> {
        let rest = uri.strip_prefix("data:").ok_or(UploadError::InvalidDataUri)?;
        let (mime, data) = rest.split_once(";base64,").ok_or(UploadError::InvalidDataUri)?;
        if mime.is_empty() {
            return Err(UploadError::InvalidDataUri);
        }
        let bytes = STANDARD.decode(data)?;
        Ok(Self::new(mime, bytes))
    }

    /// Encodes the payload back into a data URI for embedding in a garment
    /// record or customization state.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Enforces the boundary rules: accepted type and size cap. Called
    /// before moderation and before any state mutation.
    pub fn validate(&self) -> Result<(), UploadError> {
        if !ACCEPTED_MIME_TYPES.contains(&self.mime.as_str()) {
            return Err(UploadError::UnsupportedType(self.mime.clone()));
        }
        if self.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size: self.len() });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_round_trip() {
        let payload = ImagePayload::new("image/png", vec![0x89, b'P', b'N', b'G']);
        let uri = payload.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));

        let restored = ImagePayload::from_data_uri(&uri).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn malformed_data_uris_are_rejected() {
        assert!(matches!(
            ImagePayload::from_data_uri("http://example.com/logo.png"),
            Err(UploadError::InvalidDataUri)
        ));
        assert!(matches!(
            ImagePayload::from_data_uri("data:image/png,not-base64-marker"),
            Err(UploadError::InvalidDataUri)
        ));
        assert!(matches!(
            ImagePayload::from_data_uri("data:image/png;base64,!!!"),
            Err(UploadError::Decode(_))
        ));
    }

    #[test]
    fn oversized_upload_is_rejected_with_user_message() {
        let payload = ImagePayload::new("image/png", vec![0u8; MAX_UPLOAD_BYTES + 1]);
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "Please upload an image smaller than 4MB.");
    }

    #[test]
    fn size_cap_is_inclusive() {
        let payload = ImagePayload::new("image/webp", vec![0u8; MAX_UPLOAD_BYTES]);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let payload = ImagePayload::new("image/gif", vec![1, 2, 3]);
        assert!(matches!(
            payload.validate(),
            Err(UploadError::UnsupportedType(_))
        ));
    }
}
