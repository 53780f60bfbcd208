//! Logo and signature image admission.

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

use billforge_invoicing::HeaderField;

/// Largest image accepted for a logo or signature (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("not an image: {0}")]
    NotAnImage(String),

    #[error("image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("SVG images are not supported; upload a PNG or JPEG")]
    UnsupportedSvg,

    #[error("image is empty")]
    Empty,
}

/// Which header image an upload is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Logo,
    Signature,
}

impl ImageTarget {
    pub fn header_field(&self) -> HeaderField {
        match self {
            ImageTarget::Logo => HeaderField::LogoUrl,
            ImageTarget::Signature => HeaderField::SignatureUrl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), AttachmentError> {
        let mime = self.mime_type.trim().to_ascii_lowercase();

        if !mime.starts_with("image/") {
            return Err(AttachmentError::NotAnImage(self.mime_type.clone()));
        }
        if mime.starts_with("image/svg") {
            return Err(AttachmentError::UnsupportedSvg);
        }
        if self.bytes.is_empty() {
            return Err(AttachmentError::Empty);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AttachmentError::TooLarge {
                size: self.bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        Ok(())
    }

    /// Validate and encode as a `data:` URL suitable for a header image field.
    pub fn to_data_url(&self) -> Result<String, AttachmentError> {
        self.validate()?;
        let encoded = general_purpose::STANDARD.encode(&self.bytes);
        Ok(format!(
            "data:{};base64,{}",
            self.mime_type.trim().to_ascii_lowercase(),
            encoded
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_becomes_data_url() {
        let upload = ImageUpload::new("image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(upload.to_data_url().unwrap(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn rejects_non_images() {
        let upload = ImageUpload::new("application/pdf", vec![1, 2, 3]);
        assert_eq!(
            upload.validate(),
            Err(AttachmentError::NotAnImage("application/pdf".to_string()))
        );
    }

    #[test]
    fn rejects_svg() {
        let upload = ImageUpload::new("image/svg+xml", b"<svg/>".to_vec());
        assert_eq!(upload.validate(), Err(AttachmentError::UnsupportedSvg));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let at_limit = ImageUpload::new("image/jpeg", vec![0; MAX_IMAGE_BYTES]);
        assert!(at_limit.validate().is_ok());

        let over = ImageUpload::new("image/jpeg", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(
            over.validate(),
            Err(AttachmentError::TooLarge { size, .. }) if size == MAX_IMAGE_BYTES + 1
        ));
    }

    #[test]
    fn empty_upload_is_rejected() {
        let upload = ImageUpload::new("image/png", Vec::new());
        assert_eq!(upload.validate(), Err(AttachmentError::Empty));
    }

    #[test]
    fn targets_map_to_header_fields() {
        assert_eq!(ImageTarget::Logo.header_field(), HeaderField::LogoUrl);
        assert_eq!(ImageTarget::Signature.header_field(), HeaderField::SignatureUrl);
    }
}
