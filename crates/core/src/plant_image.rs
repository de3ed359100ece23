//! Plant image format detection and object-key layout.
//!
//! The format is decided from the file's magic bytes, never from the
//! client-supplied filename or content type.

use image::ImageFormat;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Image formats accepted for plant photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl PlantImageFormat {
    /// Sniff the format from the leading bytes of `data`.
    pub fn detect(data: &[u8]) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::Validation("Uploaded file is empty".into()));
        }
        match image::guess_format(data) {
            Ok(ImageFormat::Png) => Ok(Self::Png),
            Ok(ImageFormat::Jpeg) => Ok(Self::Jpeg),
            Ok(ImageFormat::WebP) => Ok(Self::WebP),
            Ok(other) => Err(CoreError::Validation(format!(
                "Unsupported image format {other:?}. Supported: PNG, JPEG, WebP"
            ))),
            Err(_) => Err(CoreError::Validation(
                "Uploaded file is not a recognised image".into(),
            )),
        }
    }

    /// File extension used in the object key.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// MIME type sent to the object store.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }
}

/// Build a fresh object key for a plant image: `plants/{plant_id}/{uuid}.{ext}`.
///
/// Each upload gets a new key so cached URLs of the previous image never
/// serve the new bytes.
pub fn object_key(plant_id: DbId, format: PlantImageFormat) -> String {
    format!("plants/{plant_id}/{}.{}", Uuid::new_v4(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";

    #[test]
    fn detects_png_and_jpeg() {
        assert_eq!(PlantImageFormat::detect(PNG_MAGIC).unwrap(), PlantImageFormat::Png);
        assert_eq!(PlantImageFormat::detect(JPEG_MAGIC).unwrap(), PlantImageFormat::Jpeg);
    }

    #[test]
    fn rejects_text_payload() {
        let err = PlantImageFormat::detect(b"hello, not an image").unwrap_err();
        assert!(err.to_string().contains("not a recognised image"));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(PlantImageFormat::detect(&[]).is_err());
    }

    #[test]
    fn object_key_is_scoped_to_plant() {
        let key = object_key(12, PlantImageFormat::Jpeg);
        assert!(key.starts_with("plants/12/"));
        assert!(key.ends_with(".jpg"));
        assert_ne!(key, object_key(12, PlantImageFormat::Jpeg));
    }
}
