//! Content-addressed storage keys for images
//!
//! An image is stored under `images/{h[0..2]}/{h[2..4]}/{h}.{ext}` where `h` is the lowercase
//! hex SHA-256 of the payload and `ext` comes from the content type. Identical payloads always
//! map to the same key, so re-uploading overwrites the same object and yields the same URL.

use mime::Mime;
use sha2::{Digest, Sha256};

/// Content type assumed when an image upload does not carry one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

const FALLBACK_EXTENSION: &str = "bin";

/// Lowercase hex SHA-256 of `data`
#[must_use]
pub fn content_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Storage key for an image payload
#[must_use]
pub fn image_key(data: &[u8], content_type: &str) -> String {
    let digest = content_digest(data);
    let ext = extension_for(content_type);
    format!("images/{}/{}/{digest}.{ext}", &digest[0..2], &digest[2..4])
}

/// File extension for a content type, ignoring parameters such as `charset`
#[must_use]
pub fn extension_for(content_type: &str) -> String {
    let Ok(mime) = content_type.trim().parse::<Mime>() else {
        return FALLBACK_EXTENSION.to_string();
    };

    let known = match mime.essence_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/bmp" => Some("bmp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        "image/tiff" => Some("tiff"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        "text/plain" => Some("txt"),
        _ => None,
    };
    if let Some(ext) = known {
        return ext.to_string();
    }

    let subtype = mime.subtype().as_str();
    if !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        subtype.to_ascii_lowercase()
    } else {
        FALLBACK_EXTENSION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_layout() {
        let key = image_key(b"hello", "image/png");
        let digest = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
        assert_eq!(key, format!("images/2c/f2/{digest}.png"));
    }

    #[test]
    fn test_image_key_is_deterministic() {
        let data = vec![7u8; 4096];
        assert_eq!(image_key(&data, "image/jpeg"), image_key(&data, "image/jpeg"));
        assert_ne!(image_key(&data, "image/jpeg"), image_key(&data[1..], "image/jpeg"));
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("IMAGE/PNG"), "png");
        assert_eq!(extension_for("image/svg+xml"), "svg");
        assert_eq!(extension_for("image/webp; q=0.9"), "webp");
        assert_eq!(extension_for("application/pdf"), "pdf");
        assert_eq!(extension_for("application/vnd.ms-excel"), "bin");
        assert_eq!(extension_for("not a mime"), "bin");
        assert_eq!(extension_for(""), "bin");
    }
}
