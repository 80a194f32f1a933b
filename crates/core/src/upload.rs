//! Payment-proof image rules: accepted content types and object naming.

use chrono::{DateTime, Utc};

/// Content types a payment-proof upload may carry.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Whether a content type is an accepted proof image format.
#[must_use]
pub fn is_allowed_image_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// File extension for an accepted content type, `None` otherwise.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Build the blob object name for a payment proof:
/// `payment-proof-{unix-millis}-{suffix}.{ext}`.
///
/// The caller supplies the clock reading and a random suffix; together they
/// make collisions between concurrent uploads implausible. Returns `None`
/// for content types outside [`ALLOWED_IMAGE_TYPES`].
#[must_use]
pub fn proof_object_name(
    uploaded_at: DateTime<Utc>,
    suffix: u32,
    content_type: &str,
) -> Option<String> {
    let ext = extension_for(content_type)?;
    Some(format!(
        "payment-proof-{}-{suffix:08x}.{ext}",
        uploaded_at.timestamp_millis()
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_allowed_types() {
        assert!(is_allowed_image_type("image/jpeg"));
        assert!(is_allowed_image_type("image/png"));
        assert!(is_allowed_image_type("image/webp"));
        assert!(!is_allowed_image_type("image/gif"));
        assert!(!is_allowed_image_type("application/pdf"));
        assert!(!is_allowed_image_type(""));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("image/svg+xml"), None);
    }

    #[test]
    fn test_object_name_shape() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let name = proof_object_name(at, 0xdead_beef, "image/png").unwrap();
        assert_eq!(
            name,
            format!("payment-proof-{}-deadbeef.png", at.timestamp_millis())
        );
    }

    #[test]
    fn test_object_name_rejects_unknown_type() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(proof_object_name(at, 1, "image/gif").is_none());
    }

    #[test]
    fn test_object_names_differ_by_suffix() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let a = proof_object_name(at, 1, "image/jpeg").unwrap();
        let b = proof_object_name(at, 2, "image/jpeg").unwrap();
        assert_ne!(a, b);
    }
}
