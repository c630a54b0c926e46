//! Catalog image reference parsing and classification.
//!
//! A reference is either a bare UUID or a `catalog://` URI whose last path
//! segment is a UUID. Anything else is rejected with
//! [`CatalogError::InvalidImageRef`].

use crate::error::{CatalogError, Result};
use serde_json::Value;
use uuid::Uuid;


/// URI scheme prefix for catalog image references.
pub const CATALOG_SCHEME: &str = "catalog://";

/// Returns true if `value` is spelled like a UUID.
///
/// `urn:` and `uuid:` markers, surrounding braces and every hyphen are
/// dropped, and what remains must be 32 hex digits in either case. Hyphens
/// may therefore sit anywhere.
pub fn is_uuid_like(value: &str) -> bool {
    let digits = value
        .replace("urn:", "")
        .replace("uuid:", "")
        .trim_matches(['{', '}'])
        .replace('-', "");
    digits.len() == 32 && Uuid::parse_str(&digits).is_ok()
}

/// Parses the image identifier out of a reference.
///
/// # Examples
///
/// ```
/// use libimgcat::reference::parse_image_id;
///
/// let id = "8b9d1a6e-2d4f-4a7c-9f0e-6f1b2c3d4e5f";
/// assert_eq!(parse_image_id(id).unwrap(), id);
/// assert_eq!(parse_image_id(&format!("catalog://{id}")).unwrap(), id);
/// assert!(parse_image_id("not-a-uuid").is_err());
/// ```
pub fn parse_image_id(image_ref: &str) -> Result<String> {
    if is_uuid_like(image_ref) {
        return Ok(image_ref.to_string());
    }

    if image_ref.starts_with(CATALOG_SCHEME) {
        // The identifier is whatever follows the final slash.
        let candidate = image_ref.rsplit('/').next().unwrap_or_default();
        if is_uuid_like(candidate) {
            return Ok(candidate.to_string());
        }
    }

    tracing::debug!(image_ref, "rejecting image reference");
    Err(CatalogError::invalid_image_ref(image_ref))
}

/// Returns true if `image_ref` looks like a catalog image reference.
///
/// This is a cheap classification: a `catalog://` prefix is enough, the
/// identifier after it is only checked by [`parse_image_id`].
pub fn is_catalog_reference(image_ref: &str) -> bool {
    image_ref.starts_with(CATALOG_SCHEME) || is_uuid_like(image_ref)
}

/// Same as [`is_catalog_reference`] for untyped input. Non-string values are
/// never catalog references.
pub fn is_catalog_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_catalog_reference)
}
