//! Image usage policy checks.
//!
//! These guard against deployments where the catalog runs without
//! authentication and would otherwise hand out any tenant's images.

use crate::context::RequestContext;
use crate::record::{ImageRecord, canonical_text};
use serde_json::Value;

#[cfg(test)]
mod tests;

/// Visibility value that makes an image usable by everyone.
pub const PUBLIC_VISIBILITY: &str = "public";

/// Status of an image that is ready for use.
pub const ACTIVE_STATUS: &str = "active";

/// Checks whether the caller may use `image`.
///
/// A request with a token is authenticated, so the catalog has already
/// filtered what the caller can see and the image is allowed as is. Otherwise
/// the image must be public, the caller an admin, or the image owned by the
/// caller's project.
///
/// # Examples
///
/// ```
/// use libimgcat::context::RequestContext;
/// use libimgcat::policy::is_image_available;
/// use libimgcat::record::RawImage;
///
/// let image = RawImage::default().with("owner", "p1").with("visibility", "private");
///
/// assert!(is_image_available(&RequestContext::new().with_project("p1"), &image));
/// assert!(!is_image_available(&RequestContext::new().with_project("p2"), &image));
/// ```
pub fn is_image_available<R: ImageRecord + ?Sized>(context: &RequestContext, image: &R) -> bool {
    if context.is_authenticated() {
        return true;
    }

    let visibility = image.attribute("visibility").and_then(Value::as_str);
    if visibility == Some(PUBLIC_VISIBILITY) || context.is_admin {
        return true;
    }

    match context.project() {
        Some(project) => image.attribute("owner").and_then(Value::as_str) == Some(project),
        None => false,
    }
}

/// Checks whether `image` is active.
///
/// Images stuck in `queued` or `pending_delete` are not usable.
pub fn is_image_active<R: ImageRecord + ?Sized>(image: &R) -> bool {
    canonical_text(image.attribute("status")) == ACTIVE_STATUS
}
