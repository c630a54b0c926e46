use super::*;
use crate::record::RawImage;
use serde_json::json;

fn private_image(owner: &str) -> RawImage {
    RawImage::default()
        .with("owner", owner)
        .with("visibility", "private")
}

#[test]
fn test_token_allows_any_image() {
    let ctx = RequestContext::new().with_auth_token("token");

    assert!(is_image_available(&ctx, &private_image("someone-else")));
    assert!(is_image_available(&ctx, &RawImage::default()));
}

#[test]
fn test_empty_token_falls_through_to_checks() {
    let ctx = RequestContext::new().with_auth_token("").with_project("p2");

    assert!(!is_image_available(&ctx, &private_image("p1")));
}

#[test]
fn test_public_image_is_available() {
    let image = RawImage::default()
        .with("owner", "p1")
        .with("visibility", "public");

    assert!(is_image_available(&RequestContext::new(), &image));
}

#[test]
fn test_admin_sees_private_images() {
    let ctx = RequestContext::new().with_admin(true);

    assert!(is_image_available(&ctx, &private_image("p1")));
}

#[test]
fn test_owner_project_sees_private_image() {
    let ctx = RequestContext::new().with_project("p1");

    assert!(is_image_available(&ctx, &private_image("p1")));
}

#[test]
fn test_other_project_is_denied() {
    let ctx = RequestContext::new().with_project("p2");

    assert!(!is_image_available(&ctx, &private_image("p1")));
}

#[test]
fn test_unscoped_context_is_denied() {
    assert!(!is_image_available(&RequestContext::new(), &private_image("p1")));
}

#[test]
fn test_missing_owner_is_denied() {
    let ctx = RequestContext::new().with_project("p1");
    let image = RawImage::default().with("visibility", "shared");

    assert!(!is_image_available(&ctx, &image));
}

#[test]
fn test_empty_project_does_not_match_empty_owner() {
    let ctx = RequestContext::new().with_project("");

    assert!(!is_image_available(&ctx, &private_image("")));
}

#[test]
fn test_active_status() {
    let active = RawImage::default().with("status", "active");
    let queued = RawImage::default().with("status", "queued");

    assert!(is_image_active(&active));
    assert!(!is_image_active(&queued));
}

#[test]
fn test_status_is_compared_exactly() {
    assert!(!is_image_active(&RawImage::default().with("status", "ACTIVE")));
    assert!(!is_image_active(&RawImage::default().with("status", " active")));
}

#[test]
fn test_missing_or_odd_status_is_inactive() {
    assert!(!is_image_active(&RawImage::default()));
    assert!(!is_image_active(&RawImage::default().with("status", Value::Null)));
    assert!(!is_image_active(&RawImage::default().with("status", json!(["active"]))));
}
