//! imgcat - Catalog Image Metadata Adapter
//!
//! libimgcat sits between an image-catalog service client and a provisioning
//! system. It validates image references, spreads requests over the catalog
//! API servers, converts catalog records into canonical metadata and decides
//! whether a caller may use an image.
//!
//! # Quick Start
//!
//! ```
//! use libimgcat::{RawImage, RequestContext, is_image_active, is_image_available, translate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let image = RawImage::default()
//!         .with("id", "8b9d1a6e-2d4f-4a7c-9f0e-6f1b2c3d4e5f")
//!         .with("status", "active")
//!         .with("visibility", "public")
//!         .with("created_at", "2024-03-01T12:00:00Z")
//!         .with("block_device_mapping", r#"[{"boot_index": 0}]"#);
//!
//!     let ctx = RequestContext::new().with_project("p1");
//!     assert!(is_image_available(&ctx, &image));
//!     assert!(is_image_active(&image));
//!
//!     let metadata = translate(&image)?;
//!     println!("{}", metadata.to_value());
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`ImageRecord`] - Read access to a raw catalog record
//! - [`RawImage`] - JSON-backed catalog record
//! - [`ImageMetadata`] - Canonical metadata produced by [`translate`]
//! - [`RequestContext`] - Caller identity used by the policy checks
//! - [`EndpointSelector`] - Round-robin API server selection
//! - [`CatalogError`] - Error type for all operations

#![warn(clippy::all)]

/// Returns the libimgcat crate version.
///
/// # Examples
///
/// ```
/// let version = libimgcat::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use config::{CatalogConfig, Config};
pub use context::RequestContext;
pub use endpoint::{EndpointSelector, get_endpoint};
pub use error::{CatalogError, Result};
pub use metadata::{ImageMetadata, translate};
pub use policy::{is_image_active, is_image_available};
pub use record::{ImageRecord, RawImage};
pub use reference::{is_catalog_reference, is_catalog_value, parse_image_id};

pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod metadata;
pub mod policy;
pub mod record;
pub mod reference;
