//! Catalog API endpoint selection.
//!
//! Requests are spread over the configured API servers in round-robin order.
//! The order is shuffled once, when the first endpoint is requested, and then
//! kept for the lifetime of the selector.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::reference::is_catalog_reference;
use rand::seq::SliceRandom;
use std::sync::{Mutex, PoisonError};


/// A shuffled endpoint list and the position of the next endpoint to hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCycle {
    order: Vec<String>,
    cursor: usize,
}

impl EndpointCycle {
    /// Creates a cycle over `endpoints` in a random order.
    ///
    /// Returns `None` if there is nothing to cycle over.
    pub fn shuffled<R: rand::Rng + ?Sized>(endpoints: &[String], rng: &mut R) -> Option<Self> {
        if endpoints.is_empty() {
            return None;
        }
        let mut order = endpoints.to_vec();
        order.shuffle(rng);
        Some(Self { order, cursor: 0 })
    }

    /// Returns the next endpoint and advances the cursor.
    pub fn next_endpoint(&mut self) -> &str {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.order.len();
        &self.order[index]
    }

    /// The endpoints in the order they are handed out.
    pub fn order(&self) -> &[String] {
        &self.order
    }
}

/// Round-robin endpoint selector with a lazily built cycle.
///
/// The cycle is built from the endpoint list passed to the first successful
/// [`select`](Self::select) call. Later calls reuse it.
#[derive(Debug, Default)]
pub struct EndpointSelector {
    cycle: Mutex<Option<EndpointCycle>>,
}

impl EndpointSelector {
    /// Creates a selector that has not picked an order yet.
    pub const fn new() -> Self {
        Self {
            cycle: Mutex::new(None),
        }
    }

    /// Picks the next endpoint for `image_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidImageRef`] if `image_ref` is not a
    /// catalog reference, and [`CatalogError::Config`] if the cycle has not
    /// been built yet and `endpoints` is empty.
    pub fn select(&self, image_ref: &str, endpoints: &[String]) -> Result<String> {
        if !is_catalog_reference(image_ref) {
            return Err(CatalogError::invalid_image_ref(image_ref));
        }

        // The cursor is always left valid, so a poisoned lock is still usable.
        let mut guard = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.is_none() {
            let cycle = EndpointCycle::shuffled(endpoints, &mut rand::thread_rng())
                .ok_or_else(|| CatalogError::config("no catalog API servers configured", None))?;
            tracing::debug!(order = ?cycle.order(), "built catalog endpoint cycle");
            *guard = Some(cycle);
        }

        let endpoint = match guard.as_mut() {
            Some(cycle) => cycle.next_endpoint().to_string(),
            None => return Err(CatalogError::config("no catalog API servers configured", None)),
        };
        tracing::debug!(image_ref, endpoint = %endpoint, "selected catalog endpoint");
        Ok(endpoint)
    }

    /// Returns true once the cycle has been built.
    pub fn is_initialized(&self) -> bool {
        self.cycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

static ENDPOINTS: EndpointSelector = EndpointSelector::new();

/// Picks the next catalog API server for `image_ref` from the process-wide
/// cycle.
///
/// The cycle is built from `config.api_servers` on first use. Configuration
/// changes made after that are not picked up.
///
/// # Examples
///
/// ```
/// use libimgcat::config::CatalogConfig;
/// use libimgcat::endpoint::get_endpoint;
///
/// let config = CatalogConfig {
///     api_servers: vec!["http://catalog:9292".to_string()],
/// };
/// let endpoint = get_endpoint("8b9d1a6e-2d4f-4a7c-9f0e-6f1b2c3d4e5f", &config).unwrap();
/// assert_eq!(endpoint, "http://catalog:9292");
/// ```
pub fn get_endpoint(image_ref: &str, config: &CatalogConfig) -> Result<String> {
    ENDPOINTS.select(image_ref, &config.api_servers)
}
