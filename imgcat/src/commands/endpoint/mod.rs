use crate::format::Formattable;
use libimgcat::CatalogConfig;
use serde::Serialize;

pub mod handlers;

/// An endpoint picked for a reference
#[derive(Debug, Serialize)]
pub struct EndpointChoice {
    /// Reference the endpoint was picked for
    pub reference: String,
    /// Selected catalog API server
    pub endpoint: String,
}

impl Formattable for EndpointChoice {
    fn format_pretty(&self) -> String {
        self.endpoint.clone()
    }
}

/// Pick `count` consecutive endpoints for `reference` using `pick`
pub fn select_endpoints<F>(
    mut pick: F,
    config: &CatalogConfig,
    reference: &str,
    count: usize,
) -> Result<Vec<EndpointChoice>, String>
where
    F: FnMut(&str, &CatalogConfig) -> libimgcat::Result<String>,
{
    (0..count)
        .map(|_| {
            pick(reference, config)
                .map(|endpoint| EndpointChoice {
                    reference: reference.to_string(),
                    endpoint,
                })
                .map_err(|e| e.to_string())
        })
        .collect()
}
