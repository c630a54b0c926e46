//! Error types for imgcat
//!
//! Reference validation is the only failure the adapter raises on its own.
//! Malformed upstream data (timestamps, nested JSON) is reported with the
//! parser's error attached as the source.

use thiserror::Error;


/// Main error type for catalog adapter operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The reference is neither a bare UUID nor a `catalog://<uuid>` URI
    #[error("Invalid image reference: {image_ref}")]
    InvalidImageRef { image_ref: String },

    /// A timestamp attribute could not be parsed as ISO-8601
    #[error("Invalid timestamp in '{attribute}': {value}")]
    Timestamp {
        attribute: String,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// A nested property carried malformed JSON text
    #[error("Invalid JSON in property '{property}'")]
    Json {
        property: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors (invalid config file, empty endpoint pool)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for catalog adapter operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Creates a new invalid reference error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libimgcat::error::CatalogError;
    ///
    /// let err = CatalogError::invalid_image_ref("not-a-uuid");
    /// assert!(matches!(err, CatalogError::InvalidImageRef { .. }));
    /// ```
    pub fn invalid_image_ref<S: Into<String>>(image_ref: S) -> Self {
        Self::InvalidImageRef {
            image_ref: image_ref.into(),
        }
    }

    /// Creates a new timestamp error.
    ///
    /// `source` is `None` when the attribute was not text at all.
    pub fn timestamp<S: Into<String>>(
        attribute: S,
        value: S,
        source: Option<chrono::ParseError>,
    ) -> Self {
        Self::Timestamp {
            attribute: attribute.into(),
            value: value.into(),
            source,
        }
    }

    /// Creates a new nested JSON error.
    pub fn json<S: Into<String>>(property: S, source: serde_json::Error) -> Self {
        Self::Json {
            property: property.into(),
            source,
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libimgcat::error::CatalogError;
    ///
    /// let err = CatalogError::config("no catalog API servers configured", None);
    /// assert!(matches!(err, CatalogError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libimgcat::error::CatalogError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    /// let err = CatalogError::config_with_source("failed to read config", Some("/etc/imgcat.yaml"), io_err);
    /// assert!(matches!(err, CatalogError::Config { .. }));
    /// ```
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_with_source("Failed to build configuration", None::<&str>, err)
    }
}
