/// Endpoint selection command handlers
pub mod endpoint;

/// Image reference, translation and policy command handlers
pub mod image;

/// Version command handlers
pub mod version;
