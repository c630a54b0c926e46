use crate::format::{Formattable, OutputFormat, fail, format_output};
use serde::Serialize;

/// Versions of the CLI and the adapter library it drives
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub imgcat: String,
    pub libimgcat: String,
    /// Reference scheme understood by this build
    pub scheme: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            imgcat: env!("CARGO_PKG_VERSION").to_string(),
            libimgcat: libimgcat::version().to_string(),
            scheme: libimgcat::reference::CATALOG_SCHEME.to_string(),
        }
    }
}

impl Formattable for VersionInfo {
    fn format_pretty(&self) -> String {
        format!(
            "imgcat {}\nlibimgcat {} ({})",
            self.imgcat, self.libimgcat, self.scheme
        )
    }
}

/// Handle the version subcommand
pub fn handle_version(format: OutputFormat) {
    match format_output(&VersionInfo::current(), format) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(&format!("Error formatting output: {}", e)),
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
