use super::*;
use crate::format::{OutputFormat, fail, print_output};
use libimgcat::translate;

/// Handle the parse subcommand
pub fn handle_parse(reference: &str, format: OutputFormat) {
    match parse_reference(reference) {
        Ok(parsed) => print_output(&parsed, format),
        Err(e) => fail(&format!("Error: {}", e)),
    }
}

/// Handle the translate subcommand
pub fn handle_translate(input: &str, format: OutputFormat) {
    let image = read_record(input).unwrap_or_else(|e| fail(&format!("Error: {}", e)));
    match translate(&image) {
        Ok(metadata) => print_output(&metadata, format),
        Err(e) => fail(&format!("Error: {}", e)),
    }
}

/// Handle the check subcommand
pub fn handle_check(input: &str, context: &RequestContext, format: OutputFormat) {
    let image = read_record(input).unwrap_or_else(|e| fail(&format!("Error: {}", e)));
    let check = check_record(&image, context);
    tracing::info!(
        available = check.available,
        active = check.active,
        "evaluated image policies"
    );
    print_output(&check, format);
}
