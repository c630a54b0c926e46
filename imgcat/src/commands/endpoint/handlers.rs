use super::*;
use crate::context::AppContext;
use crate::format::{OutputFormat, fail, format_output_vec};
use libimgcat::get_endpoint;

/// Handle the endpoint subcommand
pub fn handle_endpoint(ctx: &AppContext, reference: &str, count: usize, format: OutputFormat) {
    let choices = select_endpoints(get_endpoint, &ctx.config.catalog, reference, count)
        .unwrap_or_else(|e| fail(&format!("Error: {}", e)));

    match format_output_vec(&choices, format) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(&format!("Error formatting output: {}", e)),
    }
}
