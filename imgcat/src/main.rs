use clap::{Parser, Subcommand};
use libimgcat::RequestContext;
use std::path::PathBuf;

mod commands;
mod context;
mod format;

/// imgcat - Catalog Image Metadata Adapter
///
/// Parse catalog image references, translate catalog image records into
/// canonical metadata and evaluate image usage policies.
#[derive(Parser, Debug)]
#[command(name = "imgcat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file
    #[arg(long, global = true, env = "IMGCAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version {
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Extract the image identifier from a reference
    Parse {
        /// Image reference (UUID or catalog://<uuid>)
        reference: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Translate a raw catalog image record into canonical metadata
    Translate {
        /// JSON file holding the image record, or '-' for stdin
        input: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Check whether a caller may use an image and whether it is active
    Check {
        /// JSON file holding the image record, or '-' for stdin
        input: String,
        /// Authentication token of the caller
        #[arg(long, env = "IMGCAT_AUTH_TOKEN")]
        token: Option<String>,
        /// Treat the caller as an administrator
        #[arg(long)]
        admin: bool,
        /// Project the caller is scoped to
        #[arg(long)]
        project: Option<String>,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Select catalog API servers for an image reference
    Endpoint {
        /// Image reference (UUID or catalog://<uuid>)
        reference: String,
        /// Number of consecutive selections to show
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();

    context::init_logging(context::VerbosityLevel::from_count(cli.verbose));

    match cli.command {
        Commands::Version { format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::version::handle_version(fmt);
        }
        Commands::Parse { reference, format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::image::handlers::handle_parse(&reference, fmt);
        }
        Commands::Translate { input, format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::image::handlers::handle_translate(&input, fmt);
        }
        Commands::Check {
            input,
            token,
            admin,
            project,
            format,
        } => {
            let fmt = format::OutputFormat::from(format.as_str());
            let request = RequestContext {
                auth_token: token,
                is_admin: admin,
                project_id: project,
            };
            commands::image::handlers::handle_check(&input, &request, fmt);
        }
        Commands::Endpoint {
            reference,
            count,
            format,
        } => {
            // Config is only needed for the endpoint pool.
            let ctx = context::AppContext::build(cli.config.as_deref())
                .unwrap_or_else(|e| format::fail(&e));
            let fmt = format::OutputFormat::from(format.as_str());
            commands::endpoint::handlers::handle_endpoint(&ctx, &reference, count, fmt);
        }
    }
}
