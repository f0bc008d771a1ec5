//! evalboard CLI — browse math eval results from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use output::Format;

#[derive(Parser)]
#[command(name = "evalboard", version, about = "Math eval results browser")]
struct Cli {
    /// Root of the <model>/<dataset>/ eval output tree (overrides config)
    #[arg(long, global = true)]
    outputs: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-model, per-dataset metrics
    Summary {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: Format,
    },

    /// List individual case results
    Cases {
        /// Only this model
        #[arg(long)]
        model: Option<String>,

        /// Only this dataset
        #[arg(long)]
        dataset: Option<String>,

        /// "true" for correct cases only, "false" for incorrect only
        #[arg(long)]
        correct_only: Option<String>,

        /// Only this difficulty level
        #[arg(long, allow_hyphen_values = true)]
        level: Option<String>,

        /// Case-insensitive substring of the question
        #[arg(long)]
        question_contains: Option<String>,

        /// Page number, starting at 1
        #[arg(long, allow_hyphen_values = true)]
        page: Option<String>,

        /// Cases per page
        #[arg(long, allow_hyphen_values = true)]
        per_page: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: Format,
    },

    /// Compare models dataset by dataset
    Compare {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: Format,
    },

    /// List available models, datasets and difficulty levels
    Facets {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: Format,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,evalboard=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { format } => {
            commands::load_engine(cli.outputs, cli.config.as_deref())
                .and_then(|ctx| commands::summary::execute(&ctx, format))
        }
        Commands::Cases {
            model,
            dataset,
            correct_only,
            level,
            question_contains,
            page,
            per_page,
            format,
        } => {
            let query = evalboard_core::params::CaseQuery {
                model,
                dataset,
                correct_only,
                difficulty_level: level,
                question_contains,
                page,
                per_page,
            };
            commands::load_engine(cli.outputs, cli.config.as_deref())
                .and_then(|ctx| commands::cases::execute(&ctx, &query, format))
        }
        Commands::Compare { format } => {
            commands::load_engine(cli.outputs, cli.config.as_deref())
                .and_then(|ctx| commands::compare::execute(&ctx, format))
        }
        Commands::Facets { format } => {
            commands::load_engine(cli.outputs, cli.config.as_deref())
                .and_then(|ctx| commands::facets::execute(&ctx, format))
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
