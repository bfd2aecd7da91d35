// src/main.rs
mod document;
mod extractors;
mod stats;
mod template;
mod utils;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use extractors::{CustomizationMiner, CustomizationRecord};
use template::TemplateRebuilder;
use utils::AppError;

/// Command Line Interface for the CLAUDE.md customization updater
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract project customizations from a CLAUDE.md to JSON on stdout
    Extract {
        /// Path to the CLAUDE.md document
        claude_md: PathBuf,
    },

    /// Generate an updated CLAUDE.md from a record and a blank template
    Generate {
        /// Path to the serialized customization record (JSON)
        #[arg(long)]
        customizations: PathBuf,

        /// Path to the blank template document
        #[arg(long)]
        template: PathBuf,

        /// Path to write the rebuilt document
        #[arg(long)]
        output: PathBuf,
    },

    /// Display token-budget estimates for the session documents
    Stats {
        /// Navigator document counted into the context budget
        #[arg(long, default_value = ".agent/DEVELOPMENT-README.md")]
        navigator: PathBuf,

        /// CLAUDE.md document counted into the context budget
        #[arg(long, default_value = "CLAUDE.md")]
        claude_md: PathBuf,

        /// Flat JSON counters mapping from telemetry; renders the session
        /// report instead of the file-size estimates
        #[arg(long)]
        counters: Option<PathBuf>,
    },
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    match args.command {
        Command::Extract { claude_md } => {
            if !claude_md.is_file() {
                return Err(AppError::Config(format!(
                    "File not found: {}",
                    claude_md.display()
                )));
            }
            let content = fs::read_to_string(&claude_md)?;
            tracing::info!("Extracting customizations from {}", claude_md.display());

            let record = CustomizationMiner::new().mine(&content);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Generate { customizations, template, output } => {
            let record: CustomizationRecord =
                serde_json::from_str(&fs::read_to_string(&customizations)?)?;
            let template_text = fs::read_to_string(&template)?;
            tracing::info!(
                "Rebuilding {} from template {}",
                output.display(),
                template.display()
            );

            let rebuilt = TemplateRebuilder::new().rebuild(&record, &template_text);
            fs::write(&output, rebuilt)?;
            println!("✓ Generated {}", output.display());
        }

        Command::Stats { navigator, claude_md, counters } => {
            let report = match counters {
                Some(path) => {
                    let counters: BTreeMap<String, u64> =
                        serde_json::from_str(&fs::read_to_string(&path)?)?;
                    stats::render_session_stats(&counters)
                }
                None => stats::render_context_report(&navigator, &claude_md),
            };
            print!("{report}");
        }
    }

    Ok(())
}
