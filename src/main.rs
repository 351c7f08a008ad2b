// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use beige_book::extractor::patterns::{HEADER_CATALOG, HeaderKind, SUMMARY_HEADERS};
use beige_book::utils::logging::{format_error, format_field, format_success};
use beige_book::{Config, CorpusBuilder, OutputFormat, PipelineError, Validator};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "beige_book")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Structured text extraction for Federal Reserve Beige Book PDFs", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every report in the raw data directory and write the dataset
    Extract {
        /// Directory holding the report subdirectory
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        format: Option<OutputFormat>,

        #[arg(short, long, value_name = "NUM")]
        workers: Option<usize>,
    },

    /// Process a single report and print its record as JSON
    Inspect {
        path: PathBuf,

        /// Print the full cleaned text instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// List the summary and regional header catalogs
    Headers,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    beige_book::utils::logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            workers,
        } => {
            cmd_extract(config, input, output, format, workers).await?;
        }
        Commands::Inspect { path, full } => {
            cmd_inspect(config, path, full)?;
        }
        Commands::Headers => {
            cmd_headers();
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        info!("Loading configuration from: {}", path.display());
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using default configuration",
        path.display()
    );
    Ok(Config::load(None).unwrap_or_else(|e| {
        warn!("Falling back to built-in defaults: {}", e);
        Config::default_config()
    }))
}

async fn cmd_extract(
    mut config: Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    workers: Option<usize>,
) -> Result<()> {
    if let Some(format) = format {
        config.output.format = format;
    }
    if let Some(workers) = workers {
        config.pipeline.parallel_workers = workers;
    }
    config.validate()?;

    let raw_data_dir = input.unwrap_or_else(|| config.input.raw_data_dir.clone());
    let output_path = output.unwrap_or_else(|| config.output.path.clone());

    info!("Starting Beige Book extraction");
    let builder = CorpusBuilder::new(config);

    let summary = match builder.run(&raw_data_dir, &output_path).await {
        Ok(summary) => summary,
        Err(err @ PipelineError::DirectoryNotFound { .. }) => {
            return Err(err).context("Nothing to process");
        }
        Err(err) => return Err(err).context("Extraction failed"),
    };

    println!();
    println!("{}", format_success("Extraction complete!"));
    println!("{}", format_field("Processed documents", summary.stats.total_files()));
    println!("{}", format_field("Failed documents", summary.stats.files_failed));
    println!("{}", format_field("Total words", summary.stats.total_words));
    println!(
        "{}",
        format_field("Saved to", summary.output_path.display())
    );

    Ok(())
}

fn cmd_inspect(config: Config, path: PathBuf, full: bool) -> Result<()> {
    Validator::validate_file_path(&path)?;
    if let Err(e) = Validator::validate_extension(&path, &config.input.extension) {
        warn!("{}", e);
    }

    let builder = CorpusBuilder::new(config);
    let record = builder.processor().process(&path);

    let mut json = record.to_json();
    if !full && let Some(text) = json.get_mut("full_text") {
        let preview = text
            .as_str()
            .map(|t| Validator::truncate_text(t, 500))
            .unwrap_or_default();
        *text = serde_json::Value::from(preview);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json).context("Failed to render record")?
    );
    Ok(())
}

fn cmd_headers() {
    println!("Summary headers (tried in order):");
    for (literal, regex) in SUMMARY_HEADERS.iter() {
        println!("  {:<20} {}", literal, regex.as_str());
    }

    println!("\nRegional headers:");
    for pattern in HEADER_CATALOG.iter() {
        let kind = match pattern.kind {
            HeaderKind::Ordinal => "ordinal",
            HeaderKind::City => "city",
        };
        println!("  {:<8} {:<14} {}", kind, pattern.label, pattern.regex.as_str());
    }
}
