//! schema-scaffold CLI - model classes and INSERT statements from an MSSQL catalog.

use clap::{Parser, Subcommand};
use schema_scaffold::{
    CatalogSource, Config, FsSink, GenerationReport, Generator, JsonCatalog, MssqlCatalog,
    ScaffoldError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

/// Exit code when the job ran but at least one table failed.
const EXIT_TABLES_FAILED: u8 = 1;

#[derive(Parser)]
#[command(name = "schema-scaffold")]
#[command(about = "Generate model classes and INSERT statements from an MSSQL column catalog")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Read columns from a JSON catalog snapshot instead of the database
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one model class per configured table
    Classes {
        /// Override output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Override namespace
        #[arg(long)]
        namespace: Option<String>,

        /// Do not emit the import block
        #[arg(long)]
        no_imports: bool,
    },

    /// Generate one INSERT statement per configured table
    Inserts {
        /// Override output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Include nullable columns
        #[arg(long)]
        include_nullable: bool,

        /// Use random literals instead of named parameters
        #[arg(long)]
        random: bool,

        /// Seed for random literals
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load and validate the configuration file
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_TABLES_FAILED),
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Returns whether every table was generated.
async fn run() -> Result<bool, ScaffoldError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let report = match cli.command {
        Commands::Check => {
            println!("Configuration is valid");
            println!("  Connections: {}", config.connections.len());
            println!(
                "  Class tables: {}",
                config.classes.as_ref().map_or(0, |j| j.tables.len())
            );
            println!(
                "  Insert tables: {}",
                config.inserts.as_ref().map_or(0, |j| j.tables.len())
            );
            return Ok(true);
        }

        Commands::Classes {
            output_dir,
            namespace,
            no_imports,
        } => {
            let mut job = config
                .classes
                .clone()
                .ok_or_else(|| ScaffoldError::Config("no 'classes' job in configuration".into()))?;

            // Apply overrides
            if let Some(dir) = output_dir {
                job.output_dir = dir;
            }
            if let Some(ns) = namespace {
                job.namespace = Some(ns);
            }
            if no_imports {
                job.emit_imports = false;
            }

            let catalog = open_catalog(&config, &job.connection, cli.catalog_file.as_ref()).await?;
            Generator::new(catalog, FsSink::new())
                .generate_classes(&job)
                .await?
        }

        Commands::Inserts {
            output_dir,
            include_nullable,
            random,
            seed,
        } => {
            let mut job = config
                .inserts
                .clone()
                .ok_or_else(|| ScaffoldError::Config("no 'inserts' job in configuration".into()))?;

            // Apply overrides
            if let Some(dir) = output_dir {
                job.output_dir = dir;
            }
            if include_nullable {
                job.include_nullable = true;
            }
            if random {
                job.use_random_literals = true;
            }
            if seed.is_some() {
                job.seed = seed;
            }

            let catalog = open_catalog(&config, &job.connection, cli.catalog_file.as_ref()).await?;
            Generator::new(catalog, FsSink::new())
                .generate_inserts(&job)
                .await?
        }
    };

    if cli.output_json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    Ok(report.is_success())
}

async fn open_catalog(
    config: &Config,
    connection: &str,
    catalog_file: Option<&PathBuf>,
) -> Result<Box<dyn CatalogSource>, ScaffoldError> {
    if let Some(path) = catalog_file {
        return Ok(Box::new(JsonCatalog::load(path)?));
    }

    let source = config.connection(connection).cloned().ok_or_else(|| {
        ScaffoldError::Config(format!("connection '{}' is not defined", connection))
    })?;
    Ok(Box::new(MssqlCatalog::connect(source).await?))
}

fn print_summary(report: &GenerationReport) {
    let status_msg = if report.is_success() {
        "Generation completed!"
    } else {
        "Generation completed with failures"
    };
    println!("\n{}", status_msg);
    println!("  Job: {}", report.job);
    println!("  Duration: {:.2}s", report.duration_seconds);
    println!("  Tables: {}/{}", report.tables_success, report.tables_total);
    for path in &report.artifacts {
        println!("  Wrote: {}", path.display());
    }
    for failure in &report.failed_tables {
        println!("  Failed: {} ({})", failure.table, failure.error);
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
