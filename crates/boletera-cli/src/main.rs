mod logging;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use uuid::Uuid;

use boletera_catalog::{GenerateRequest, PersistenceAdapter, SeriesRegistry, TicketCatalog};
use boletera_core::DARK_PREF_KEY;
use boletera_export::{Artifact, BatchExportPipeline, ExportError, ExportFormat, ExportOutcome};
use boletera_render::{QrPayloadEncoder, TicketRenderer};
use storage::{AppPaths, CliConfig, FileStore, load_or_create_config};

#[derive(Debug, Error)]
enum CliError {
    #[error("storage error: {0}")]
    Storage(#[from] storage::StorageError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

#[derive(Parser, Debug)]
#[command(name = "boletera", version, about = "Ticket catalog and batch exporter")]
struct Cli {
    /// Data directory; defaults to $BOLETERA_DATA_DIR or ./boletera_data.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch of tickets.
    Generate(GenerateArgs),
    /// Manage saved series templates.
    Series {
        #[command(subcommand)]
        command: SeriesCommand,
    },
    /// Mark a ticket sold.
    Sell {
        id: Uuid,
    },
    /// Revert a ticket to unsold.
    Unsell {
        id: Uuid,
    },
    /// Sell the first unsold ticket in catalog order.
    SellNext,
    /// Mark every ticket sold.
    SellAll,
    /// Remove one ticket from the catalog.
    Remove {
        id: Uuid,
    },
    /// Empty the catalog.
    Clear {
        /// Confirm the irreversible wipe.
        #[arg(long)]
        yes: bool,
    },
    /// Show catalog metrics and the ticket listing.
    Status,
    /// Produce export artifacts.
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Set the dark display preference.
    Dark {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Series name stamped on every ticket of the batch.
    #[arg(long, default_value = "SERIE-A")]
    series: String,
    /// Short prefix used in the human-readable code.
    #[arg(long, default_value = "A")]
    prefix: String,
    /// First folio of the batch.
    #[arg(long, default_value_t = 1)]
    start_folio: u32,
    /// Number of tickets to generate.
    #[arg(long, default_value_t = 10)]
    count: u32,
    /// Price per ticket.
    #[arg(long, default_value_t = 100.0, value_parser = parse_price)]
    price: f64,
    /// Pre-fill series and prefix from a saved template.
    #[arg(long, conflicts_with_all = ["series", "prefix"])]
    use_series: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SeriesCommand {
    /// Save a template; an existing name is left untouched.
    Save { name: String, prefix: String },
    /// Remove a template by name.
    Remove { name: String },
    /// List saved templates, most recent first.
    List,
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Directory the artifact is written to.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Series name used for the artifact file name.
    #[arg(long)]
    series: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// One ticket as a PNG image.
    Png {
        id: Uuid,
        #[command(flatten)]
        out: OutArgs,
    },
    /// One ticket as a one-page PDF.
    Pdf {
        id: Uuid,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Whole catalog as a ZIP of PNG entries.
    Zip {
        #[command(flatten)]
        out: OutArgs,
    },
    /// Whole catalog as a multi-page PDF.
    PdfAll {
        #[command(flatten)]
        out: OutArgs,
    },
    /// Whole catalog as a spreadsheet.
    Sheet {
        #[command(flatten)]
        out: OutArgs,
    },
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|_| "price must be a number".to_string())?;
    if price < 0.0 {
        return Err("price must be non-negative".to_string());
    }
    Ok(price)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let paths = AppPaths::resolve(cli.data_dir.clone());
    let config = load_or_create_config(&paths)?;
    logging::init_logging(&paths.log_path())?;

    let store = Arc::new(FileStore::new(paths.state_dir()));
    run_command(cli.command, store, &config).await
}

async fn run_command(
    command: Command,
    store: Arc<FileStore>,
    config: &CliConfig,
) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => {
            let mut catalog = TicketCatalog::load(store.clone(), Box::new(QrPayloadEncoder));
            let registry = SeriesRegistry::load(store);
            let request = build_request(args, &registry)?;
            let batch = catalog.generate(&request).await;
            println!("generated {} tickets", batch.len());
            for ticket in &batch {
                println!("  {}  {}", ticket.id, ticket.code);
            }
        }
        Command::Series { command } => run_series_command(command, store),
        Command::Sell { id } => {
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            catalog.mark_sold(id);
            print_metrics(&catalog);
        }
        Command::Unsell { id } => {
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            catalog.mark_unsold(id);
            print_metrics(&catalog);
        }
        Command::SellNext => {
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            match catalog.mark_next_sold() {
                Some(id) => {
                    let code = catalog.ticket(id).map(|t| t.code.clone()).unwrap_or_default();
                    println!("sold {code}");
                }
                None => println!("no unsold tickets"),
            }
        }
        Command::SellAll => {
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            catalog.bulk_mark_sold();
            print_metrics(&catalog);
        }
        Command::Remove { id } => {
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            catalog.remove(id);
            print_metrics(&catalog);
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(CliError::InvalidArg(
                    "clearing the catalog requires --yes".to_string(),
                ));
            }
            let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
            catalog.clear();
            println!("catalog cleared");
        }
        Command::Status => {
            let catalog = TicketCatalog::load(store.clone(), Box::new(QrPayloadEncoder));
            let dark = store.load(DARK_PREF_KEY).as_deref() == Some("1");
            print_metrics(&catalog);
            println!("dark mode: {}", if dark { "on" } else { "off" });
            for ticket in catalog.tickets() {
                let state = if ticket.sold { "sold" } else { "available" };
                println!("  {}  {}  {:>10}  {}", ticket.id, ticket.code, ticket.price, state);
            }
        }
        Command::Export { command } => run_export_command(command, store, config).await?,
        Command::Dark { state } => {
            let value = if state == "on" { "1" } else { "0" };
            if let Err(err) = store.save(DARK_PREF_KEY, value) {
                tracing::warn!(event = "pref_save_failed", error = %err);
            }
            println!("dark mode: {state}");
        }
    }
    Ok(())
}

fn run_series_command(command: SeriesCommand, store: Arc<FileStore>) {
    let mut registry = SeriesRegistry::load(store);
    match command {
        SeriesCommand::Save { name, prefix } => {
            if registry.save(&name, &prefix) {
                println!("saved series {name}");
            } else {
                println!("series {name} already exists; left untouched");
            }
        }
        SeriesCommand::Remove { name } => {
            if registry.remove(&name) {
                println!("removed series {name}");
            } else {
                println!("no series named {name}");
            }
        }
        SeriesCommand::List => {
            if registry.series().is_empty() {
                println!("no saved series");
            }
            for series in registry.series() {
                println!("  {}  ({})", series.name, series.prefix);
            }
        }
    }
}

async fn run_export_command(
    command: ExportCommand,
    store: Arc<FileStore>,
    config: &CliConfig,
) -> Result<(), CliError> {
    let catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));

    match command {
        ExportCommand::Png { id, out } => {
            let ticket = find_ticket(&catalog, id)?;
            let artifact = pipeline.export_single(ticket, ExportFormat::Raster).await?;
            write_artifact(&artifact, &out, config)?;
        }
        ExportCommand::Pdf { id, out } => {
            let ticket = find_ticket(&catalog, id)?;
            let artifact = pipeline.export_single(ticket, ExportFormat::Document).await?;
            write_artifact(&artifact, &out, config)?;
        }
        ExportCommand::Zip { out } => {
            let series = active_series(&catalog, &out, config);
            let outcome = pipeline.export_archive(catalog.tickets(), &series).await?;
            report_outcome(&outcome);
            write_artifact(&outcome.artifact, &out, config)?;
        }
        ExportCommand::PdfAll { out } => {
            let series = active_series(&catalog, &out, config);
            let outcome = pipeline.export_document(catalog.tickets(), &series).await?;
            report_outcome(&outcome);
            write_artifact(&outcome.artifact, &out, config)?;
        }
        ExportCommand::Sheet { out } => {
            let series = active_series(&catalog, &out, config);
            let outcome = pipeline
                .export_spreadsheet(catalog.tickets(), &series)
                .await?;
            write_artifact(&outcome.artifact, &out, config)?;
        }
    }
    Ok(())
}

fn build_request(args: GenerateArgs, registry: &SeriesRegistry) -> Result<GenerateRequest, CliError> {
    let (series, prefix) = match &args.use_series {
        Some(name) => {
            let series = registry
                .lookup(name)
                .ok_or_else(|| CliError::InvalidArg(format!("no series named {name}")))?;
            (series.name.clone(), series.prefix.clone())
        }
        None => (args.series, args.prefix),
    };

    Ok(GenerateRequest {
        series,
        prefix,
        start_folio: args.start_folio,
        count: args.count,
        price: args.price,
    })
}

fn find_ticket(catalog: &TicketCatalog, id: Uuid) -> Result<&boletera_core::Ticket, CliError> {
    catalog
        .ticket(id)
        .ok_or_else(|| CliError::InvalidArg(format!("no ticket with id {id}")))
}

/// Series name used for batch artifact naming: flag, configured default,
/// else the series of the most recent batch.
fn active_series(catalog: &TicketCatalog, out: &OutArgs, config: &CliConfig) -> String {
    out.series
        .clone()
        .or_else(|| config.default_series.clone())
        .or_else(|| catalog.tickets().first().map(|t| t.series.clone()))
        .unwrap_or_default()
}

fn write_artifact(artifact: &Artifact, out: &OutArgs, config: &CliConfig) -> Result<(), CliError> {
    let dir = out
        .out
        .clone()
        .or_else(|| config.default_out_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn print_metrics(catalog: &TicketCatalog) {
    let metrics = catalog.metrics();
    println!(
        "total: {}  sold: {}  available: {}",
        metrics.total, metrics.sold, metrics.available
    );
}

fn report_outcome(outcome: &ExportOutcome) {
    if outcome.skipped > 0 {
        println!(
            "rendered {} tickets, skipped {} without a visual representation",
            outcome.rendered, outcome.skipped
        );
    }
}
