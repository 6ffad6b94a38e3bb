//! lookout — inspect agent observation trace files (.jsonl)
//!
//! Usage:
//!   lookout validate <file>          → check every record against the kind registry
//!   lookout show <file>              → render records through the exhaustive renderer
//!   lookout show <file> --kinds run,chat
//!   lookout kinds                    → list the observation kind registry

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lookout_events::{is_valid_kind, ObservationKind};
use lookout_trace::{ObservationRenderer, TraceStore};

#[derive(Parser)]
#[command(
    name = "lookout",
    about = "Inspect agent observation trace files (.jsonl)",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every record in a trace file against the kind registry
    Validate {
        /// Path to a .jsonl trace file
        file: PathBuf,
    },
    /// Render a trace file through the exhaustive observation renderer
    Show {
        /// Path to a .jsonl trace file
        file: PathBuf,

        /// Only show these kinds (comma-separated wire tags, e.g. "run,chat")
        #[arg(long)]
        kinds: Option<String>,

        /// Prefix each record with its timestamp
        #[arg(long, default_value_t = false)]
        timestamps: bool,
    },
    /// List the observation kind registry
    Kinds,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lookout=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { file } => validate(&file),
        Commands::Show {
            file,
            kinds,
            timestamps,
        } => show(&file, kinds.as_deref(), timestamps),
        Commands::Kinds => {
            print_kinds();
            Ok(())
        }
    }
}

fn validate(file: &PathBuf) -> anyhow::Result<()> {
    let store = TraceStore::open(file);
    let report = store
        .check()
        .with_context(|| format!("reading {}", file.display()))?;
    for issue in &report.issues {
        eprintln!("{}", issue.message);
    }
    if !report.is_clean() {
        bail!(
            "{}: {} bad line(s), {} valid record(s)",
            file.display(),
            report.issues.len(),
            report.records
        );
    }
    println!("{}: {} record(s) ok", file.display(), report.records);
    Ok(())
}

fn show(file: &PathBuf, kinds: Option<&str>, timestamps: bool) -> anyhow::Result<()> {
    let filter = parse_kind_filter(kinds)?;
    let store = TraceStore::open(file);
    let records = store
        .read_all()
        .with_context(|| format!("reading {}", file.display()))?;
    let renderer = ObservationRenderer::new()?;

    for record in records {
        if let Some(wanted) = &filter {
            if !wanted.contains(&record.observation.kind()) {
                continue;
            }
        }
        let rendered = renderer.render(&record.observation)?;
        if timestamps {
            println!("--- {} ---", record.timestamp);
        }
        println!("{}\n", rendered);
    }
    Ok(())
}

/// Parse a comma-separated list of wire tags, rejecting unknown tokens
/// instead of silently showing nothing.
fn parse_kind_filter(kinds: Option<&str>) -> anyhow::Result<Option<Vec<ObservationKind>>> {
    let Some(kinds) = kinds else {
        return Ok(None);
    };
    let mut wanted = Vec::new();
    for token in kinds.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !is_valid_kind(token) {
            bail!("unknown observation kind: {:?}", token);
        }
        wanted.push(token.parse::<ObservationKind>()?);
    }
    Ok(Some(wanted))
}

fn print_kinds() {
    println!("{:<22} introduced", "kind");
    for kind in ObservationKind::ALL {
        println!("{:<22} {}", kind.as_str(), kind.introduced_in());
    }
}
