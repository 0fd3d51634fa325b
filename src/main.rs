use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use safeload_core::{
    ClassifierClient, Config, SafeLoader, classify_loader_type, file_owner, resolve_source_path,
    source_size,
};
use safeload_document::{DirectoryLoader, Document, DocumentLoader, TextLoader};

#[derive(Debug, Parser)]
#[command(name = "safeload", version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true, env = "SAFELOAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load documents from a file or directory and report them.
    Load {
        path: PathBuf,
        #[arg(long)]
        app_id: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        description: Option<String>,
        /// Load one document at a time instead of all at once.
        #[arg(long)]
        lazy: bool,
    },
    /// Print the metadata that would be reported for a path, without reporting.
    Inspect { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config/default.toml"));
    let config = Config::load(&config_path)?;

    match cli.command {
        Command::Load {
            path,
            app_id,
            owner,
            description,
            lazy,
        } => {
            let client = ClassifierClient::new(&config.classifier)
                .context("failed to build classifier client")?;
            let safe = SafeLoader::new(select_loader(&path), app_id, owner, description, client)
                .await?;
            tracing::info!(load_id = safe.load_id(), "loading {}", path.display());

            let mut count = 0usize;
            if lazy {
                let mut batches = safe.lazy_load()?;
                while let Some(batch) = batches.next().await {
                    for doc in batch? {
                        print_document(&doc);
                        count += 1;
                    }
                }
            } else {
                for doc in safe.load().await? {
                    print_document(&doc);
                    count += 1;
                }
            }
            tracing::info!(
                documents = count,
                discover_sent = safe.discover_sent(),
                loader_sent = safe.loader_sent(),
                "load finished"
            );
        }
        Command::Inspect { path } => {
            let loader = select_loader(&path);
            let source_path = resolve_source_path(&loader);
            let summary = serde_json::json!({
                "loader": loader.loader_name(),
                "source_path": source_path,
                "source_type": classify_loader_type(loader.loader_name()),
                "source_size": source_size(&source_path).ok(),
                "source_owner": file_owner(&source_path),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn select_loader(path: &Path) -> Box<dyn DocumentLoader> {
    if path.is_dir() {
        return Box::new(DirectoryLoader::new(path));
    }
    #[cfg(feature = "pdf")]
    if path.extension().is_some_and(|ext| ext == "pdf") {
        return Box::new(safeload_document::PdfLoader::new(path));
    }
    Box::new(TextLoader::new(path))
}

fn print_document(doc: &Document) {
    println!("{}\t{} chars", doc.metadata.source, doc.content.chars().count());
}
