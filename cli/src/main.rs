//! SimpleRAG entry point
//!
//! Loads the encoder and corpus, builds the index once, then answers queries
//! given on the command line (or the demo questions, or stdin with
//! `--interactive`). Answers go to stdout, logs to stderr.

use clap::Parser;
use simplerag_cli::{Args, QueryMode, Session, Settings};
use simplerag_core::Retriever;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simplerag=info,simplerag_cli=info,simplerag_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let settings = Settings::from_args(args)?;

    if settings.encoder.requires_download() {
        tracing::info!("Encoder: {} (model files are fetched on first use)", settings.encoder);
    } else {
        tracing::info!("Encoder: {} (offline)", settings.encoder);
    }
    let encoder = settings.encoder.load(settings.cache_dir.as_deref())?;

    let corpus = settings.corpus.load()?;
    tracing::info!("Corpus: {} documents", corpus.len());

    let retriever = Retriever::ready(encoder, corpus, settings.retrieval)?;
    let session = Session::new(&retriever, settings.output);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let stats = match &settings.mode {
        QueryMode::Batch(queries) => session.run_batch(queries, &mut out)?,
        QueryMode::Interactive => session.run_interactive(std::io::stdin().lock(), &mut out)?,
    };

    tracing::info!(
        "Done: {} answered, {} not found, {} failed",
        stats.answered,
        stats.not_found,
        stats.failed
    );
    Ok(())
}
