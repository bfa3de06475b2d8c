//! Command-line arguments and resolved settings

use std::path::PathBuf;

use clap::Parser;
use simplerag_core::{
    Corpus, EncoderKind, RagError, RetrieverConfig, DEFAULT_THRESHOLD, DEFAULT_TOP_K,
};

/// Queries answered when none are given
pub const DEMO_QUERIES: [&str; 3] = [
    "Which fruits contain vitamins?",
    "Which foods can supplement iron?",
    "What foods can lower blood pressure?",
];

#[derive(Parser, Debug)]
#[command(name = "simplerag")]
#[command(about = "Answer questions from a small fact corpus by embedding similarity")]
#[command(version)]
pub struct Args {
    /// Queries to answer (defaults to three demo questions)
    pub queries: Vec<String>,

    /// Embedding model (all-MiniLM-L6-v2, bge-small-en-v1.5, hashed, ...)
    #[arg(long, short, default_value = "all-MiniLM-L6-v2")]
    pub model: String,

    /// Model cache directory (else SIMPLERAG_CACHE_DIR or ~/.simplerag/models)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Corpus file: JSON array of strings, or one fact per line
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Maximum documents per answer
    #[arg(long = "top-k", short = 'k', default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Drop documents at or beyond this squared L2 distance
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Read queries from stdin, one per line
    #[arg(long, short, conflicts_with = "queries")]
    pub interactive: bool,

    /// Print one JSON object per query instead of text
    #[arg(long)]
    pub json: bool,
}

/// Where the corpus comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// Built-in food and nutrition facts
    Builtin,
    /// File on disk
    File(PathBuf),
}

impl CorpusSource {
    /// Load the corpus
    pub fn load(&self) -> Result<Corpus, RagError> {
        match self {
            Self::Builtin => Ok(Corpus::builtin()),
            Self::File(path) => Corpus::from_path(path),
        }
    }
}

/// How queries are supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// Fixed list, answered in order
    Batch(Vec<String>),
    /// Line by line from stdin until EOF, `quit` or `exit`
    Interactive,
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub encoder: EncoderKind,
    pub cache_dir: Option<PathBuf>,
    pub corpus: CorpusSource,
    pub retrieval: RetrieverConfig,
    pub mode: QueryMode,
    pub output: OutputFormat,
}

impl Settings {
    /// Resolve and validate command-line arguments
    pub fn from_args(args: Args) -> Result<Self, RagError> {
        let encoder: EncoderKind = args.model.parse()?;

        let retrieval = RetrieverConfig {
            top_k: args.top_k,
            threshold: args.threshold,
        };
        retrieval.validate()?;

        let corpus = match args.corpus {
            Some(path) => CorpusSource::File(path),
            None => CorpusSource::Builtin,
        };

        let mode = if args.interactive {
            QueryMode::Interactive
        } else if args.queries.is_empty() {
            QueryMode::Batch(DEMO_QUERIES.iter().map(|q| q.to_string()).collect())
        } else {
            QueryMode::Batch(args.queries)
        };

        let output = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self {
            encoder,
            cache_dir: args.cache_dir,
            corpus,
            retrieval,
            mode,
            output,
        })
    }
}
