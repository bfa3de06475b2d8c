//! SimpleRAG command-line front end
//!
//! Argument parsing, settings resolution and the query loop that prints
//! answers from a [`simplerag_core::Retriever`].

pub mod config;
pub mod session;

pub use config::{Args, CorpusSource, OutputFormat, QueryMode, Settings, DEMO_QUERIES};
pub use session::{Session, SessionStats};
