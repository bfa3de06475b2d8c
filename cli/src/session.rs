//! Query loop
//!
//! Answers queries one at a time against a built retriever and writes the
//! result per query. A query-level failure is reported and the loop
//! continues; a fatal retriever error ends the session with `Err`.

use std::io::{BufRead, Write};

use serde::Serialize;
use simplerag_core::{Encoder, Retriever, SearchResult};

use crate::config::OutputFormat;

const DELIMITER_WIDTH: usize = 50;

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Queries with at least one retrieved document
    pub answered: usize,
    /// Queries where nothing cleared the threshold
    pub not_found: usize,
    /// Queries that failed (blank input, encoder error)
    pub failed: usize,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [SearchResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Serves queries from a ready retriever
pub struct Session<'a, E: Encoder> {
    retriever: &'a Retriever<E>,
    format: OutputFormat,
}

impl<'a, E: Encoder> Session<'a, E> {
    pub fn new(retriever: &'a Retriever<E>, format: OutputFormat) -> Self {
        Self { retriever, format }
    }

    /// Answer every query in order
    pub fn run_batch<W: Write>(
        &self,
        queries: &[String],
        out: &mut W,
    ) -> anyhow::Result<SessionStats> {
        let mut stats = SessionStats::default();
        for query in queries {
            self.handle(query, out, &mut stats)?;
        }
        out.flush()?;
        Ok(stats)
    }

    /// Answer lines from `input` until EOF or `quit`/`exit`; blank lines are skipped
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        input: R,
        out: &mut W,
    ) -> anyhow::Result<SessionStats> {
        let mut stats = SessionStats::default();
        for line in input.lines() {
            let line = line?;
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
                break;
            }
            self.handle(query, out, &mut stats)?;
            out.flush()?;
        }
        Ok(stats)
    }

    fn handle<W: Write>(
        &self,
        query: &str,
        out: &mut W,
        stats: &mut SessionStats,
    ) -> anyhow::Result<()> {
        match self.retriever.respond(query) {
            Ok(answer) => {
                if answer.is_not_found() {
                    stats.not_found += 1;
                } else {
                    stats.answered += 1;
                }
                tracing::debug!(query, hits = answer.results.len(), "answered");

                match self.format {
                    OutputFormat::Text => write_text(out, query, &answer.text)?,
                    OutputFormat::Json => write_json(
                        out,
                        &QueryReport {
                            query,
                            results: Some(&answer.results),
                            answer: Some(&answer.text),
                            error: None,
                        },
                    )?,
                }
            }
            Err(e) if e.is_fatal() => {
                out.flush()?;
                return Err(anyhow::Error::new(e).context(format!("query {:?}", query)));
            }
            Err(e) => {
                stats.failed += 1;
                tracing::warn!("Query {:?} failed: {}", query, e);

                match self.format {
                    OutputFormat::Text => write_text(out, query, &format!("Error: {}", e))?,
                    OutputFormat::Json => write_json(
                        out,
                        &QueryReport {
                            query,
                            results: None,
                            answer: None,
                            error: Some(e.to_string()),
                        },
                    )?,
                }
            }
        }
        Ok(())
    }
}

fn write_text<W: Write>(out: &mut W, query: &str, body: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Query: {}", query)?;
    writeln!(out, "{}", body)?;
    writeln!(out, "{}", "-".repeat(DELIMITER_WIDTH))
}

fn write_json<W: Write>(out: &mut W, report: &QueryReport<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
