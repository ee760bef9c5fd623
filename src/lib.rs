//! # Gleaner
//!
//! A small tool for site-translation preparation: point it at a list of
//! page links, tell it which element holds the text, and it collects the
//! rendered text of every page into one spreadsheet or text file.
//!
//! ## Architecture
//!
//! A strictly linear pipeline; each stage consumes the previous stage's
//! output in full before the next begins:
//!
//! ```text
//! Input file → Normalizer → Prober → Retriever → Cleaner → Exporter
//! ```
//!
//! - [`input`]: reads links from an `.xml` sitemap export or a `.txt` file
//! - [`normalizer`]: rewrites links into the text-extraction proxy's format
//!   and drops unsupported ones
//! - [`scraper`]: headless Chrome via chromiumoxide; one XPath locator,
//!   polled with a wall-clock deadline per link
//! - [`cleaner`]: regex passes over the aggregated text
//! - [`export`]: `.xlsx`/`.txt` output plus the discarded-links report
//!
//! The pipeline blocks on the user at a few checkpoints (file choice,
//! locator confirmation, cleaning options); those all go through the
//! [`Interact`](interact::Interact) trait so everything above is testable
//! without a terminal.

/// Application context and error handling.
pub mod app;

/// Text post-processing: whitespace, boilerplate and measurement removal.
pub mod cleaner;

/// Command-line interface using clap.
pub mod cli;

/// Configuration, read from `~/.config/gleaner/config.toml`.
pub mod config;

/// Output persistence and the discarded-links report.
pub mod export;

/// Link file reading (`.xml` sitemap or `.txt`).
pub mod input;

/// Interactive prompt boundary between pipeline and terminal.
pub mod interact;

/// Link normalization for the text-extraction proxy.
pub mod normalizer;

/// Pipeline orchestration: probe, bulk retrieval, cleaning, export.
pub mod pipeline;

/// Browser automation and the bounded polling loop.
pub mod scraper;
