//! `bulkrep` applies ordered, literal search/replace rules across a tree of
//! source files.
//!
//! A run is one linear pipeline:
//!
//! - `config`: loads settings and rules from a TOML (or YAML) document.
//! - `enumerator`: lazily walks the configured directories, filtered by
//!   file extension.
//! - `replacer`: the pure count-then-replace transformation over one file's
//!   text.
//! - `reporter`: prints per-file and total counts and writes changed files
//!   back in apply mode.
//! - `runner`: drives the pipeline and accumulates the run-wide totals.
//!
//! Everything runs on one thread; the first I/O error ends the run.

pub mod cli;
pub mod config;
pub mod enumerator;
pub mod errors;
pub mod logging;
pub mod replacer;
pub mod reporter;
pub mod runner;

// Re-export main types for easier access by library users.
pub use config::{Config, ConfigLoader, ReplacementRule, Settings};
pub use errors::{Error, Result};
pub use replacer::{OccurrenceCounts, apply_rules};
pub use runner::{Mode, RunSummary};
