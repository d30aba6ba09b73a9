use crate::config::Config;
use crate::enumerator::FileEnumerator;
use crate::errors::{Error, Result};
use crate::replacer::{OccurrenceCounts, apply_rules};
use crate::reporter::{Reporter, write_if_changed};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Whether a run only reports or also writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Count and report, never write.
    DryRun,
    /// Count, report and write changed files back.
    Apply,
}

impl Mode {
    /// Builds the mode from the two CLI flags. Exactly one must be set.
    pub fn from_flags(dry_run: bool, apply: bool) -> Option<Self> {
        match (dry_run, apply) {
            (true, false) => Some(Mode::DryRun),
            (false, true) => Some(Mode::Apply),
            _ => None,
        }
    }

    pub fn writes(self) -> bool {
        self == Mode::Apply
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::DryRun => f.write_str("dry-run"),
            Mode::Apply => f.write_str("apply"),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub rel_path: PathBuf,
    pub counts: OccurrenceCounts,
    pub written: bool,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub files_written: usize,
    pub totals: OccurrenceCounts,
}

impl RunSummary {
    fn new(config: &Config) -> Self {
        Self {
            totals: OccurrenceCounts::zeroed(&config.rules),
            ..Self::default()
        }
    }

    /// Folds one file's outcome into the totals.
    fn absorb(&mut self, outcome: &FileOutcome) {
        self.files_scanned += 1;
        if !outcome.counts.is_all_zero() {
            self.files_matched += 1;
        }
        if outcome.written {
            self.files_written += 1;
        }
        self.totals.absorb(&outcome.counts);
    }
}

/// Runs the rules over a single file, reporting and optionally writing it.
pub fn process_file<W: Write>(
    path: &Path,
    root: &Path,
    config: &Config,
    mode: Mode,
    reporter: &mut Reporter<W>,
) -> Result<FileOutcome> {
    let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    let (new_text, counts) = apply_rules(&text, &config.rules);
    let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let mut written = false;
    if reporter.report_file(&rel_path, &counts)? && mode.writes() {
        written = write_if_changed(path, &new_text)?;
    }

    Ok(FileOutcome {
        rel_path,
        counts,
        written,
    })
}

/// The main entry point for a replacement run.
///
/// Walks every configured directory under `root`, applies the rules to each
/// candidate file in turn and prints the summary. The first I/O error ends
/// the run.
pub fn run<W: Write>(
    config: &Config,
    root: &Path,
    mode: Mode,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary> {
    log::info!(
        "Running in {mode} mode with {} rule(s) over {} director(ies)",
        config.rules.len(),
        config.settings.directories.len()
    );

    let mut summary = RunSummary::new(config);
    for path in FileEnumerator::new(&config.settings, root) {
        let outcome = process_file(&path?, root, config, mode, reporter)?;
        summary.absorb(&outcome);
    }

    reporter.report_summary(&summary.totals)?;
    if mode == Mode::DryRun {
        log::info!("Dry run: no files were modified");
    }

    log::info!(
        "Scanned {} file(s), {} matched, {} written",
        summary.files_scanned,
        summary.files_matched,
        summary.files_written
    );
    Ok(summary)
}
