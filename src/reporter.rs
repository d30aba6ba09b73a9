use crate::errors::{Error, Result};
use crate::replacer::OccurrenceCounts;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Prints per-file and summary occurrence counts.
///
/// Output goes to any `Write` target so runs can be captured in tests.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Reports one file's counts. Files where nothing matched are not
    /// mentioned. Returns `true` if anything was printed.
    pub fn report_file(&mut self, rel_path: &Path, counts: &OccurrenceCounts) -> Result<bool> {
        if counts.is_all_zero() {
            return Ok(false);
        }
        writeln!(self.out, "\n[FILE] {}", rel_path.display())?;
        for (name, count) in counts.non_zero() {
            writeln!(self.out, "  {name}: {count} occurrence(s)")?;
        }
        Ok(true)
    }

    /// Prints the run-wide totals, every rule included.
    pub fn report_summary(&mut self, totals: &OccurrenceCounts) -> Result<()> {
        writeln!(self.out, "\nSummary:")?;
        for (name, count) in totals.iter() {
            writeln!(self.out, "  {name}: {count} total occurrence(s)")?;
        }
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Overwrites `path` with `new_text` unless the file already holds exactly
/// that text.
///
/// The file is re-read here rather than trusting the caller's copy. The new
/// contents go to a temporary file next to the original, which then replaces
/// it with the original permissions. A symlinked path is resolved first and
/// its target is rewritten. Returns `true` if the file was written.
pub fn write_if_changed(path: &Path, new_text: &str) -> Result<bool> {
    let on_disk = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    if on_disk == new_text {
        log::debug!("{} already up to date", path.display());
        return Ok(false);
    }

    // Write through symlinks so the link itself survives the rename.
    let target = fs::canonicalize(path).map_err(|e| Error::file(path, e))?;
    let Some(parent) = target.parent() else {
        return Err(format!("Could not get parent directory for {}", target.display()).into());
    };

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| Error::file(parent, e))?;
    temp_file
        .write_all(new_text.as_bytes())
        .map_err(|e| Error::file(path, e))?;

    let perms = fs::metadata(&target).map_err(|e| Error::file(path, e))?.permissions();
    fs::set_permissions(temp_file.path(), perms).map_err(|e| Error::file(path, e))?;

    temp_file.persist(&target)?;
    log::info!("Wrote {}", path.display());
    Ok(true)
}
