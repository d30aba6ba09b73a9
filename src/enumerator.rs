use crate::config::Settings;
use crate::errors::Result;
use std::path::{Path, PathBuf};
use std::vec;
use walkdir::WalkDir;

/// Lazily yields the files a run should process.
///
/// Configured directories are resolved against `root` and walked one after
/// another. Directories that do not exist are skipped. Within a directory,
/// entries come out in whatever order the filesystem returns them. Symlinks
/// to files are yielded under their link path.
pub struct FileEnumerator<'a> {
    settings: &'a Settings,
    root: PathBuf,
    pending: vec::IntoIter<String>,
    current: Option<walkdir::IntoIter>,
}

impl<'a> FileEnumerator<'a> {
    /// Creates an enumerator over `settings.directories` relative to `root`.
    pub fn new(settings: &'a Settings, root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            root: root.into(),
            pending: settings.directories.clone().into_iter(),
            current: None,
        }
    }

    /// Moves on to the next configured directory that exists.
    fn advance_directory(&mut self) -> bool {
        for rel_dir in self.pending.by_ref() {
            let base = self.root.join(&rel_dir);
            if !base.is_dir() {
                log::debug!("Skipping missing directory {}", base.display());
                continue;
            }
            log::debug!("Walking {}", base.display());
            self.current = Some(WalkDir::new(base).into_iter());
            return true;
        }
        false
    }
}

impl Iterator for FileEnumerator<'_> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(walker) = self.current.as_mut() else {
                if !self.advance_directory() {
                    return None;
                }
                continue;
            };

            match walker.next() {
                Some(Ok(entry)) => {
                    // `Path::is_file` follows a symlinked file; directory
                    // links are still not descended.
                    if entry.path().is_file()
                        && should_process_file(entry.path(), self.settings)
                    {
                        log::trace!("Candidate {}", entry.path().display());
                        return Some(Ok(entry.into_path()));
                    }
                }
                Some(Err(e)) => return Some(Err(e.into())),
                None => self.current = None,
            }
        }
    }
}

/// Determines if a file should be processed based on its extension.
///
/// The extension is the text after the last `.` of the file name and is
/// compared case-sensitively. Names like `.bashrc` have no extension.
fn should_process_file(path: &Path, settings: &Settings) -> bool {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|ext| settings.includes_extension(ext))
        .unwrap_or(false)
}
