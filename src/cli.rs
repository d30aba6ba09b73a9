use crate::runner::Mode;
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;

/// Config-driven literal search/replace across a source tree.
///
/// Reads an ordered list of search/replace rules and applies them to every
/// file with a matching extension under the configured directories.
/// Directories are resolved from the current working directory.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bulk literal search/replace driven by a TOML config",
    long_about = "bulkrep - apply ordered literal search/replace rules across a source tree.

Config file format (bulk.toml):
  [settings]
  include_extensions = [\"mojo\"]
  directories = [\"7-point-stencil/Mojo\"]

  [[replacements]]
  name = \"alias-to-comptime\"
  search = \"alias \"
  replace = \"comptime \"

QUICK EXAMPLES:
  bulkrep --config bulk.toml --dry-run   # Preview counts, write nothing
  bulkrep --config bulk.toml --apply     # Rewrite matching files"
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(false)
        .args(["dry_run", "apply"])
))]
pub struct Args {
    /// Path to the TOML (or YAML) configuration file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Apply changes to files.
    #[arg(long)]
    pub apply: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The run mode selected on the command line, or `None` unless exactly
    /// one of `--dry-run`/`--apply` is set.
    pub fn mode(&self) -> Option<Mode> {
        Mode::from_flags(self.dry_run, self.apply)
    }
}

/// The usage error for a missing or conflicting mode flag.
pub fn mode_error() -> clap::Error {
    Args::command().error(
        ErrorKind::ArgumentConflict,
        "exactly one of '--dry-run' or '--apply' must be given",
    )
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run() {
        let args = Args::try_parse_from(["bulkrep", "--config", "bulk.toml", "--dry-run"]).unwrap();
        assert_eq!(args.config, PathBuf::from("bulk.toml"));
        assert_eq!(args.mode(), Some(Mode::DryRun));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_apply_with_verbosity() {
        let args = Args::try_parse_from(["bulkrep", "-c", "bulk.toml", "--apply", "-vv"]).unwrap();
        assert_eq!(args.mode(), Some(Mode::Apply));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_both_modes_rejected() {
        let err = Args::try_parse_from(["bulkrep", "--config", "c.toml", "--dry-run", "--apply"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_no_mode_rejected() {
        let err = Args::try_parse_from(["bulkrep", "--config", "c.toml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_hand_built_args_without_single_mode() {
        let mut args =
            Args::try_parse_from(["bulkrep", "--config", "c.toml", "--dry-run"]).unwrap();
        args.apply = true;
        assert_eq!(args.mode(), None);

        args.dry_run = false;
        args.apply = false;
        assert_eq!(args.mode(), None);

        assert_eq!(mode_error().kind(), ErrorKind::ArgumentConflict);
        assert_eq!(mode_error().exit_code(), 2);
    }

    #[test]
    fn test_config_required() {
        let err = Args::try_parse_from(["bulkrep", "--dry-run"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
