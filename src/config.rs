use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Extension used when the config does not list any.
pub const DEFAULT_EXTENSION: &str = "mojo";

/// Name given to a replacement entry that does not carry one.
pub const UNNAMED_RULE: &str = "unnamed";

/// A named literal search/replace pair.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Label used when reporting counts.
    #[serde(default = "default_rule_name")]
    pub name: String,
    /// Literal text to look for. An empty string matches nothing.
    #[serde(default)]
    pub search: String,
    /// Text substituted for every occurrence of `search`.
    #[serde(default)]
    pub replace: String,
}

impl ReplacementRule {
    pub fn new(
        name: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// Where to look and which files to touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// File extensions to include, without a leading dot.
    pub include_extensions: BTreeSet<String>,
    /// Directories to walk, relative to the run root.
    pub directories: Vec<String>,
}

impl Settings {
    /// `true` if a file with this extension should be processed.
    pub fn includes_extension(&self, ext: &str) -> bool {
        self.include_extensions.contains(ext)
    }
}

/// A fully loaded configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub settings: Settings,
    pub rules: Vec<ReplacementRule>,
}

/// On-disk shape of the `[settings]` table.
#[derive(Deserialize)]
struct RawSettings {
    #[serde(default = "default_extensions")]
    include_extensions: Vec<String>,
    #[serde(default)]
    directories: Vec<String>,
}

/// On-disk shape of the whole document.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    settings: Option<RawSettings>,
    #[serde(default)]
    replacements: Vec<ReplacementRule>,
}

fn default_rule_name() -> String {
    UNNAMED_RULE.to_string()
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Anything that is not
    /// `.yaml` or `.yml` is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// A utility for loading replacement configurations.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and validates the configuration at `path`.
    ///
    /// Fails if the file cannot be read, does not parse, or lists no
    /// directories to walk.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::parse(&text, ConfigFormat::from_path(path))
    }

    /// Parses a configuration document already held in memory.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Config> {
        let raw: RawConfig = match format {
            ConfigFormat::Toml => toml::from_str(text)?,
            // An empty YAML document deserializes to nothing at all.
            ConfigFormat::Yaml if text.trim().is_empty() => RawConfig::default(),
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        };

        let raw_settings = raw.settings.unwrap_or_else(|| RawSettings {
            include_extensions: default_extensions(),
            directories: Vec::new(),
        });

        let settings = Settings {
            include_extensions: raw_settings
                .include_extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
            directories: raw_settings.directories,
        };

        if settings.directories.is_empty() {
            return Err("No directories specified in [settings.directories]".into());
        }

        Ok(Config {
            settings,
            rules: raw.replacements,
        })
    }
}

/// Trims whitespace and a single leading dot. Case is preserved because
/// extension matching is case-sensitive.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}
