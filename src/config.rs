//!
//! Configuration for mdabbr: structure, loading from `.mdabbr.toml`, and the
//! default file written by `mdabbr init`.

use crate::abbreviation::{AbbreviationInfo, parse_affix_list};
use crate::conversion::DocumentOptions;
use crate::matcher::MatchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = ".mdabbr.toml";

const KNOWN_KEYS: &[&str] = &[
    "metadata-keyword",
    "use-extra-syntax",
    "detect-non-spaced-script",
    "detect-affixes",
    "affixes",
    "abbreviations",
];

/// Represents the configuration loaded from `.mdabbr.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Frontmatter key holding metadata abbreviations; empty disables them
    pub metadata_keyword: String,

    /// Recognize `*[KEY]: title` definition lines
    pub use_extra_syntax: bool,

    /// Look for abbreviations inside words of scripts written without spaces
    pub detect_non_spaced_script: bool,

    /// Match keys followed by one of `affixes`
    pub detect_affixes: bool,

    /// Comma-separated affix list, e.g. `"s, es"`
    pub affixes: String,

    /// Global abbreviations, available in every document
    pub abbreviations: Vec<AbbreviationInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metadata_keyword: "abbr".to_string(),
            use_extra_syntax: true,
            detect_non_spaced_script: false,
            detect_affixes: false,
            affixes: "s, es".to_string(),
            abbreviations: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in messages.
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("{path}: Failed to parse TOML: {e}")))?;

        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("[WARN] Unknown key in {path}: {key}");
            }
        }

        toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        log::debug!("[mdabbr-config] Loading config file: {path_str}");

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path_str.clone(),
        })?;

        Self::from_toml_str(&content, &path_str)
    }

    /// Load `.mdabbr.toml` from `dir` if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            log::debug!("[mdabbr-config] No {CONFIG_FILE_NAME} in {}", dir.display());
            Ok(None)
        }
    }

    /// The affixes to try, empty unless affix detection is switched on.
    pub fn affix_list(&self) -> Vec<String> {
        if self.detect_affixes {
            parse_affix_list(&self.affixes)
        } else {
            Vec::new()
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            affixes: self.affix_list(),
            detect_non_spaced_script: self.detect_non_spaced_script,
        }
    }

    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            globals: self.abbreviations.clone(),
            metadata_keyword: self.metadata_keyword.clone(),
            use_extra_syntax: self.use_extra_syntax,
            match_options: self.match_options(),
            frontmatter: None,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# mdabbr configuration file

# Frontmatter key holding document abbreviations (empty string disables them)
metadata-keyword = "abbr"

# Recognize `*[KEY]: title` definition lines
use-extra-syntax = true

# Look for abbreviations inside words of scripts written without spaces (CJK)
detect-non-spaced-script = false

# Also match abbreviations followed by one of the affixes below
detect-affixes = false
affixes = "s, es"

# Global abbreviations (uncomment and modify as needed)
# [[abbreviations]]
# key = "HTML"
# title = "HyperText Markup Language"
#
# [[abbreviations]]
# key = "CSS"
# title = "Cascading Style Sheets"
"#;

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.to_string(),
    })
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}
