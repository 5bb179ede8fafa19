use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The file name looked up in the working directory when no configuration
/// path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".outline.toml";

/// Configuration for outline rendering.
///
/// Every field has a default, so an absent configuration file behaves exactly
/// like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The document read when no path is given on the command line.
    default_file: PathBuf,

    /// Number of spaces per depth level in tree output.
    indent: usize,

    /// Depth limit for tree output.
    ///
    /// Zero means unlimited.
    max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            indent: default_indent(),
            max_depth: 0,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from `path` if given, otherwise from
    /// [`DEFAULT_CONFIG_FILE`] in `dir` if that file exists, otherwise returns
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read or
    /// parsed. An explicitly requested file that does not exist is an error.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, String> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Serializes the configuration to TOML, including its version tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }

    /// Returns the document read when no path is given.
    #[must_use]
    pub fn default_file(&self) -> &Path {
        &self.default_file
    }

    /// Returns the number of spaces per depth level.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Returns the tree depth limit (zero for unlimited).
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("README.md")
}

const fn default_indent() -> usize {
    2
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_file")]
        default_file: PathBuf,

        #[serde(default = "default_indent")]
        indent: usize,

        #[serde(default)]
        max_depth: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_file,
                indent,
                max_depth,
            } => Self {
                default_file,
                indent,
                max_depth,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_file: config.default_file,
            indent: config.indent,
            max_depth: config.max_depth,
        }
    }
}
