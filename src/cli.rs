use std::path::{Path, PathBuf};

mod config;
mod headings;
mod show;
mod terminal;
mod tree;

use anyhow::Context;
use clap::{ArgAction, ValueEnum};
use headings::Headings;
use outline::{Config, DEFAULT_CONFIG_FILE, Document, LoadError};
use show::Show;
use tracing::instrument;
use tree::Tree;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The markdown document to read (defaults to the configured file,
    /// usually `README.md`)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// The markdown document to read, for use after a subcommand or when
    /// the file name collides with a subcommand name
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Path to a configuration file (defaults to `.outline.toml` if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let dir = std::env::current_dir().context("failed to determine working directory")?;
        let input = Input {
            path: self.path.or(self.file),
            config: self.config,
            dir,
        };

        self.command
            .unwrap_or_else(|| Command::Headings(Headings::default()))
            .run(&input)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Where the document and the configuration are read from.
#[derive(Debug)]
pub struct Input {
    path: Option<PathBuf>,
    config: Option<PathBuf>,
    dir: PathBuf,
}

impl Input {
    fn config(&self) -> anyhow::Result<Config> {
        Config::discover(self.config.as_deref(), &self.dir).map_err(anyhow::Error::msg)
    }

    /// The configuration file that is read, or written by `config init`.
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.dir.join(DEFAULT_CONFIG_FILE))
    }

    fn document(&self, config: &Config) -> anyhow::Result<Document> {
        let path = self
            .path
            .as_deref()
            .unwrap_or_else(|| config.default_file());
        load_document(path)
    }
}

#[instrument(level = "debug")]
fn load_document(path: &Path) -> anyhow::Result<Document> {
    match Document::load(path) {
        Ok(document) => {
            tracing::info!(lines = document.lines().len(), "read {}", path.display());
            Ok(document)
        }
        Err(LoadError::NotFound) => anyhow::bail!("{} not found", path.display()),
        Err(error) => Err(error).with_context(|| format!("failed to load {}", path.display())),
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print one "<level>: <line>" record per heading (default)
    Headings(Headings),

    /// Print the nested heading hierarchy
    Tree(Tree),

    /// Print a single section, addressed by its heading path
    Show(Show),

    /// Show or initialise the configuration file
    Config(config::Command),
}

impl Command {
    fn run(self, input: &Input) -> anyhow::Result<()> {
        match self {
            Self::Headings(command) => {
                let config = input.config()?;
                command.run(&input.document(&config)?)?;
            }
            Self::Tree(command) => {
                let config = input.config()?;
                command.run(&input.document(&config)?, &config)?;
            }
            Self::Show(command) => {
                let config = input.config()?;
                command.run(&input.document(&config)?)?;
            }
            Self::Config(command) => command.run(input)?,
        }
        Ok(())
    }
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn input(dir: &TempDir, path: Option<&str>) -> Input {
        Input {
            path: path.map(|name| dir.path().join(name)),
            config: None,
            dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_headings() {
        let cli = Cli::try_parse_from(["outline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.path.is_none());
        assert!(cli.file.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn positional_path() {
        let cli = Cli::try_parse_from(["outline", "doc.md"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("doc.md")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn positional_path_before_subcommand() {
        let cli = Cli::try_parse_from(["outline", "doc.md", "tree", "--body"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("doc.md")));
        assert!(matches!(cli.command, Some(Command::Tree(_))));
    }

    #[test]
    fn subcommand_without_path() {
        let cli = Cli::try_parse_from(["outline", "tree"]).unwrap();
        assert!(cli.path.is_none());
        assert!(matches!(cli.command, Some(Command::Tree(_))));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["outline", "tree", "-vv", "--file", "docs/guide.md"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("docs/guide.md")));
        assert!(matches!(cli.command, Some(Command::Tree(_))));
    }

    #[test]
    fn show_requires_a_path() {
        assert!(Cli::try_parse_from(["outline", "show"]).is_err());
        assert!(Cli::try_parse_from(["outline", "show", "Usage", "Linux"]).is_ok());
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["outline", "config", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config(_))));
    }

    #[test]
    fn load_missing_document_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing.md");

        let error = load_document(&path).unwrap_err();

        assert_eq!(error.to_string(), format!("{} not found", path.display()));
    }

    #[test]
    fn document_from_given_path() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("doc.md"), "# Given\n").unwrap();

        let document = input(&tmp, Some("doc.md"))
            .document(&Config::default())
            .unwrap();

        assert_eq!(document.lines(), ["# Given"]);
    }

    #[test]
    fn document_from_configured_default() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("index.md");
        std::fs::write(&doc, "# Configured\n").unwrap();
        std::fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            format!("_version = \"1\"\ndefault_file = {:?}\n", doc.display().to_string()),
        )
        .unwrap();

        let input = input(&tmp, None);
        let config = input.config().unwrap();
        let document = input.document(&config).unwrap();

        assert_eq!(document.lines(), ["# Configured"]);
    }

    #[test]
    fn config_path_defaults_to_dir() {
        let tmp = tempfile::tempdir().unwrap();

        assert_eq!(
            input(&tmp, None).config_path(),
            tmp.path().join(DEFAULT_CONFIG_FILE)
        );
    }
}
