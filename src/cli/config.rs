use std::{
    io::{self, Write},
    path::Path,
};

use outline::Config;
use tracing::instrument;

use super::{Input, terminal::Painter};

/// Show or initialise the configuration
///
/// Configuration is read from `.outline.toml` in the working directory, or
/// from the file given with `--config`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to the configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, input: &Input) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                let config = input.config()?;
                let mut stdout = io::stdout().lock();
                show_config(&config, &mut stdout)
            }
            ConfigCommand::Init { force } => {
                let path = input.config_path();
                init_config(&path, force)?;
                println!(
                    "{} {}",
                    Painter::detect().dim("Created"),
                    path.display()
                );
                Ok(())
            }
        }
    }
}

fn show_config<W: Write>(config: &Config, writer: &mut W) -> anyhow::Result<()> {
    let text = config.to_toml().map_err(anyhow::Error::msg)?;
    write!(writer, "{text}")?;
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .map_err(|e| anyhow::anyhow!("{e}"))
}
