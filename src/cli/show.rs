use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use outline::{Document, Heading, Section};
use tracing::instrument;

use super::{OutputFormat, terminal::Painter};

#[derive(Debug, Parser)]
#[command(about = "Display a single section and its direct subsections")]
pub struct Show {
    /// Heading texts leading to the section, starting from a top-level
    /// heading (e.g. `Installation Linux`)
    #[arg(required = true, value_name = "TITLE")]
    path: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, document: &Document) -> anyhow::Result<()> {
        let outline = document.outline();

        tracing::debug!(path = ?self.path, "looking up section");
        let Some(section) = outline.root().find(&self.path) else {
            anyhow::bail!("no section found at '{}'", self.path.join(" > "));
        };

        let mut stdout = io::stdout().lock();
        self.render(section, Painter::detect(), &mut stdout)
    }

    fn render<W: Write>(
        &self,
        section: &Section,
        painter: Painter,
        writer: &mut W,
    ) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Text => output_text(section, painter, writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, section)
                    .context("failed to render json output")?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}

fn output_text<W: Write>(section: &Section, painter: Painter, writer: &mut W) -> io::Result<()> {
    if let Some(heading) = section.heading() {
        writeln!(writer, "{}", painter.heading(heading.level(), heading.line()))?;
    }

    for line in section.body() {
        writeln!(writer, "{line}")?;
    }

    if !section.children().is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", painter.dim("Subsections"))?;
        for child in section.children() {
            let line = child.heading().map_or("", Heading::line);
            writeln!(writer, "  {line}")?;
        }
    }
    Ok(())
}
