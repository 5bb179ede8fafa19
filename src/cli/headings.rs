use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use outline::{Document, Outline};
use tracing::instrument;

use super::OutputFormat;

#[derive(Debug, Default, Parser)]
#[command(about = "Print one record per heading, in document order")]
pub struct Headings {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Headings {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, document: &Document) -> anyhow::Result<()> {
        let outline = document.outline();
        let mut stdout = io::stdout().lock();
        self.render(&outline, &mut stdout)
    }

    fn render<W: Write>(&self, outline: &Outline, writer: &mut W) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Text => {
                for record in outline.records() {
                    writeln!(writer, "{record}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, outline.records())
                    .context("failed to render json output")?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use outline::build_hierarchy;

    use super::*;

    fn render(output: OutputFormat, lines: &[&str]) -> String {
        let mut buffer = Vec::new();
        Headings { output }
            .render(&build_hierarchy(lines), &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn text_records() {
        let actual = render(
            OutputFormat::Text,
            &["# Title", "body text", "## Sub", "more text"],
        );
        assert_eq!(actual, "1: # Title\n2: ## Sub\n");
    }

    #[test]
    fn no_headings_prints_nothing() {
        assert_eq!(render(OutputFormat::Text, &["just", "text"]), "");
    }

    #[test]
    fn json_records() {
        let actual = render(OutputFormat::Json, &["# A", "### B"]);
        let value: serde_json::Value = serde_json::from_str(&actual).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "level": 1, "line": "# A" },
                { "level": 3, "line": "### B" },
            ])
        );
    }
}
