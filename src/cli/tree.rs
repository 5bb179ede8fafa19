use std::{
    borrow::Cow,
    io::{self, Write},
};

use anyhow::Context;
use clap::Parser;
use outline::{Config, Document, Section};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{self, Painter},
};

#[derive(Debug, Parser)]
#[command(about = "Print the nested heading hierarchy")]
pub struct Tree {
    /// Depth limit (0 = unlimited, defaults to the configured `max_depth`)
    #[arg(long, value_name = "N")]
    depth: Option<usize>,

    /// Also print the body lines of each section
    #[arg(long)]
    body: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Rendering options for text output.
#[derive(Debug, Clone, Copy)]
struct Layout {
    indent: usize,
    width: Option<usize>,
    painter: Painter,
}

impl Tree {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, document: &Document, config: &Config) -> anyhow::Result<()> {
        let depth = self.depth.unwrap_or(config.max_depth());
        let root = document.outline().truncated(depth);

        let layout = Layout {
            indent: config.indent(),
            width: terminal::terminal_width(),
            painter: Painter::detect(),
        };

        let mut stdout = io::stdout().lock();
        self.render(&root, layout, &mut stdout)
    }

    fn render<W: Write>(
        &self,
        root: &Section,
        layout: Layout,
        writer: &mut W,
    ) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Text => self.render_text(root, layout, writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, root)
                    .context("failed to render json output")?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    fn render_text<W: Write>(
        &self,
        root: &Section,
        layout: Layout,
        writer: &mut W,
    ) -> io::Result<()> {
        if self.body {
            write_body(root, "", layout, writer)?;
        }

        for (depth, section) in root.walk() {
            let indent = " ".repeat(layout.indent * (depth - 1));
            let title = section.title().unwrap_or_default();
            let line = clip(&format!("{indent}{title}"), layout.width).into_owned();
            writeln!(writer, "{}", layout.painter.heading(section.level(), &line))?;

            if self.body {
                let body_indent = " ".repeat(layout.indent * depth);
                write_body(section, &body_indent, layout, writer)?;
            }
        }
        Ok(())
    }
}

/// Writes the non-blank body lines of a section.
fn write_body<W: Write>(
    section: &Section,
    indent: &str,
    layout: Layout,
    writer: &mut W,
) -> io::Result<()> {
    for line in section.body().iter().filter(|line| !line.is_empty()) {
        let line = format!("{indent}{line}");
        writeln!(writer, "{}", layout.painter.dim(&clip(&line, layout.width)))?;
    }
    Ok(())
}

/// Shortens a line to fit the terminal width, marking the cut with an
/// ellipsis.
fn clip(line: &str, width: Option<usize>) -> Cow<'_, str> {
    match width {
        Some(width) if width > 0 && line.chars().count() > width => {
            let mut clipped: String = line.chars().take(width - 1).collect();
            clipped.push('…');
            Cow::Owned(clipped)
        }
        _ => Cow::Borrowed(line),
    }
}

#[cfg(test)]
mod tests {
    use outline::build_hierarchy;

    use super::*;

    const DOC: &[&str] = &[
        "intro",
        "# Title",
        "body text",
        "",
        "## Sub",
        "more text",
        "### Deep",
        "# Other",
    ];

    fn layout() -> Layout {
        Layout {
            indent: 2,
            width: None,
            painter: Painter::plain(),
        }
    }

    fn render(tree: &Tree, depth: usize, layout: Layout) -> String {
        let root = build_hierarchy(DOC).truncated(depth);
        let mut buffer = Vec::new();
        tree.render(&root, layout, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn tree(body: bool, output: OutputFormat) -> Tree {
        Tree {
            depth: None,
            body,
            output,
        }
    }

    #[test]
    fn indented_titles() {
        let actual = render(&tree(false, OutputFormat::Text), 0, layout());
        assert_eq!(actual, "Title\n  Sub\n    Deep\nOther\n");
    }

    #[test]
    fn depth_limit() {
        let actual = render(&tree(false, OutputFormat::Text), 2, layout());
        assert_eq!(actual, "Title\n  Sub\nOther\n");
    }

    #[test]
    fn with_body_skips_blank_lines() {
        let actual = render(&tree(true, OutputFormat::Text), 0, layout());
        assert_eq!(
            actual,
            "intro\nTitle\n  body text\n  Sub\n    more text\n    Deep\nOther\n"
        );
    }

    #[test]
    fn body_lines_are_clipped_to_width() {
        let layout = Layout {
            width: Some(8),
            ..layout()
        };
        let actual = render(&tree(true, OutputFormat::Text), 0, layout);
        assert_eq!(
            actual,
            "intro\nTitle\n  body …\n  Sub\n    mor…\n    Deep\nOther\n"
        );
    }

    #[test]
    fn parsed_arguments_render_bodies() {
        let tree = Tree::try_parse_from(["tree", "--body", "--depth", "1"]).unwrap();
        let depth = tree.depth.unwrap();

        let actual = render(&tree, depth, layout());

        assert_eq!(actual, "intro\nTitle\n  body text\nOther\n");
    }

    #[test]
    fn custom_indent() {
        let layout = Layout {
            indent: 4,
            ..layout()
        };
        let actual = render(&tree(false, OutputFormat::Text), 2, layout);
        assert_eq!(actual, "Title\n    Sub\nOther\n");
    }

    #[test]
    fn json_tree() {
        let actual = render(&tree(false, OutputFormat::Json), 1, layout());
        let value: serde_json::Value = serde_json::from_str(&actual).unwrap();

        assert_eq!(value["body"], serde_json::json!(["intro"]));
        assert_eq!(value["children"][0]["title"], "Title");
        assert_eq!(value["children"][0]["children"], serde_json::json!([]));
        assert_eq!(value["children"][1]["line"], "# Other");
    }

    #[test]
    fn clip_long_lines() {
        assert_eq!(clip("abcdef", Some(4)), "abc…");
        assert_eq!(clip("abcd", Some(4)), "abcd");
        assert_eq!(clip("abcdef", None), "abcdef");
        assert_eq!(clip("äöüß", Some(3)), "äö…");
    }
}
