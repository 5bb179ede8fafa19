//! Building a [`Section`] tree from the lines of a document.
//!
//! The build is a single fold over the lines. The accumulator keeps a stack
//! of open sections; a new heading closes every open section whose level is
//! greater than or equal to its own, then becomes the innermost open section.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use crate::domain::{Heading, HeadingLevel, Section};

/// One display row per heading, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    level: HeadingLevel,
    line: String,
}

impl Record {
    /// The heading level.
    #[must_use]
    pub const fn level(&self) -> HeadingLevel {
        self.level
    }

    /// The heading line as it appeared in the document.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

impl From<&Heading> for Record {
    fn from(heading: &Heading) -> Self {
        Self {
            level: heading.level(),
            line: heading.line().to_string(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.line)
    }
}

/// The result of building a hierarchy: the root section and the heading
/// records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    root: Section,
    records: Vec<Record>,
}

impl Outline {
    /// The implicit root section.
    #[must_use]
    pub const fn root(&self) -> &Section {
        &self.root
    }

    /// One record per heading line, in document order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether the document was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.root.body().is_empty()
    }

    /// A copy of the section tree without sections deeper than `max_depth`
    /// (zero keeps everything).
    #[must_use]
    pub fn truncated(&self, max_depth: usize) -> Section {
        self.root.truncated(max_depth)
    }
}

/// Builds the heading hierarchy of a document.
///
/// Each line is trimmed before it is classified. Lines starting with `#` open
/// a section nested under the nearest preceding section of strictly lesser
/// level; every other line (blank lines included) is appended to the body of
/// the innermost open section.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn build_hierarchy<I, S>(lines: I) -> Outline
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let outline = lines
        .into_iter()
        .fold(Builder::default(), |builder, line| {
            builder.push_line(line.as_ref().trim())
        })
        .finish();

    tracing::debug!(
        headings = outline.records.len(),
        root_body = outline.root.body().len(),
        "built hierarchy"
    );

    outline
}

/// Fold accumulator for [`build_hierarchy`].
#[derive(Debug, Default)]
struct Builder {
    root: Section,

    /// Open sections, outermost first. Levels are strictly increasing.
    open: Vec<Section>,

    records: Vec<Record>,
}

impl Builder {
    fn push_line(mut self, line: &str) -> Self {
        match Heading::parse(line) {
            Some(heading) => self.open_section(heading),
            None => self.current_mut().push_body(line.to_string()),
        }
        self
    }

    fn open_section(&mut self, heading: Heading) {
        tracing::trace!(level = %heading.level(), title = heading.title(), "opening section");

        self.records.push(Record::from(&heading));

        let level = heading.level();
        while self
            .open
            .last()
            .is_some_and(|section| section.level() >= level)
        {
            self.close_section();
        }

        self.open.push(Section::new(heading));
    }

    fn close_section(&mut self) {
        if let Some(section) = self.open.pop() {
            self.current_mut().push_child(section);
        }
    }

    fn current_mut(&mut self) -> &mut Section {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn finish(mut self) -> Outline {
        while !self.open.is_empty() {
            self.close_section();
        }

        Outline {
            root: self.root,
            records: self.records,
        }
    }
}
