use serde::Serialize;

use crate::domain::{HeadingLevel, classify_level};

/// A heading line that opens a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    level: HeadingLevel,
    /// The trimmed line exactly as it appeared in the document.
    line: String,
    /// The line with its `#` run and surrounding whitespace removed.
    title: String,
}

impl Heading {
    /// Parses a trimmed line as a heading.
    ///
    /// Returns `None` if the line does not start with `#`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let level = classify_level(line);
        if !level.is_heading() {
            return None;
        }

        // the '#' run is ASCII, so the level is also a byte offset
        let title = line[level.get()..].trim().to_string();

        Some(Self {
            level,
            line: line.to_string(),
            title,
        })
    }

    /// The heading level.
    #[must_use]
    pub const fn level(&self) -> HeadingLevel {
        self.level
    }

    /// The original heading line.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The heading text without markup.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// The content owned by one heading, up to the next heading of equal or
/// lesser level.
///
/// The document root is a section without a heading. Children are kept in
/// document order, and each child has a strictly greater level than its
/// parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(flatten)]
    heading: Option<Heading>,
    body: Vec<String>,
    children: Vec<Self>,
}

impl Section {
    /// Creates the implicit root section of a document.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            heading: None,
            body: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an empty section opened by the given heading.
    #[must_use]
    pub const fn new(heading: Heading) -> Self {
        Self {
            heading: Some(heading),
            body: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The heading which opened this section, or `None` for the root.
    #[must_use]
    pub const fn heading(&self) -> Option<&Heading> {
        self.heading.as_ref()
    }

    /// The heading text, or `None` for the root.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.heading.as_ref().map(Heading::title)
    }

    /// The heading level. The root has level zero.
    #[must_use]
    pub fn level(&self) -> HeadingLevel {
        self.heading
            .as_ref()
            .map_or(HeadingLevel::BODY, Heading::level)
    }

    /// Non-heading lines attached directly to this section.
    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Directly nested sections, in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first direct child with the given heading text.
    #[must_use]
    pub fn child(&self, title: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|child| child.title() == Some(title))
    }

    /// Follows a path of heading texts down from this section.
    ///
    /// An empty path resolves to `self`.
    #[must_use]
    pub fn find<I, S>(&self, path: I) -> Option<&Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        path.into_iter()
            .try_fold(self, |section, title| section.child(title.as_ref()))
    }

    /// Iterates over every descendant section in document order, paired with
    /// its depth below `self` (direct children are at depth 1).
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.children.iter().rev().map(|child| (1, child)).collect(),
        }
    }

    /// The number of headings below this section.
    #[must_use]
    pub fn heading_count(&self) -> usize {
        self.walk().count()
    }

    /// Returns a copy of this section without descendants deeper than
    /// `max_depth`. A depth of zero keeps everything.
    #[must_use]
    pub fn truncated(&self, max_depth: usize) -> Self {
        if max_depth == 0 {
            return self.clone();
        }
        self.truncate_below(max_depth)
    }

    fn truncate_below(&self, remaining: usize) -> Self {
        let children = if remaining == 0 {
            Vec::new()
        } else {
            self.children
                .iter()
                .map(|child| child.truncate_below(remaining - 1))
                .collect()
        };

        Self {
            heading: self.heading.clone(),
            body: self.body.clone(),
            children,
        }
    }

    pub(crate) fn push_body(&mut self, line: String) {
        self.body.push(line);
    }

    pub(crate) fn push_child(&mut self, child: Self) {
        debug_assert!(child.level() > self.level());
        self.children.push(child);
    }
}

/// Depth-first, pre-order iterator over the descendants of a [`Section`].
///
/// Created by [`Section::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Section)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Section);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, section) = self.stack.pop()?;
        self.stack
            .extend(section.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, section))
    }
}
