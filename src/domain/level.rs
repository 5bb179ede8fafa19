use std::fmt;

use serde::Serialize;

/// The structural depth of a line: the number of consecutive `#` characters
/// it starts with.
///
/// A level of zero means the line is not a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(usize);

impl HeadingLevel {
    /// The level of a non-heading line (and of the document root).
    pub const BODY: Self = Self(0);

    /// Creates a level from a raw `#` count.
    #[must_use]
    pub const fn new(level: usize) -> Self {
        Self(level)
    }

    /// Returns the raw `#` count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether this level marks a heading line.
    #[must_use]
    pub const fn is_heading(self) -> bool {
        self.0 > 0
    }
}

impl From<HeadingLevel> for usize {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classifies a line by counting its leading `#` characters.
///
/// Counting stops at the first character that is not `#`. Nothing after the
/// run is inspected, so `#title` and `# title` are both level 1.
#[must_use]
pub fn classify_level(line: &str) -> HeadingLevel {
    HeadingLevel(line.bytes().take_while(|&b| b == b'#').count())
}
