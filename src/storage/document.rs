use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::instrument;

use crate::domain::{Outline, build_hierarchy};

/// A markdown document held as an ordered sequence of trimmed lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Reads a document, trimming leading and trailing whitespace (including
    /// the line terminator) from every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or yields invalid UTF-8.
    pub fn read<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let lines = reader
            .lines()
            .map(|line| line.map(|content| content.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { lines })
    }

    /// Loads a document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the file does not exist, or
    /// [`LoadError::Io`] if it cannot be read.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let document = Self::read(BufReader::new(file))?;
        tracing::debug!(lines = document.lines.len(), "loaded document");
        Ok(document)
    }

    /// The trimmed lines of the document.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Builds the heading hierarchy of this document.
    #[must_use]
    pub fn outline(&self) -> Outline {
        build_hierarchy(&self.lines)
    }
}

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document file was not found.
    #[error("document not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read document")]
    Io(#[from] io::Error),
}
