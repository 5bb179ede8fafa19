//! Markdown Heading Outlines
//!
//! A document is split into sections by its `#` headings, and each section
//! owns the body lines and sub-sections that follow it.

pub mod domain;
pub use domain::{
    Config, DEFAULT_CONFIG_FILE, Heading, HeadingLevel, Outline, Record, Section, build_hierarchy, classify_level,
};

/// Loading documents from the filesystem.
pub mod storage;
pub use storage::{Document, LoadError};
