//! Domain models for heading outlines.
//!
//! This module contains the core domain types including heading levels,
//! sections, the hierarchy builder and configuration.

/// Heading level classification.
pub mod level;
pub use level::{HeadingLevel, classify_level};

/// Section tree nodes.
pub mod section;
pub use section::{Heading, Section};

mod hierarchy;
pub use hierarchy::{Outline, Record, build_hierarchy};

mod config;
pub use config::{Config, DEFAULT_CONFIG_FILE};
