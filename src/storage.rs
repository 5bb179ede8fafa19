/// Reading markdown documents into lines.
pub mod document;

pub use document::{Document, LoadError};
