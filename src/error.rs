//! Error types for gdoc-pages operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while unpacking an exported document.
///
/// A missing HTML entry is not an error; see [`crate::DocArchive::extract_html`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSS parse error at {line}:{column}: {message}")]
    Css {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("No CSS rule for selector: {0}")]
    StyleLookup(String),

    #[error("Output directory already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Document has no <body> element")]
    MissingBody,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
