//! Error types for the text2pdf crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for text2pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while paginating, rendering, or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist or is not a regular file or directory.
    #[error("input not found: {}", path.display())]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// A directory was required but the path points elsewhere.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The input file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The input text cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The pagination settings are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A single page does not fit into an output file on its own.
    #[error("page {page} renders to {size} bytes, exceeding the {limit}-byte file limit")]
    PageExceedsLimit {
        /// One-based page number.
        page: usize,
        /// Rendered size of a file holding only this page.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The PDF backend failed to produce bytes.
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_message_names_sizes() {
        let err = Error::PageExceedsLimit {
            page: 3,
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "page 3 renders to 2048 bytes, exceeding the 1024-byte file limit"
        );
    }

    #[test]
    fn write_error_exposes_io_source() {
        let err = Error::Write {
            path: PathBuf::from("out/report.1.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        let source = std::error::Error::source(&err).expect("write error carries a source");
        assert_eq!(source.to_string(), "read-only");
        assert!(err.to_string().starts_with("failed to write out/report.1.pdf"));
    }
}
