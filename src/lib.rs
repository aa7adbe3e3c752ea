//! Core entry point for the text2pdf crate.
//!
//! Plain text is laid out into fixed-size pages of monospace rows, and the pages are grouped
//! into PDF files that each stay below a configured size limit.

pub mod builder;
pub mod cleanup;
pub mod convert;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod paginator;
pub mod render;

pub use builder::{Margins, PageGeometry, PaginatorBuilder, PaperSize, DEFAULT_MAX_SIZE_KB};
pub use cleanup::CleanupOptions;
pub use convert::{BatchSummary, Converter, Outcome, RunReport, WrittenFile};
pub use error::{Error, Result};
pub use model::{reassemble, Document, OutputFile, Page, Row};
pub use paginator::Paginator;
pub use render::{PdfRenderer, Renderer};
