//! # md2docx-ooxml
//!
//! OOXML (Office Open XML) packaging for md2docx.
//!
//! This crate serializes the styled document model into a `.docx`
//! file: it generates `word/document.xml` block by block, bundles a
//! minimal stylesheet, wires up package relationships and content
//! types, and embeds media parts, all assembled into a deterministic
//! ZIP archive.
//!
//! ## Example
//!
//! ```no_run
//! use md2docx_model::Document;
//! use md2docx_ooxml::DocxWriter;
//!
//! let doc = Document::new();
//! let bytes = DocxWriter::generate(&doc)?;
//! std::fs::write("output.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod error;
pub mod relationships;
pub mod writer;

pub use archive::DocxArchive;
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
