//! # md2docx-engine
//!
//! Converts a parsed Markdown tree (`markdown::mdast`) into the styled
//! document model consumed by the OOXML packager.
//!
//! The engine is a single-pass, sequential transform: the assembler
//! walks the root's children in order and dispatches each node kind to
//! its builder. Content-shape problems never raise; malformed input
//! degrades to minimal structure and image failures degrade to
//! placeholder text. The only I/O is image fetching, behind the
//! [`ImageSource`] trait.
//!
//! ## Example
//!
//! ```no_run
//! use md2docx_engine::{Converter, HttpImageSource};
//!
//! let tree = markdown::to_mdast("# Hello **world**", &markdown::ParseOptions::gfm())
//!     .expect("markdown parses");
//! let images = HttpImageSource::new();
//! let document = Converter::new(&images).convert(&tree);
//! assert!(!document.is_empty());
//! ```

pub mod code;
pub mod convert;
pub mod emoji;
pub mod image;
pub mod inline;
pub mod list;
pub mod quote;
pub mod split;
pub mod table;
pub mod width;

pub use code::build_code_block;
pub use convert::{ConvertOptions, Converter};
pub use emoji::{contains_emoji, EMOJI_FONT};
pub use image::{process_image, HttpImageSource, ImageError, ImageSource};
pub use inline::{convert_inlines, extract_text};
pub use list::build_list;
pub use quote::build_blockquote;
pub use split::{checkmark_count, split_paragraph};
pub use table::build_table;
pub use width::estimate_width;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
