//! md2docx-model - Styled document model
//!
//! This crate defines the output side of the md2docx pipeline: the
//! block elements, styled text runs, and page settings produced by the
//! conversion engine and consumed by the OOXML packager. It carries no
//! behavior beyond constructors; layout decisions live in the engine
//! and rendering decisions in the packager.

pub mod block;
pub mod document;
pub mod run;

pub use block::{
    Alignment, Block, CodeBlock, Heading, ImageBlock, ImagePlaceholder, ListItem, Paragraph,
    Quote, Spacing, Table, TableCell, TableRow,
};
pub use document::{Document, PageSettings};
pub use run::TextRun;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serialization_roundtrip() {
        let block = Block::Paragraph(Paragraph {
            runs: vec![TextRun::new("Hello ").with_bold()],
            spacing: Spacing::after(120),
        });
        let json = serde_json::to_string(&block).unwrap();
        let restored: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, restored);
    }
}
