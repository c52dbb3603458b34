//! Document root and page settings

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Page margins in twips (1/20 pt; 1440 twips = 1 inch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            margin_top: 1440,
            margin_right: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
        }
    }
}

impl PageSettings {
    /// Uniform margins on all four sides
    pub fn uniform(margin: u32) -> Self {
        Self {
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }
}

/// A complete converted document: ordered blocks plus page layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Content blocks in source order
    pub blocks: Vec<Block>,
    /// Page layout settings
    pub page: PageSettings,
}

impl Document {
    /// Create a new empty document with default page settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Paragraph, Spacing};
    use crate::run::TextRun;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.page.margin_top, 1440);
    }

    #[test]
    fn test_document_push_block() {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(Paragraph {
            runs: vec![TextRun::new("Hello")],
            spacing: Spacing::after(120),
        }));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_uniform_margins() {
        let page = PageSettings::uniform(720);
        assert_eq!(page.margin_left, 720);
        assert_eq!(page.margin_bottom, 720);
    }
}
