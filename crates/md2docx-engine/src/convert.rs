//! Document assembly
//!
//! Walks the root node's children in order and dispatches each block
//! kind to its builder. Unrecognized kinds are skipped. The result is
//! the ordered block sequence plus page settings, ready for the
//! packager. Nothing persists between documents; a `Converter` holds
//! only its options and the image source.

use markdown::mdast::{Node, Paragraph as MdParagraph};
use md2docx_model::{
    Block, Document, Heading, ImagePlaceholder, PageSettings, Paragraph, Spacing, TextRun,
};

use crate::image::{self, ImageSource};
use crate::{code, inline, list, quote, split, table};

/// Spacing applied after body paragraphs, in twips
const PARAGRAPH_SPACING: u32 = 120;

/// Extra spacing before a level-1 heading, in twips
const TOP_HEADING_SPACING: u32 = 240;

/// Placeholder label when a failed image has no alt text
const DEFAULT_IMAGE_LABEL: &str = "image";

/// Layout knobs for a conversion run.
///
/// Defaults are the fixed values the output format was designed
/// around; the CLI can override them from its config file.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Page content width budget for tables, in twips
    pub content_width: u32,
    /// Minimum table column width, in twips
    pub min_column_width: u32,
    /// Fixed render width for embedded images, in twips
    pub image_width: u32,
    /// Uniform page margin, in twips
    pub page_margin: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            content_width: table::CONTENT_WIDTH,
            min_column_width: table::MIN_COLUMN_WIDTH,
            image_width: image::RENDER_WIDTH,
            page_margin: 1440,
        }
    }
}

/// Tree-to-document-model converter.
///
/// One conversion pass over one source tree; no state is shared
/// between runs.
pub struct Converter<'a> {
    options: ConvertOptions,
    images: &'a dyn ImageSource,
}

impl<'a> Converter<'a> {
    /// Create a converter with default options
    pub fn new(images: &'a dyn ImageSource) -> Self {
        Self::with_options(images, ConvertOptions::default())
    }

    /// Create a converter with explicit options
    pub fn with_options(images: &'a dyn ImageSource, options: ConvertOptions) -> Self {
        Self { options, images }
    }

    /// Convert a parsed source tree into the output document model.
    ///
    /// The root is expected to be a `root` node; its children are
    /// dispatched in order. Image fetches run sequentially in document
    /// order, and a failed fetch degrades to placeholder text rather
    /// than aborting the conversion.
    pub fn convert(&self, root: &Node) -> Document {
        let mut doc = Document {
            blocks: Vec::new(),
            page: PageSettings::uniform(self.options.page_margin),
        };

        if let Some(children) = root.children() {
            for node in children {
                self.convert_block(node, &mut doc);
            }
        }

        doc
    }

    fn convert_block(&self, node: &Node, doc: &mut Document) {
        match node {
            Node::Heading(heading) => {
                let level = heading.depth.clamp(1, 6);
                let mut runs = inline::convert_inlines(&heading.children);
                if runs.is_empty() {
                    runs.push(TextRun::new(""));
                }
                let before = if level == 1 {
                    TOP_HEADING_SPACING
                } else {
                    PARAGRAPH_SPACING
                };
                doc.push(Block::Heading(Heading {
                    level,
                    runs,
                    spacing: Spacing::new(before, PARAGRAPH_SPACING),
                }));
            }
            Node::Paragraph(paragraph) => {
                self.convert_paragraph(paragraph, doc);
            }
            Node::Table(table) => {
                doc.push(Block::Table(table::build_table(
                    table,
                    self.options.content_width,
                    self.options.min_column_width,
                )));
                // Breathing room between the table and what follows
                doc.push(Block::Paragraph(Paragraph {
                    runs: vec![TextRun::new("")],
                    spacing: Spacing::after(PARAGRAPH_SPACING),
                }));
            }
            Node::List(md_list) => {
                for item in list::build_list(md_list) {
                    doc.push(Block::ListItem(item));
                }
            }
            Node::Blockquote(blockquote) => {
                for q in quote::build_blockquote(blockquote) {
                    doc.push(Block::Quote(q));
                }
            }
            Node::Code(md_code) => {
                doc.push(Block::CodeBlock(code::build_code_block(md_code)));
            }
            Node::ThematicBreak(_) => {
                doc.push(Block::Rule);
            }
            // Everything else (definitions, html, footnotes, ...) is
            // silently skipped
            _ => {}
        }
    }

    fn convert_paragraph(&self, paragraph: &MdParagraph, doc: &mut Document) {
        // A paragraph that is exactly one image becomes a centered
        // image block, or placeholder text when processing fails
        if let [Node::Image(md_image)] = paragraph.children.as_slice() {
            match image::process_image(self.images, md_image, self.options.image_width) {
                Some(block) => doc.push(Block::Image(block)),
                None => {
                    let alt = if md_image.alt.is_empty() {
                        DEFAULT_IMAGE_LABEL.to_string()
                    } else {
                        md_image.alt.clone()
                    };
                    doc.push(Block::ImagePlaceholder(ImagePlaceholder { alt }));
                }
            }
            return;
        }

        let flattened = inline::extract_text(&paragraph.children);
        for group in split::split_paragraph(&paragraph.children, &flattened) {
            let mut runs = inline::convert_refs(group);
            if runs.is_empty() {
                runs.push(TextRun::new(""));
            }
            doc.push(Block::Paragraph(Paragraph {
                runs,
                spacing: Spacing::after(PARAGRAPH_SPACING),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageError;

    /// Image source that always fails; block-level tests shouldn't
    /// touch the network
    pub(crate) struct NoImages;

    impl ImageSource for NoImages {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
            Err(ImageError::Status(404))
        }
    }

    fn parse(source: &str) -> Node {
        markdown::to_mdast(source, &markdown::ParseOptions::gfm()).expect("gfm parses")
    }

    fn convert(source: &str) -> Document {
        Converter::new(&NoImages).convert(&parse(source))
    }

    #[test]
    fn test_paragraph_with_bold_run() {
        let doc = convert("Hello **world**");
        assert_eq!(doc.len(), 1);
        let Block::Paragraph(para) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para.runs.len(), 2);
        assert_eq!(para.runs[0].text, "Hello ");
        assert!(!para.runs[0].bold);
        assert_eq!(para.runs[1].text, "world");
        assert!(para.runs[1].bold);
    }

    #[test]
    fn test_heading_depth_and_spacing() {
        let doc = convert("# Title\n\n### Sub");
        let Block::Heading(h1) = &doc.blocks[0] else {
            panic!("expected heading");
        };
        assert_eq!(h1.level, 1);
        assert_eq!(h1.spacing.before, TOP_HEADING_SPACING);
        let Block::Heading(h3) = &doc.blocks[1] else {
            panic!("expected heading");
        };
        assert_eq!(h3.level, 3);
        assert_eq!(h3.spacing.before, PARAGRAPH_SPACING);
    }

    #[test]
    fn test_heading_depth_is_clamped() {
        // depth 7 never comes out of the parser, but the dispatcher
        // clamps rather than trusting the input
        let heading = Node::Heading(markdown::mdast::Heading {
            children: vec![],
            depth: 7,
            position: None,
        });
        let mut doc = Document::default();
        Converter::new(&NoImages).convert_block(&heading, &mut doc);
        let Block::Heading(h) = doc.blocks.last().unwrap() else {
            panic!("expected heading");
        };
        assert_eq!(h.level, 6);
    }

    #[test]
    fn test_table_followed_by_spacer() {
        let doc = convert("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(matches!(doc.blocks[0], Block::Table(_)));
        assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
    }

    #[test]
    fn test_list_items_emitted_in_order() {
        let doc = convert("- one\n- two\n- three");
        assert_eq!(doc.len(), 3);
        for (block, expected) in doc.blocks.iter().zip(["one", "two", "three"]) {
            let Block::ListItem(item) = block else {
                panic!("expected list item");
            };
            assert!(!item.ordered);
            assert_eq!(item.runs[0].text, expected);
        }
    }

    #[test]
    fn test_ordered_list_flag() {
        let doc = convert("1. one\n2. two");
        let Block::ListItem(item) = &doc.blocks[0] else {
            panic!("expected list item");
        };
        assert!(item.ordered);
    }

    #[test]
    fn test_thematic_break_becomes_rule() {
        let doc = convert("above\n\n---\n\nbelow");
        assert!(matches!(doc.blocks[1], Block::Rule));
    }

    #[test]
    fn test_code_block_verbatim() {
        let doc = convert("```\nlet x = 1;\nlet y = 2;\n```");
        let Block::CodeBlock(code) = &doc.blocks[0] else {
            panic!("expected code block");
        };
        assert_eq!(code.text, "let x = 1;\nlet y = 2;");
    }

    #[test]
    fn test_lone_image_paragraph_falls_back_to_placeholder() {
        let doc = convert("![build status](https://example.com/badge.png)");
        let Block::ImagePlaceholder(placeholder) = &doc.blocks[0] else {
            panic!("expected placeholder");
        };
        assert_eq!(placeholder.alt, "build status");
    }

    #[test]
    fn test_missing_alt_uses_default_label() {
        let doc = convert("![](https://example.com/badge.png)");
        let Block::ImagePlaceholder(placeholder) = &doc.blocks[0] else {
            panic!("expected placeholder");
        };
        assert_eq!(placeholder.alt, DEFAULT_IMAGE_LABEL);
    }

    #[test]
    fn test_merged_checklist_paragraph_splits() {
        // Two checklist lines merged into one paragraph by the parser
        // artifact being repaired
        let doc = convert("✅ first task\\\n✅ second task");
        // hard break keeps these in one source paragraph; the splitter
        // re-divides them
        assert!(doc.len() >= 2);
        assert!(doc
            .blocks
            .iter()
            .all(|b| matches!(b, Block::Paragraph(_))));
    }

    #[test]
    fn test_unknown_kinds_skipped() {
        let doc = convert("text\n\n<div>html</div>\n\nmore");
        // the html block is dropped, both paragraphs survive
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_page_margins_fixed() {
        let doc = convert("anything");
        assert_eq!(doc.page.margin_top, 1440);
        assert_eq!(doc.page.margin_left, 1440);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let root = parse("# T\n\npara **b**\n\n- item\n");
        let converter = Converter::new(&NoImages);
        assert_eq!(converter.convert(&root), converter.convert(&root));
    }
}
