//! End-to-end conversion tests over parsed GFM input
//!
//! These go through the real Markdown parser rather than hand-built
//! trees, with a stub image source standing in for the network.

use markdown::ParseOptions;
use md2docx_engine::{Converter, ImageError, ImageSource};
use md2docx_model::{Alignment, Block};

/// Serves a fixed PNG header for every URL
struct FixedPng {
    width: u32,
    height: u32,
}

impl ImageSource for FixedPng {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&self.width.to_be_bytes());
        data.extend_from_slice(&self.height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        Ok(data)
    }
}

struct NoImages;

impl ImageSource for NoImages {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
        Err(ImageError::Status(503))
    }
}

fn parse(source: &str) -> markdown::mdast::Node {
    markdown::to_mdast(source, &ParseOptions::gfm()).expect("gfm parses")
}

#[test]
fn test_mixed_document_block_order() {
    let source = "\
# Report

Intro paragraph with **bold** text.

| Col A | Col B |
| ----- | ----- |
| 1     | 2     |

- alpha
- beta

> A quote.

```
code here
```

---
";
    let doc = Converter::new(&NoImages).convert(&parse(source));

    let kinds: Vec<&'static str> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::Table(_) => "table",
            Block::ListItem(_) => "item",
            Block::Quote(_) => "quote",
            Block::CodeBlock(_) => "code",
            Block::Image(_) => "image",
            Block::ImagePlaceholder(_) => "placeholder",
            Block::Rule => "rule",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "table",
            "paragraph", // spacer after the table
            "item",
            "item",
            "quote",
            "code",
            "rule",
        ]
    );
}

#[test]
fn test_image_paragraph_embeds_with_scaled_dimensions() {
    let source = FixedPng {
        width: 800,
        height: 400,
    };
    let doc = Converter::new(&source).convert(&parse("![chart](https://example.com/c.png)"));

    let Block::Image(image) = &doc.blocks[0] else {
        panic!("expected an image block, got {:?}", doc.blocks[0]);
    };
    assert_eq!(image.px_width, 800);
    assert_eq!(image.px_height, 400);
    assert_eq!(image.width, 600);
    assert_eq!(image.height, 300);
    assert_eq!(image.alignment, Alignment::Center);
}

#[test]
fn test_failed_image_does_not_abort_document() {
    let source = "before\n\n![chart](https://example.com/c.png)\n\nafter\n";
    let doc = Converter::new(&NoImages).convert(&parse(source));

    assert_eq!(doc.len(), 3);
    assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
    let Block::ImagePlaceholder(placeholder) = &doc.blocks[1] else {
        panic!("expected placeholder");
    };
    assert_eq!(placeholder.alt, "chart");
    assert!(matches!(doc.blocks[2], Block::Paragraph(_)));
}

#[test]
fn test_inline_image_in_text_paragraph_is_not_fetched() {
    // Mixed paragraphs never hit the image source; the inline image
    // contributes no run at all
    let doc = Converter::new(&NoImages)
        .convert(&parse("see ![icon](https://example.com/i.png) here"));
    assert_eq!(doc.len(), 1);
    let Block::Paragraph(para) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    let text: String = para.runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(text, "see  here");
}

#[test]
fn test_gfm_strikethrough_and_task_text() {
    let doc = Converter::new(&NoImages).convert(&parse("~~removed~~ stays visible"));
    let Block::Paragraph(para) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert!(para.runs[0].strike);
    assert_eq!(para.runs[0].text, "removed");
}

#[test]
fn test_table_widths_respect_budget() {
    let source = "\
| 名前 | Description of the field | x |
| ---- | ------------------------ | - |
| 値   | long text content here   | 1 |
";
    let doc = Converter::new(&NoImages).convert(&parse(source));
    let Block::Table(table) = &doc.blocks[0] else {
        panic!("expected table");
    };
    assert_eq!(table.column_widths.len(), 3);
    assert!(table.total_width() <= 9360);
    // the verbose middle column dominates
    assert!(table.column_widths[1] > table.column_widths[0]);
    assert!(table.column_widths[1] > table.column_widths[2]);
}

#[test]
fn test_repeated_conversion_is_structurally_identical() {
    let tree = parse("# A\n\ntext **b** `c`\n\n- x\n- y\n");
    let converter = Converter::new(&NoImages);
    assert_eq!(converter.convert(&tree), converter.convert(&tree));
}
