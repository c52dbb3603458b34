//! Blockquote conversion
//!
//! Each paragraph inside a blockquote becomes its own quote block:
//! italic, muted color, wrapped in literal quotation marks unless the
//! text already carries them. Bold survives from the original runs;
//! other inline styling does not.

use markdown::mdast::{Blockquote, Node};
use md2docx_model::{Quote, TextRun};

use crate::inline;

/// Muted text color for quote runs
pub const MUTED_COLOR: &str = "808080";

/// Left indent for quote paragraphs, in twips
pub const QUOTE_INDENT: u32 = 360;

/// Build one quote block per paragraph child of a blockquote
pub fn build_blockquote(node: &Blockquote) -> Vec<Quote> {
    let mut quotes = Vec::new();

    for child in &node.children {
        if let Node::Paragraph(paragraph) = child {
            let original = inline::convert_inlines(&paragraph.children);
            let full_text = inline::extract_text(&paragraph.children);
            let trimmed = full_text.trim();
            let already_quoted = trimmed.starts_with('"') && trimmed.ends_with('"');

            let mut runs = Vec::new();
            if !already_quoted {
                runs.push(quote_mark());
            }
            for run in &original {
                if run.text.is_empty() {
                    continue;
                }
                let mut styled = TextRun::new(&run.text)
                    .with_italic()
                    .with_color(MUTED_COLOR);
                styled.bold = run.bold;
                runs.push(styled);
            }
            if !already_quoted {
                runs.push(quote_mark());
            }

            // No usable runs at all: fall back to the flattened text
            if runs.is_empty() {
                let display = if already_quoted {
                    trimmed.to_string()
                } else {
                    format!("\"{}\"", trimmed)
                };
                runs.push(
                    TextRun::new(display)
                        .with_italic()
                        .with_color(MUTED_COLOR),
                );
            }

            quotes.push(Quote {
                runs,
                indent: QUOTE_INDENT,
            });
        }
    }

    quotes
}

fn quote_mark() -> TextRun {
    TextRun::new("\"").with_italic().with_color(MUTED_COLOR)
}
