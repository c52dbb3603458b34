//! Inline node conversion
//!
//! Maps inline mdast nodes onto styled text runs. Formatting containers
//! (strong, emphasis, delete) flatten their subtree to plain text and
//! emit a single styled run; structure inside them is not preserved.
//! Link and inline-code runs get their fixed hyperlink / monospace
//! styling here, and every emitted run passes through the emoji font
//! check.

use markdown::mdast::Node;
use md2docx_model::TextRun;

use crate::emoji;

/// Monospace font for inline code and code blocks
pub const MONOSPACE_FONT: &str = "Courier New";

/// Background fill behind inline code
pub const INLINE_CODE_SHADING: &str = "E8E8E8";

/// Hyperlink text color
pub const LINK_COLOR: &str = "0563C1";

/// Flatten the plain text of a node sequence.
///
/// Only literal `text` nodes contribute; containers are recursed into.
pub fn extract_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_text(node, &mut out);
    }
    out
}

/// Flatten the plain text of a single node
pub fn node_text(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Node, out: &mut String) {
    if let Node::Text(text) = node {
        out.push_str(&text.value);
    } else if let Some(children) = node.children() {
        for child in children {
            collect_text(child, out);
        }
    }
}

/// Convert an ordered sequence of inline nodes into styled runs
pub fn convert_inlines(nodes: &[Node]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    for node in nodes {
        convert_into(node, &mut runs);
    }
    runs
}

/// Convert a borrowed selection of inline nodes into styled runs
pub fn convert_refs<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<TextRun> {
    let mut runs = Vec::new();
    for node in nodes {
        convert_into(node, &mut runs);
    }
    runs
}

fn convert_into(node: &Node, runs: &mut Vec<TextRun>) {
    match node {
        Node::Text(text) => {
            push_run(runs, TextRun::new(&text.value));
        }
        Node::Strong(strong) => {
            push_run(runs, TextRun::new(extract_text(&strong.children)).with_bold());
        }
        Node::Emphasis(emphasis) => {
            push_run(
                runs,
                TextRun::new(extract_text(&emphasis.children)).with_italic(),
            );
        }
        Node::Delete(delete) => {
            push_run(
                runs,
                TextRun::new(extract_text(&delete.children)).with_strike(),
            );
        }
        Node::InlineCode(code) => {
            push_run(
                runs,
                TextRun::new(&code.value)
                    .with_font(MONOSPACE_FONT)
                    .with_shading(INLINE_CODE_SHADING),
            );
        }
        Node::Link(link) => {
            let text = extract_text(&link.children);
            let text = if text.is_empty() {
                link.url.clone()
            } else {
                text
            };
            push_run(
                runs,
                TextRun::new(text).with_color(LINK_COLOR).with_underline(),
            );
        }
        other => {
            // Structural fallback: flatten unknown containers
            if let Some(children) = other.children() {
                for child in children {
                    convert_into(child, runs);
                }
            }
        }
    }
}

fn push_run(runs: &mut Vec<TextRun>, run: TextRun) {
    runs.push(emoji::apply_emoji_font(run));
}
