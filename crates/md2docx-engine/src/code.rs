//! Code block conversion
//!
//! Fenced and indented code blocks keep their literal text verbatim.
//! No syntax highlighting and no line splitting; the packager renders
//! the whole block as one monospace paragraph.

use markdown::mdast::Code;
use md2docx_model::CodeBlock;

/// Build a code block from a `code` source node
pub fn build_code_block(code: &Code) -> CodeBlock {
    CodeBlock {
        text: code.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> Code {
        Code {
            value: value.to_string(),
            lang: None,
            meta: None,
            position: None,
        }
    }

    #[test]
    fn test_text_kept_verbatim() {
        let block = build_code_block(&code("fn main() {\n    println!(\"hi\");\n}"));
        assert_eq!(block.text, "fn main() {\n    println!(\"hi\");\n}");
    }

    #[test]
    fn test_empty_code_block() {
        assert_eq!(build_code_block(&code("")).text, "");
    }
}
