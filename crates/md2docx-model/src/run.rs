//! Styled text runs
//!
//! A run is a contiguous span of text sharing one style. Runs are the
//! smallest unit the packager renders; block elements carry ordered
//! sequences of them.

use serde::{Deserialize, Serialize};

/// A contiguous span of styled text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The literal text of the span
    pub text: String,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Strikethrough
    pub strike: bool,
    /// Single underline
    pub underline: bool,
    /// Font family override (e.g. "Courier New", "Segoe UI Emoji")
    pub font: Option<String>,
    /// Text color as an RRGGBB hex string
    pub color: Option<String>,
    /// Solid background fill as an RRGGBB hex string
    pub shading: Option<String>,
    /// Font size in half-points
    pub size: Option<u32>,
}

impl TextRun {
    /// Create a plain run with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set strikethrough
    pub fn with_strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Set a single underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set a font family override
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the text color (RRGGBB hex)
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set a solid background fill (RRGGBB hex)
    pub fn with_shading(mut self, shading: impl Into<String>) -> Self {
        self.shading = Some(shading.into());
        self
    }

    /// Set the font size in half-points
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let run = TextRun::new("Hello");
        assert_eq!(run.text, "Hello");
        assert!(!run.bold);
        assert!(run.font.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let run = TextRun::new("link")
            .with_underline()
            .with_color("0563C1");
        assert!(run.underline);
        assert_eq!(run.color.as_deref(), Some("0563C1"));
        assert!(!run.italic);
    }

    #[test]
    fn test_code_run_shading() {
        let run = TextRun::new("x + 1")
            .with_font("Courier New")
            .with_shading("E8E8E8");
        assert_eq!(run.font.as_deref(), Some("Courier New"));
        assert_eq!(run.shading.as_deref(), Some("E8E8E8"));
    }
}
