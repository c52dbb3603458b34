//! Emoji detection and font fallback
//!
//! Word substitutes missing glyphs inconsistently, so any run whose
//! text contains an emoji code point is forced onto an emoji-capable
//! font. The check is applied per run, independent of the run's other
//! styling.

use md2docx_model::TextRun;

/// Font used for runs containing emoji code points
pub const EMOJI_FONT: &str = "Segoe UI Emoji";

/// Inclusive code-point ranges treated as emoji
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x231A, 0x231B),
    (0x2328, 0x2328),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F1E0, 0x1F1FF),
    (0x1F300, 0x1F9FF),
    (0x1FA00, 0x1FAFF),
];

/// Check whether a single character is an emoji code point
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Check whether a string contains at least one emoji code point
pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Force the emoji font on a run whose text contains emoji.
///
/// Overrides any font already set on the run; runs without emoji are
/// returned unchanged.
pub fn apply_emoji_font(run: TextRun) -> TextRun {
    if contains_emoji(&run.text) {
        run.with_font(EMOJI_FONT)
    } else {
        run
    }
}
