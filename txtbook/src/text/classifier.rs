//! Dialogue/narration classification of body lines.

use crate::document::BlockType;

/// Opening quotation bracket of a spoken line.
pub const QUOTE_OPEN: char = '「';
/// Closing quotation bracket of a spoken line.
pub const QUOTE_CLOSE: char = '」';

/// Classify a trimmed line.
///
/// A line is a conversation only when it both opens and closes with the
/// quotation brackets. Interior quotes are not inspected, and dialogue that
/// spans several physical lines is classified line by line, so each part
/// ends up as a paragraph.
pub fn classify(text: &str) -> BlockType {
    if text.starts_with(QUOTE_OPEN) && text.ends_with(QUOTE_CLOSE) {
        BlockType::Conversation
    } else {
        BlockType::Paragraph
    }
}
