//! Summary counts reported after a conversion.

use crate::document::Document;
use std::fmt;

/// Chapter and block counts for a converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub chapters: usize,
    pub total_blocks: usize,
    pub conversation_blocks: usize,
    pub paragraph_blocks: usize,
}

impl ConversionStats {
    pub fn from_document(doc: &Document) -> Self {
        let total_blocks = doc.total_blocks();
        let conversation_blocks = doc
            .chapters()
            .iter()
            .map(|c| c.conversation_count())
            .sum();

        Self {
            chapters: doc.chapters().len(),
            total_blocks,
            conversation_blocks,
            paragraph_blocks: total_blocks - conversation_blocks,
        }
    }

    /// Share of conversation blocks as a percentage, 0.0 when there are no blocks.
    pub fn conversation_ratio(&self) -> f64 {
        if self.total_blocks > 0 {
            self.conversation_blocks as f64 / self.total_blocks as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} chapters", self.chapters)?;
        writeln!(f, "Total blocks: {}", self.total_blocks)?;
        writeln!(f, "Conversation blocks: {}", self.conversation_blocks)?;
        writeln!(f, "Paragraph blocks: {}", self.paragraph_blocks)?;
        write!(f, "Conversation ratio: {:.1}%", self.conversation_ratio())
    }
}
