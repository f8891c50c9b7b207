//! Document data types written out as the conversion artifact.

use serde::{Deserialize, Serialize};

/// Kind of a body block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Narration or any line that is not a complete quoted utterance
    Paragraph,
    /// A line wrapped in a matched pair of quotation brackets
    Conversation,
}

/// One unit of body text inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position within the owning chapter
    pub id: usize,
    /// Paragraph or conversation
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// The trimmed source line
    pub text: String,
}

impl Block {
    /// Create a new block.
    pub fn new(id: usize, block_type: BlockType, text: String) -> Self {
        Self {
            id,
            block_type,
            text,
        }
    }

    pub fn is_conversation(&self) -> bool {
        self.block_type == BlockType::Conversation
    }
}

/// A titled section of the work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position within the document
    pub id: usize,
    /// The marker token that opened the chapter
    pub title: String,
    /// Body blocks in source order
    pub blocks: Vec<Block>,
}

impl Chapter {
    /// Create an empty chapter.
    pub fn new(id: usize, title: String) -> Self {
        Self {
            id,
            title,
            blocks: Vec::new(),
        }
    }

    /// Number of conversation blocks in this chapter.
    pub fn conversation_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_conversation()).count()
    }
}

/// Title, author and a fixed numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: u32,
    pub title: String,
    pub author: String,
}

/// Wrapper around the chapter sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub chapters: Vec<Chapter>,
}

/// Top-level converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub content: Content,
}

impl Document {
    /// Chapters in reading order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.content.chapters
    }

    /// Total number of blocks across all chapters.
    pub fn total_blocks(&self) -> usize {
        self.chapters().iter().map(|c| c.blocks.len()).sum()
    }
}
