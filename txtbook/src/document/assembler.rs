//! Wraps segmented chapters and metadata into a [`Document`].

use super::types::{Chapter, Content, Document, Metadata};

/// Identifier attached to every converted document.
pub const DOCUMENT_ID: u32 = 1;

/// Build the final document. Text is passed through untouched.
pub fn assemble_document(title: String, author: String, chapters: Vec<Chapter>) -> Document {
    Document {
        metadata: Metadata {
            id: DOCUMENT_ID,
            title,
            author,
        },
        content: Content { chapters },
    }
}
