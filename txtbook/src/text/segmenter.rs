//! Chapter and block segmentation of a plain-text work.

use super::classifier::classify;
use super::markers::{chapter_marker, is_toc_marker};
use crate::document::{Block, BlockType, Chapter, Document, assemble_document};
use crate::error::{ConvertError, Result};

/// Number of characters of a conversation line shown in debug output.
const LOG_PREVIEW_CHARS: usize = 50;

/// Parse the full text of a work into a [`Document`].
///
/// The first line is the title and the second the author; both are taken
/// as-is (trimmed) even if they look like markers or are blank. The rest
/// is handed to [`segment_chapters`].
pub fn parse_text(content: &str) -> Result<Document> {
    let lines: Vec<&str> = content.split('\n').collect();

    let [title, author, body @ ..] = lines.as_slice() else {
        return Err(ConvertError::MissingMetadata { lines: lines.len() });
    };

    let chapters = segment_chapters(body.iter().copied());

    Ok(assemble_document(
        trim_line(title).to_string(),
        trim_line(author).to_string(),
        chapters,
    ))
}

/// Split body lines into chapters of typed blocks.
///
/// A chapter opens on each marker line and closes at the next marker or
/// at the end of input. Lines before the first marker are dropped, as are
/// blank lines and the table-of-contents marker. Every other line becomes
/// exactly one block.
pub fn segment_chapters<'a, I>(lines: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut current: Option<Chapter> = None;

    for raw in lines {
        let line = trim_line(raw);

        if let Some(marker) = chapter_marker(line) {
            if let Some(done) = current.take() {
                chapters.push(done);
            }
            current = Some(Chapter::new(chapters.len() + 1, marker.to_string()));
            continue;
        }

        let Some(chapter) = current.as_mut() else {
            continue;
        };

        if line.is_empty() || is_toc_marker(line) {
            continue;
        }

        let block_id = chapter.blocks.len() + 1;
        let block_type = classify(line);

        if block_type == BlockType::Conversation {
            log::debug!(
                "[CONVERSATION] Chapter {}, Block {}: {}...",
                chapter.id,
                block_id,
                preview(line)
            );
        }

        chapter
            .blocks
            .push(Block::new(block_id, block_type, line.to_string()));
    }

    if let Some(done) = current {
        chapters.push(done);
    }

    chapters
}

/// Strip surrounding whitespace, counting the ASCII information
/// separators U+001C..=U+001F as whitespace alongside Unicode `White_Space`.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}
