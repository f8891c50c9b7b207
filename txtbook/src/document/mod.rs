//! Converted document model and assembly.

mod assembler;
mod types;

pub use assembler::assemble_document;
pub use types::{Block, BlockType, Chapter, Document};
