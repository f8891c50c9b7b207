//! Text segmentation: chapter markers, block classification and the line scanner.

pub mod classifier;
pub mod markers;
mod segmenter;

pub use segmenter::parse_text;
