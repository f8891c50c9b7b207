//! Fixed line markers recognised by the segmenter.

/// Chapter numerals in the order they appear in the source text.
///
/// Matched by exact string equality against a trimmed line; the numbering
/// is symbolic and never parsed.
pub const CHAPTER_MARKERS: &[&str] = &[
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一",
];

/// Table-of-contents line, dropped from chapter bodies.
pub const TOC_MARKER: &str = "+目次";

/// Return the marker token if `line` is exactly a chapter marker.
pub fn chapter_marker(line: &str) -> Option<&'static str> {
    CHAPTER_MARKERS.iter().copied().find(|m| *m == line)
}

pub fn is_toc_marker(line: &str) -> bool {
    line == TOC_MARKER
}
