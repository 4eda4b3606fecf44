//! Section segmentation: paragraphs first, sentences for oversized ones.

use once_cell::sync::Lazy;
use regex::Regex;

use cardmill_core::config::MAX_SECTION_LEN;
use cardmill_core::TextSection;

/// Blank-line boundary: two or more newlines, CRLF tolerant, possibly with
/// trailing spaces on the blank line.
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

/// Split text into sentences on `.`/`!`/`?` followed by whitespace.
/// Byte scan instead of regex — the regex crate has no lookbehind.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// Split raw document text into candidate sections.
///
/// Paragraphs are split on blank lines; any paragraph longer than
/// [`MAX_SECTION_LEN`] chars is further split on sentence boundaries, the
/// sub-parts replacing it in order. Empty sections are dropped. Index is
/// 1-based; total reflects the final list length.
pub fn segment(raw: &str) -> Vec<TextSection> {
    let mut parts: Vec<String> = Vec::new();

    for block in BLANK_LINES.split(raw) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        if block.chars().count() > MAX_SECTION_LEN {
            for sentence in split_sentences(block) {
                parts.push(sentence.to_string());
            }
        } else {
            parts.push(block.to_string());
        }
    }

    let total = parts.len();
    parts
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextSection {
            text,
            index: i + 1,
            total,
        })
        .collect()
}
