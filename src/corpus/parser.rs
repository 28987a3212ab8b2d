//! Heuristic segmentation of a flat scripture text dump.
//!
//! The body is split into blank-line separated paragraphs. A paragraph whose
//! first line looks like a citation (`1 Nephi 3:7`) becomes a verse with that
//! reference; anything else becomes a verse with a snippet reference. Two
//! narrow noise filters drop page-break headings and repeated running headers.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{chapter_id_of, Corpus, Verse};
use crate::constants::parser::{
    DEFAULT_FRONT_MATTER_LINES, FALLBACK_REFERENCE_CHARS, FALLBACK_REFERENCE_SUFFIX,
    MAX_REFERENCE_LINE_CHARS, MIN_PARAGRAPH_CHARS, MIN_WORD_LEN,
};

/// Regex matching one or more blank lines between paragraphs.
#[allow(clippy::expect_used)]
static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n").expect("valid regex: RE_PARAGRAPH_BREAK")
});

/// Regex matching a paragraph that is only `Chapter 7`.
#[allow(clippy::expect_used)]
static RE_BARE_CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^chapter\s+[0-9]+$").expect("valid regex: RE_BARE_CHAPTER")
});

/// Regex matching a `3:7` citation marker.
#[allow(clippy::expect_used)]
static RE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+:[0-9]+").expect("valid regex: RE_CITATION")
});

/// Regex matching a run of ASCII word characters.
#[allow(clippy::expect_used)]
static RE_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_]+").expect("valid regex: RE_WORD_RUN")
});

/// Knobs for a parse pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Leading lines kept aside as front matter.
    pub front_matter_lines: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { front_matter_lines: DEFAULT_FRONT_MATTER_LINES }
    }
}

impl ParseOptions {
    /// Options with a custom front-matter line count.
    pub const fn with_front_matter_lines(front_matter_lines: usize) -> Self {
        Self { front_matter_lines }
    }
}

/// Parse a raw corpus into verses, words and chapters.
///
/// Never fails: input with nothing segmentable yields an empty corpus.
pub fn parse(raw: &str, options: &ParseOptions) -> Corpus {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let split_at = options.front_matter_lines.min(lines.len());
    let (front, body) = lines.split_at(split_at);
    let front_matter = front.join("\n");
    let body = body.join("\n");

    let mut verses = Vec::new();
    let mut words = BTreeSet::new();
    let mut chapters = Vec::new();
    let mut seen_chapters = HashSet::new();
    let mut paragraph_count = 0usize;

    for (sequence_id, paragraph) in RE_PARAGRAPH_BREAK.split(&body).enumerate() {
        paragraph_count += 1;

        let Some((reference, text)) = segment_paragraph(paragraph) else {
            continue;
        };

        let chapter_id = chapter_id_of(&reference).to_string();
        if seen_chapters.insert(chapter_id.clone()) {
            chapters.push(chapter_id.clone());
        }

        collect_words(&text, &mut words);

        verses.push(Verse {
            sequence_id,
            reference,
            text,
            chapter_id,
        });
    }

    tracing::debug!(
        "Segmented {paragraph_count} paragraphs into {} verses, {} chapters, {} words",
        verses.len(),
        chapters.len(),
        words.len()
    );

    Corpus {
        verses,
        words: words.into_iter().collect(),
        chapters,
        front_matter,
    }
}

/// Turn one paragraph into `(reference, body)`, or `None` if it is noise.
fn segment_paragraph(paragraph: &str) -> Option<(String, String)> {
    let clean = paragraph.trim();
    if clean.chars().count() < MIN_PARAGRAPH_CHARS {
        return None;
    }

    // Page-break artifact
    if RE_BARE_CHAPTER.is_match(clean) {
        return None;
    }

    let lines: Vec<&str> = clean.split('\n').collect();
    let (reference, text) = match lines.split_first() {
        Some((first, rest)) if !rest.is_empty() && is_citation_line(first) => {
            (first.trim().to_string(), rest.join(" ").trim().to_string())
        }
        _ => {
            let text = lines.join(" ");
            (fallback_reference(&text), text)
        }
    };

    // Running header repeated as if it were verse content
    let heading = chapter_id_of(&reference).trim().to_lowercase();
    if text.trim().to_lowercase() == heading {
        return None;
    }

    Some((reference, text))
}

/// Whether a paragraph's first line is a citation like `Alma 32:21`.
fn is_citation_line(line: &str) -> bool {
    line.chars().count() < MAX_REFERENCE_LINE_CHARS && RE_CITATION.is_match(line)
}

/// Snippet reference for paragraphs without a citation line.
fn fallback_reference(text: &str) -> String {
    let snippet: String = text.chars().take(FALLBACK_REFERENCE_CHARS).collect();
    format!("{}{FALLBACK_REFERENCE_SUFFIX}", snippet.trim())
}

/// Add every lowercase alphabetic token of at least three letters to `words`.
///
/// Tokens are whole runs of ASCII word characters, so `abc1` and `ab_cd`
/// contribute nothing.
fn collect_words(text: &str, words: &mut BTreeSet<String>) {
    let lower = text.to_lowercase();
    words.extend(
        RE_WORD_RUN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|run| run.len() >= MIN_WORD_LEN && run.bytes().all(|b| b.is_ascii_lowercase()))
            .map(str::to_string),
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn parse_body(body: &str) -> Corpus {
        parse(body, &ParseOptions::with_front_matter_lines(0))
    }

    #[test]
    fn test_citation_paragraph() {
        let corpus = parse_body("1 Nephi 3:7\nAnd it came to pass that I, Nephi,\nsaid unto my father");
        assert_eq!(corpus.verses.len(), 1);
        let verse = &corpus.verses[0];
        assert_eq!(verse.reference, "1 Nephi 3:7");
        assert_eq!(verse.text, "And it came to pass that I, Nephi, said unto my father");
        assert_eq!(verse.chapter_id, "1 Nephi 3");
        assert_eq!(verse.sequence_id, 0);
    }

    #[test]
    fn test_fallback_reference() {
        let corpus = parse_body("THE BOOK OF NEPHI HIS REIGN AND MINISTRY\nAn account of Lehi");
        let verse = &corpus.verses[0];
        assert_eq!(verse.reference, "THE BOOK OF NEPHI HIS REIGN AN...");
        assert_eq!(verse.text, "THE BOOK OF NEPHI HIS REIGN AND MINISTRY An account of Lehi");
        assert_eq!(verse.chapter_id, verse.reference);
    }

    #[test]
    fn test_long_first_line_is_not_a_citation() {
        let first = "This line mentions 3:7 but is far too long to be a citation line";
        let corpus = parse_body(&format!("{first}\nsecond line"));
        assert!(corpus.verses[0].reference.ends_with("..."));
    }

    #[test]
    fn test_single_line_with_citation_uses_fallback() {
        let corpus = parse_body("See Alma 32:21 for faith");
        assert_eq!(corpus.verses[0].reference, "See Alma 32:21 for faith...");
        assert_eq!(corpus.verses[0].chapter_id, "See Alma 32");
    }

    #[test]
    fn test_short_paragraphs_are_noise() {
        let corpus = parse_body("abc\n\n  de  \n\nAlma 1:1\nWords of Alma");
        assert_eq!(corpus.verses.len(), 1);
        assert_eq!(corpus.verses[0].sequence_id, 2);
    }

    #[test]
    fn test_bare_chapter_heading_dropped() {
        let corpus = parse_body("Chapter 7\n\nCHAPTER   12\n\nchapter 3 begins here\nmore");
        assert_eq!(corpus.verses.len(), 1);
        assert!(corpus.verses[0].text.starts_with("chapter 3 begins"));
    }

    #[test]
    fn test_repeated_header_dropped() {
        let corpus = parse_body("1 Nephi 8:1\n1 NEPHI 8\n\n1 Nephi 8:2\nAnd it came to pass");
        assert_eq!(corpus.verses.len(), 1);
        assert_eq!(corpus.verses[0].reference, "1 Nephi 8:2");
        assert_eq!(corpus.verses[0].sequence_id, 1);
    }

    #[test]
    fn test_sequence_ids_skip_discarded_paragraphs() {
        let corpus = parse_body("Alma 1:1\nFirst verse\n\nChapter 2\n\nAlma 1:2\nSecond verse");
        let ids: Vec<usize> = corpus.verses.iter().map(|v| v.sequence_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_front_matter_reserved() {
        let raw = "Title page\nCopyright notice\nAlma 1:1\nNot a verse because it is front matter\n\nAlma 1:2\nA real verse";
        let corpus = parse(raw, &ParseOptions::with_front_matter_lines(4));
        assert_eq!(corpus.front_matter, "Title page\nCopyright notice\nAlma 1:1\nNot a verse because it is front matter");
        assert_eq!(corpus.verses.len(), 1);
        assert_eq!(corpus.verses[0].reference, "Alma 1:2");
    }

    #[test]
    fn test_front_matter_longer_than_input() {
        let corpus = parse("only\nthree\nlines", &ParseOptions::default());
        assert_eq!(corpus.front_matter, "only\nthree\nlines");
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let corpus = parse_body("Alma 1:1\r\nFirst verse\r\n\r\nAlma 1:2\r\nSecond\r\nverse");
        assert_eq!(corpus.verses.len(), 2);
        assert_eq!(corpus.verses[1].text, "Second verse");
        assert!(corpus.verses.iter().all(|v| !v.text.contains('\r')));
    }

    #[test]
    fn test_blank_lines_with_whitespace_split_paragraphs() {
        let corpus = parse_body("Alma 1:1\nFirst verse\n   \t\n\n\nAlma 1:2\nSecond verse");
        assert_eq!(corpus.verses.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let corpus = parse("", &ParseOptions::default());
        assert!(corpus.verses.is_empty());
        assert!(corpus.words.is_empty());
        assert!(corpus.chapters.is_empty());

        let corpus = parse_body("   \n\n \t \n");
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_chapters_in_first_seen_order() {
        let corpus = parse_body(
            "Alma 2:1\nsecond chapter first\n\nAlma 1:1\nfirst chapter\n\nAlma 2:2\nback again",
        );
        assert_eq!(corpus.chapters, vec!["Alma 2", "Alma 1"]);
    }

    #[test]
    fn test_word_extraction() {
        let corpus = parse_body("Alma 1:1\nNephi's PEOPLE, the people of God; abc1 ab_cd go café");
        assert_eq!(corpus.words, vec!["caf", "god", "nephi", "people", "the"]);
    }

    #[test]
    fn test_words_ignore_reference_line() {
        let corpus = parse_body("Moroni 10:4\nask with real intent");
        assert!(!corpus.words.contains(&"moroni".to_string()));
        assert!(corpus.words.contains(&"intent".to_string()));
    }
}
