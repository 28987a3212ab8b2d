//! Scripture corpus model.
//!
//! A [`Corpus`] is the immutable result of one parse pass: the verse list,
//! the sorted word index, the chapter order and the opaque front matter.
//! [`SearchIndex`] borrows it to answer queries.

pub mod index;
pub mod parser;

use serde::{Deserialize, Serialize};

pub use index::{Direction, SearchIndex, SearchResults};
pub use parser::{parse, ParseOptions};

/// One parsed unit of scripture text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Ordinal of the source paragraph, counting discarded paragraphs too.
    pub sequence_id: usize,
    /// Citation such as "1 Nephi 3:7", or a snippet ending in "...".
    pub reference: String,
    /// Verse body without the citation line.
    pub text: String,
    /// Grouping key shared by every verse of a chapter.
    pub chapter_id: String,
}

impl Verse {
    /// The verse number part of the reference ("7" for "1 Nephi 3:7").
    pub fn verse_label(&self) -> Option<&str> {
        self.reference
            .split_once(':')
            .map(|(_, label)| label.trim())
            .filter(|label| !label.is_empty())
    }
}

/// Derive the chapter identifier for a reference.
///
/// The text before the first colon, trimmed; the whole reference when it has
/// no colon.
pub fn chapter_id_of(reference: &str) -> &str {
    reference
        .split_once(':')
        .map_or(reference, |(chapter, _)| chapter.trim())
}

/// Everything produced by one parse of a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Verses in parse order.
    pub verses: Vec<Verse>,
    /// Distinct indexed words, sorted ascending.
    pub words: Vec<String>,
    /// Distinct chapter identifiers in first-seen order.
    pub chapters: Vec<String>,
    /// Reserved leading lines, joined with newlines.
    pub front_matter: String,
}

impl Corpus {
    /// Whether the parse produced no verses.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Borrow a search index over this corpus.
    pub const fn index(&self) -> SearchIndex<'_> {
        SearchIndex::new(self)
    }
}
