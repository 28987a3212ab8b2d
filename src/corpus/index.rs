//! Read-only queries over a parsed [`Corpus`].
//!
//! Suggestions are prefix matches against the sorted word list; search is a
//! literal, case-insensitive substring match against verse bodies. Nothing is
//! ranked: results come back alphabetically (words) or in parse order (verses).

use super::{Corpus, Verse};
use crate::constants::search::{MAX_SEARCH_RESULTS, MAX_SUGGESTIONS, MIN_SUGGESTION_PREFIX};

/// Which way to step through the chapter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the book.
    Previous,
    /// Towards the end of the book.
    Next,
}

impl Direction {
    /// Apply this direction to a chapter position, staying in `0..len`.
    pub const fn step(self, position: usize, len: usize) -> Option<usize> {
        match self {
            Self::Previous => position.checked_sub(1),
            Self::Next if position + 1 < len => Some(position + 1),
            Self::Next => None,
        }
    }
}

/// Outcome of an executed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<'a> {
    verses: Vec<&'a Verse>,
    limit: usize,
}

impl<'a> SearchResults<'a> {
    /// Matching verses in parse order.
    pub fn verses(&self) -> &[&'a Verse] {
        &self.verses
    }

    /// Number of matching verses returned.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// The query ran and matched nothing.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// The result list hit the cap, so further matches may exist.
    pub fn is_capped(&self) -> bool {
        self.verses.len() == self.limit
    }
}

/// Query view over a corpus.
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    corpus: &'a Corpus,
}

impl<'a> SearchIndex<'a> {
    /// Wrap a corpus.
    pub const fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Up to fifteen indexed words starting with `prefix`, alphabetical.
    ///
    /// Prefixes shorter than two characters produce nothing.
    pub fn suggest(&self, prefix: &str) -> Vec<&'a str> {
        let prefix = prefix.to_lowercase();
        if prefix.chars().count() < MIN_SUGGESTION_PREFIX {
            return Vec::new();
        }

        let words = &self.corpus.words;
        let start = words.partition_point(|word| word.as_str() < prefix.as_str());
        words[start..]
            .iter()
            .take_while(|word| word.starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// Verses whose body contains `query`, ignoring case.
    ///
    /// Returns `None` for an empty query: the search is not executed.
    pub fn search(&self, query: &str) -> Option<SearchResults<'a>> {
        self.search_with_limit(query, MAX_SEARCH_RESULTS)
    }

    /// [`Self::search`] with an explicit result cap.
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Option<SearchResults<'a>> {
        if query.is_empty() {
            return None;
        }

        let needle = query.to_lowercase();
        let verses = self
            .corpus
            .verses
            .iter()
            .filter(|verse| verse.text.to_lowercase().contains(&needle))
            .take(limit)
            .collect();

        Some(SearchResults { verses, limit })
    }

    /// Every verse of a chapter, in parse order.
    pub fn verses_in_chapter(&self, chapter_id: &str) -> Vec<&'a Verse> {
        self.corpus
            .verses
            .iter()
            .filter(|verse| verse.chapter_id == chapter_id)
            .collect()
    }

    /// Position of a chapter in reading order.
    pub fn chapter_position(&self, chapter_id: &str) -> Option<usize> {
        self.corpus.chapters.iter().position(|c| c == chapter_id)
    }

    /// Chapter at a reading-order position.
    pub fn chapter_at(&self, position: usize) -> Option<&'a str> {
        self.corpus.chapters.get(position).map(String::as_str)
    }

    /// Number of chapters.
    pub fn chapter_count(&self) -> usize {
        self.corpus.chapters.len()
    }

    /// The neighbouring chapter, or `None` past either end of the book.
    pub fn adjacent_chapter(&self, chapter_id: &str, direction: Direction) -> Option<&'a str> {
        let position = self.chapter_position(chapter_id)?;
        let target = direction.step(position, self.chapter_count())?;
        self.chapter_at(target)
    }
}
