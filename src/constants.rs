//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Corpus segmentation constants.
pub mod parser {
    /// Default number of leading lines reserved as front matter.
    pub const DEFAULT_FRONT_MATTER_LINES: usize = 260;

    /// Trimmed paragraphs shorter than this (in characters) are noise.
    pub const MIN_PARAGRAPH_CHARS: usize = 5;

    /// A citation line must be shorter than this (in characters).
    pub const MAX_REFERENCE_LINE_CHARS: usize = 50;

    /// Characters kept from a paragraph when synthesizing a reference.
    pub const FALLBACK_REFERENCE_CHARS: usize = 30;

    /// Marker appended to synthesized references.
    pub const FALLBACK_REFERENCE_SUFFIX: &str = "...";

    /// Minimum length of an indexed word.
    pub const MIN_WORD_LEN: usize = 3;
}

/// Search and suggestion constants.
pub mod search {
    /// Maximum number of verses returned by a search.
    pub const MAX_SEARCH_RESULTS: usize = 50;

    /// Maximum number of prefix suggestions.
    pub const MAX_SUGGESTIONS: usize = 15;

    /// Shortest prefix (in characters) that produces suggestions.
    pub const MIN_SUGGESTION_PREFIX: usize = 2;
}

/// Cache constants.
pub mod cache {
    /// Bumped whenever segmentation output changes, invalidating old caches.
    pub const CACHE_SCHEMA_VERSION: &str = "v8";

    /// Cache file name.
    pub const CACHE_FILE: &str = "corpus_cache.json";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// UI layout constants.
pub mod ui {
    /// Popup width as a percentage of the terminal.
    pub const POPUP_WIDTH_PERCENT: u16 = 80;

    /// Popup height as a percentage of the terminal.
    pub const POPUP_HEIGHT_PERCENT: u16 = 80;
}

/// Corpus retrieval constants.
pub mod source {
    /// Default corpus location when nothing is configured.
    pub const DEFAULT_CORPUS: &str = "bom.txt";

    /// HTTP timeout for remote corpora, in seconds.
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}
