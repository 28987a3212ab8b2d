//! Persistent cache of parsed corpora.
//!
//! The cached document records the segmentation schema version, the parse
//! options and the source it was built from; changing any of them
//! invalidates it. Unreadable documents are deleted and the corpus is parsed
//! again.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::cache::{CACHE_FILE, CACHE_SCHEMA_VERSION};
use crate::corpus::{Corpus, ParseOptions};
use crate::error::{Error, Result};

/// On-disk cache document
#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    /// Segmentation schema this corpus was produced with
    schema: String,
    /// Path or URL the corpus was parsed from
    source: String,
    /// Options the parse ran with
    options: ParseOptions,
    /// RFC 3339 timestamp of the parse
    built_at: String,
    #[serde(flatten)]
    corpus: Corpus,
}

/// JSON file cache for one parsed corpus.
#[derive(Debug, Clone)]
pub struct CorpusCache {
    path: PathBuf,
}

impl CorpusCache {
    /// Cache stored as `corpus_cache.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self { path: dir.join(CACHE_FILE) }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached corpus for `source` parsed with `options`, or `None` when
    /// absent, stale or malformed.
    pub fn load(&self, source: &str, options: &ParseOptions) -> Option<Corpus> {
        let data = match fs_err::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Could not read corpus cache: {e}");
                return None;
            }
        };

        let document: CacheDocument = match serde_json::from_str(&data) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Saved data corrupt, reloading... ({e})");
                self.clear();
                return None;
            }
        };

        // Suggestions binary-search the word list.
        if !document.corpus.words.windows(2).all(|w| w[0] < w[1]) {
            tracing::warn!("Saved data corrupt, reloading... (word list not sorted)");
            self.clear();
            return None;
        }

        if document.schema != CACHE_SCHEMA_VERSION {
            tracing::info!(
                "Ignoring corpus cache with schema {} (current {CACHE_SCHEMA_VERSION})",
                document.schema
            );
            return None;
        }

        if document.source != source {
            tracing::info!("Ignoring corpus cache built from {}", document.source);
            return None;
        }

        if document.options != *options {
            tracing::info!(
                "Ignoring corpus cache parsed with {} front-matter lines (now {})",
                document.options.front_matter_lines,
                options.front_matter_lines
            );
            return None;
        }

        Some(document.corpus)
    }

    /// Write `corpus` as the parse of `source` with `options`.
    pub fn store(&self, source: &str, options: &ParseOptions, corpus: &Corpus) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
        }

        let document = CacheDocument {
            schema: CACHE_SCHEMA_VERSION.to_string(),
            source: source.to_string(),
            options: *options,
            built_at: Utc::now().to_rfc3339(),
            corpus: corpus.clone(),
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::Cache(format!("Failed to serialize cache: {e}")))?;
        fs_err::write(&self.path, json).map_err(|e| Error::io(e, self.path.clone()))?;
        Ok(())
    }

    /// Delete the cache file if it exists.
    pub fn clear(&self) {
        if let Err(e) = fs_err::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Could not remove corpus cache: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::corpus::parse;

    const OPTIONS: ParseOptions = ParseOptions::with_front_matter_lines(1);

    fn sample() -> Corpus {
        parse("Front\n\nAlma 1:1\nThe words of Alma\n\nAlma 2:1\nMore words", &OPTIONS)
    }

    #[test]
    fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        let corpus = sample();

        cache.store("bom.txt", &OPTIONS, &corpus).unwrap();
        assert_eq!(cache.load("bom.txt", &OPTIONS), Some(corpus));
    }

    #[test]
    fn test_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        assert!(cache.load("bom.txt", &OPTIONS).is_none());
    }

    #[test]
    fn test_other_source_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        cache.store("bom.txt", &OPTIONS, &sample()).unwrap();
        assert!(cache.load("https://example.org/bom.txt", &OPTIONS).is_none());
        assert!(cache.path().exists());
    }

    #[test]
    fn test_other_front_matter_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        cache.store("bom.txt", &OPTIONS, &sample()).unwrap();

        let other = ParseOptions::with_front_matter_lines(0);
        assert!(cache.load("bom.txt", &other).is_none());
        assert!(cache.path().exists());
        assert!(cache.load("bom.txt", &OPTIONS).is_some());
    }

    #[test]
    fn test_old_schema_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        cache.store("bom.txt", &OPTIONS, &sample()).unwrap();

        let json = std::fs::read_to_string(cache.path()).unwrap();
        let stale = json.replace(
            &format!("\"schema\": \"{CACHE_SCHEMA_VERSION}\""),
            "\"schema\": \"v7\"",
        );
        std::fs::write(cache.path(), stale).unwrap();

        assert!(cache.load("bom.txt", &OPTIONS).is_none());
    }

    #[test]
    fn test_corrupt_cache_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        std::fs::write(cache.path(), "{\"schema\": \"v8\", \"verses\": [").unwrap();

        assert!(cache.load("bom.txt", &OPTIONS).is_none());
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_missing_fields_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        let json = format!(
            "{{\"schema\": \"{CACHE_SCHEMA_VERSION}\", \"source\": \"bom.txt\", \"built_at\": \"\", \"verses\": [], \"words\": []}}"
        );
        std::fs::write(cache.path(), json).unwrap();

        assert!(cache.load("bom.txt", &OPTIONS).is_none());
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_unsorted_words_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(dir.path());
        let mut corpus = sample();
        corpus.words = vec!["zion".to_string(), "alma".to_string()];
        cache.store("bom.txt", &OPTIONS, &corpus).unwrap();

        assert!(cache.load("bom.txt", &OPTIONS).is_none());
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::in_dir(&dir.path().join("nested").join("cache"));
        cache.store("bom.txt", &OPTIONS, &sample()).unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_store_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let cache = CorpusCache::in_dir(&blocker);

        match cache.store("bom.txt", &OPTIONS, &sample()) {
            Err(Error::Io { path: Some(path), .. }) => assert_eq!(path, blocker),
            other => panic!("Expected Io error with path, got {other:?}"),
        }
    }
}
