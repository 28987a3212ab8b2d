//! Cache-or-parse orchestration for the reader.

use std::time::Instant;

use crate::cache::CorpusCache;
use crate::config::Config;
use crate::corpus::{parse, Corpus};
use crate::error::{Error, Result};
use crate::source::CorpusSource;

/// Whether a load may reuse the cached parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Use the cache when it is valid.
    PreferCache,
    /// Fetch and parse again, then refresh the cache.
    Fresh,
}

/// Produce a corpus for the configured source.
pub async fn load_corpus(config: &Config, mode: LoadMode) -> Result<Corpus> {
    let source = CorpusSource::from_location(&config.corpus_location);
    let key = source.describe();
    let options = config.parse_options();
    let cache = config
        .cache_enabled
        .then(|| config.cache_dir.as_deref().map(CorpusCache::in_dir))
        .flatten();

    if mode == LoadMode::PreferCache {
        if let Some(corpus) = cache.as_ref().and_then(|c| c.load(&key, &options)) {
            tracing::info!("Loaded {} verses from cache", corpus.verses.len());
            return Ok(corpus);
        }
    }

    let raw = source.fetch().await?;

    let start = Instant::now();
    let corpus = tokio::task::spawn_blocking(move || parse(&raw, &options))
        .await
        .map_err(|e| Error::Msg(format!("Parse task failed: {e}")))?;
    tracing::info!(
        "Parsed {} verses in {} chapters from {key} in {:?}",
        corpus.verses.len(),
        corpus.chapters.len(),
        start.elapsed()
    );

    if let Some(cache) = &cache {
        match cache.store(&key, &options, &corpus) {
            Ok(()) => tracing::info!("Wrote corpus cache to {}", cache.path().display()),
            Err(e) => tracing::warn!("Failed to write corpus cache: {e}"),
        }
    }

    Ok(corpus)
}
