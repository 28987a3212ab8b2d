//! Corpus retrieval from a local file or an HTTP(S) URL.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::constants::source::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};

/// Where the raw corpus text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// A file on disk.
    File(PathBuf),
    /// A remote document fetched over HTTP.
    Url(String),
}

impl CorpusSource {
    /// Interpret a configured location; `http://` and `https://` prefixes mean a URL.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(shellexpand::tilde(location).to_string()))
        }
    }

    /// Stable description, also used as the cache key.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    /// Read the whole corpus text.
    pub async fn fetch(&self) -> Result<String> {
        match self {
            Self::File(path) => fs_err::tokio::read_to_string(path)
                .await
                .map_err(|e| Error::retrieval(self.describe(), format!("File not found. ({e})"))),
            Self::Url(url) => fetch_url(url).await,
        }
    }
}

async fn fetch_url(url: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Network(format!("Could not build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::retrieval(url, format!("Request failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::retrieval(url, format!("File not found. (HTTP {status})")));
    }

    resp.text()
        .await
        .map_err(|e| Error::retrieval(url, format!("Could not read response body: {e}")))
}
