//! Resource fetching seam.
//!
//! The loaders never touch the network or filesystem directly; they go through [`Fetch`],
//! so the whole pipeline can run against an in-memory asset map in tests.

use std::{collections::HashMap, future::Future, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use url::Url;

use crate::foundation::error::{EmbedError, EmbedResult};

/// Response of a completed request. Transport failures are reported as `Err` instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-like status code.
    pub status: u16,
    /// Reason phrase matching `status`.
    pub status_text: String,
    /// Response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// `404 Not Found` with an empty body.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            status_text: "Not Found".to_string(),
            body: Vec::new(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous resource fetcher.
pub trait Fetch {
    /// Fetch `url`. An unsuccessful status is a response, not an error.
    fn fetch(&self, url: &Url) -> impl Future<Output = anyhow::Result<FetchResponse>>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &Url) -> impl Future<Output = anyhow::Result<FetchResponse>> {
        (**self).fetch(url)
    }
}

/// Fetch `url` and require a successful status, mapping every failure to `LoadError`.
pub async fn fetch_ok<F: Fetch + ?Sized>(fetcher: &F, url: &Url) -> EmbedResult<Vec<u8>> {
    let res = fetcher
        .fetch(url)
        .await
        .map_err(|e| EmbedError::load(format!("request for '{url}' failed: {e:#}")))?;
    if !res.is_success() {
        return Err(EmbedError::load(format!(
            "'{url}' answered {} {}",
            res.status, res.status_text
        )));
    }
    Ok(res.body)
}

/// Resolve a mount-point source path against the page base URL.
pub fn resolve_source(base: &Url, path: &str) -> EmbedResult<Url> {
    base.join(path)
        .map_err(|e| EmbedError::config(format!("invalid source path '{path}': {e}")))
}

/// Serves `file://` URLs from the local filesystem.
#[derive(Clone, Debug, Default)]
pub struct FsFetcher;

impl Fetch for FsFetcher {
    async fn fetch(&self, url: &Url) -> anyhow::Result<FetchResponse> {
        if url.scheme() != "file" {
            anyhow::bail!("unsupported scheme '{}' for filesystem fetch", url.scheme());
        }
        let path: PathBuf = url
            .to_file_path()
            .map_err(|()| anyhow::anyhow!("'{url}' is not a local file path"))?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(FetchResponse::ok(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(e).with_context(|| format!("read '{}'", path.display())),
        }
    }
}

/// In-memory asset map keyed by absolute URL. Unknown URLs answer `404`.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    responses: Arc<HashMap<String, FetchResponse>>,
}

impl StaticFetcher {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a successful response.
    pub fn with(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response(url, FetchResponse::ok(body))
    }

    /// Add (or replace) an arbitrary response.
    pub fn with_response(self, url: &str, response: FetchResponse) -> Self {
        let mut map = Arc::unwrap_or_clone(self.responses);
        map.insert(url.to_string(), response);
        Self {
            responses: Arc::new(map),
        }
    }
}

impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &Url) -> anyhow::Result<FetchResponse> {
        Ok(self
            .responses
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(FetchResponse::not_found))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/fetch.rs"]
mod tests;
