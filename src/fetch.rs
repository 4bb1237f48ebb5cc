//! Fetch orchestration: turns a [`Query`] into displayable image handles.
//!
//! One pass per mounted backdrop. The anonymous path is a single
//! redirect-follow; the authorized path is list-then-per-item scatter/gather
//! where the output order is always input/response order, never completion
//! order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::handle::ImageHandle;
use crate::query::{AuthorizedQuery, Query, SourceQuery};
use crate::urls;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One record of the search endpoint's JSON response. Only the id matters;
/// the payload comes from a follow-up per-id fetch.
#[derive(Debug, Deserialize)]
struct PhotoRecord {
    id: String,
}

pub struct Fetcher {
    client: reqwest::Client,
    source_base: String,
    api_base: String,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_bases(urls::SOURCE_BASE_URL, urls::API_BASE_URL)
    }

    /// Point the orchestrator at alternative endpoints (tests, proxies).
    pub fn with_bases(source_base: impl Into<String>, api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            source_base: source_base.into(),
            api_base: api_base.into(),
        }
    }

    /// Resolve a query into zero-or-more displayable handles.
    pub async fn resolve(&self, query: &Query) -> Result<Vec<Arc<ImageHandle>>, Error> {
        match query {
            Query::Anonymous(source) => self.resolve_anonymous(source).await,
            Query::Authorized(api) => self.resolve_authorized(api).await,
        }
    }

    async fn resolve_anonymous(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<Arc<ImageHandle>>, Error> {
        let url = urls::source_url(&self.source_base, query);
        debug!(url = %url, "resolving anonymous query");
        let handle = self.fetch_image(&url).await?;
        Ok(vec![Arc::new(handle)])
    }

    async fn resolve_authorized(
        &self,
        query: &AuthorizedQuery,
    ) -> Result<Vec<Arc<ImageHandle>>, Error> {
        if !query.photo_ids.is_empty() {
            return Ok(self.fetch_photos(&query.photo_ids, &query.access_key).await);
        }

        let url = urls::search_url(&self.api_base, query);
        debug!(url = %url, "resolving authorized search");
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let records: Vec<PhotoRecord> = serde_json::from_str(&body)?;
        let ids: Vec<String> = records.into_iter().map(|record| record.id).collect();
        debug!(count = ids.len(), "search returned photo records");
        Ok(self.fetch_photos(&ids, &query.access_key).await)
    }

    /// Scatter/gather over photo ids. Fetches are issued back-to-back and
    /// joined; results come back in input order. A failed item is logged and
    /// dropped without aborting its siblings.
    async fn fetch_photos(&self, ids: &[String], access_key: &str) -> Vec<Arc<ImageHandle>> {
        let fetches = ids.iter().map(|id| {
            let url = urls::photo_url(&self.api_base, id, access_key);
            async move { (id, self.fetch_image(&url).await) }
        });

        let mut handles = Vec::with_capacity(ids.len());
        for (id, result) in join_all(fetches).await {
            match result {
                Ok(handle) => handles.push(Arc::new(handle)),
                Err(err) => warn!(photo_id = %id, error = %err, "photo fetch failed"),
            }
        }
        handles
    }

    /// One GET for a binary payload, wrapped as a displayable handle keyed
    /// by the final (post-redirect) URL.
    async fn fetch_image(&self, url: &str) -> Result<ImageHandle, Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let resolved = response.url().to_string();
        let payload = response.bytes().await?;
        debug!(url = %resolved, bytes = payload.len(), "fetched image payload");
        Ok(ImageHandle::new(resolved, payload))
    }
}
