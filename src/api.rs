//! Client for the MediaWiki random-article API.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the acquisition loop can run
//! against the live API or a scripted source in tests:
//! - [`RandomArticleSource`]: core trait producing one batch of random pages
//! - [`WikipediaApi`]: `reqwest` implementation against `{lang}.wikipedia.org`
//!
//! # Request
//!
//! ```text
//! GET https://{lang}.wikipedia.org/w/api.php
//!     ?action=query&format=json&generator=random&grnnamespace=0
//!     &grnlimit=10&prop=info&inprop=url
//! ```
//!
//! Failures are not retried here; a failed request aborts the caller's loop.

use crate::error::{Error, Result};
use crate::models::{Language, QueryResponse, RawPage};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Placeholder substituted with the language code in the endpoint template.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Trait for anything that can hand out batches of random articles.
pub trait RandomArticleSource {
    /// Fetch one batch of random main-namespace pages for `language`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(pages))` for a well-formed batch (possibly empty)
    /// - `Ok(None)` when the response had no page container
    /// - `Err(_)` on transport, status, or parse failure
    async fn random_batch(&self, language: Language) -> Result<Option<Vec<RawPage>>>;
}

/// HTTP client for `action=query&generator=random`.
#[derive(Debug, Clone)]
pub struct WikipediaApi {
    client: Client,
    endpoint: String,
    batch_size: u32,
}

impl WikipediaApi {
    /// Build a client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - URL template containing `{lang}`
    /// * `batch_size` - value sent as `grnlimit`
    /// * `timeout` - per-request timeout
    pub fn new(endpoint: impl Into<String>, batch_size: u32, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if !endpoint.contains(LANG_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "api_endpoint {endpoint:?} must contain {LANG_PLACEHOLDER}"
            )));
        }
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            batch_size,
        })
    }

    /// Full request URL for one batch in `language`.
    pub fn batch_url(&self, language: Language) -> Result<Url> {
        let base = self.endpoint.replace(LANG_PLACEHOLDER, language.code());
        let limit = self.batch_size.to_string();
        let url = Url::parse_with_params(
            &base,
            &[
                ("action", "query"),
                ("format", "json"),
                ("generator", "random"),
                ("grnnamespace", "0"),
                ("grnlimit", limit.as_str()),
                ("prop", "info"),
                ("inprop", "url"),
            ],
        )?;
        Ok(url)
    }
}

impl RandomArticleSource for WikipediaApi {
    #[instrument(level = "debug", skip(self), fields(lang = %language))]
    async fn random_batch(&self, language: Language) -> Result<Option<Vec<RawPage>>> {
        let url = self.batch_url(language)?;
        let t0 = Instant::now();

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let dt = t0.elapsed();

        let response: QueryResponse = serde_json::from_str(&body).inspect_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Response was not valid query JSON"
            )
        })?;

        if let Some(api_error) = &response.error {
            warn!(code = %api_error.code, info = %api_error.info, "API returned an error object");
        }

        let pages = response.into_pages();
        debug!(
            elapsed_ms = dt.as_millis() as u64,
            pages = pages.as_ref().map(Vec::len),
            "Fetched random batch"
        );
        Ok(pages)
    }
}
