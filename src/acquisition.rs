//! The article acquisition loop.
//!
//! Repeatedly pulls random batches from a [`RandomArticleSource`], keeps pages
//! that are unseen and long enough, annotates them with a reading time, and
//! stops once `desired_count` candidates have been accumulated. A title that
//! already made it into the accumulator from an earlier batch is skipped.
//!
//! Batches are requested strictly one after another. A batch without a page
//! container counts as empty; any error aborts the whole run and nothing is
//! returned.

use crate::api::RandomArticleSource;
use crate::error::{Error, Result};
use crate::models::{ArticleCandidate, Language, RawPage};
use crate::store::SeenSet;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_DESIRED_COUNT: usize = 10;
pub const DEFAULT_MIN_LENGTH: u64 = 5000;

/// Tuning knobs for one acquisition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionSettings {
    /// Number of candidates to return.
    pub desired_count: usize,
    /// Minimum page length in bytes, inclusive.
    pub min_length: u64,
    /// Give up after this many batch requests. `None` keeps fetching forever.
    pub max_attempts: Option<usize>,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            desired_count: DEFAULT_DESIRED_COUNT,
            min_length: DEFAULT_MIN_LENGTH,
            max_attempts: None,
        }
    }
}

/// Whether a raw page qualifies: unseen and at least `min_length` bytes.
pub fn qualifies(page: &RawPage, seen: &SeenSet, min_length: u64) -> bool {
    !seen.contains(&page.title) && page.length >= min_length
}

/// Run the acquisition loop.
///
/// # Arguments
///
/// * `source` - where batches come from
/// * `language` - Wikipedia edition to query
/// * `seen` - snapshot of already-opened titles, read only
/// * `settings` - target count, length threshold and optional attempt cap
///
/// # Returns
///
/// The first `desired_count` qualifying candidates in the order they were
/// fetched.
///
/// # Errors
///
/// Propagates the first source error. Returns [`Error::InsufficientSupply`]
/// when `max_attempts` is set and exhausted.
#[instrument(level = "info", skip(source, seen, settings), fields(lang = %language, wanted = settings.desired_count))]
pub async fn acquire<S>(
    source: &S,
    language: Language,
    seen: &SeenSet,
    settings: &AcquisitionSettings,
) -> Result<Vec<ArticleCandidate>>
where
    S: RandomArticleSource,
{
    let t0 = Instant::now();
    let mut accumulated: Vec<ArticleCandidate> = Vec::with_capacity(settings.desired_count);
    let mut accumulated_titles: HashSet<String> = HashSet::new();
    let mut attempts = 0usize;

    while accumulated.len() < settings.desired_count {
        if let Some(max) = settings.max_attempts {
            if attempts >= max {
                warn!(attempts, found = accumulated.len(), "Attempt cap reached");
                return Err(Error::InsufficientSupply {
                    attempts,
                    found: accumulated.len(),
                    wanted: settings.desired_count,
                });
            }
        }
        attempts += 1;

        let Some(pages) = source.random_batch(language).await? else {
            debug!(attempt = attempts, "Batch had no page container; retrying");
            continue;
        };

        let batch_size = pages.len();
        let before = accumulated.len();
        accumulated.extend(
            pages
                .into_iter()
                .filter(|page| qualifies(page, seen, settings.min_length))
                .filter(|page| accumulated_titles.insert(page.title.clone()))
                .map(ArticleCandidate::from),
        );
        debug!(
            attempt = attempts,
            batch_size,
            kept = accumulated.len() - before,
            total = accumulated.len(),
            "Processed batch"
        );
    }

    accumulated.truncate(settings.desired_count);
    info!(
        attempts,
        count = accumulated.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Acquisition complete"
    );
    Ok(accumulated)
}
