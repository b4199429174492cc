//! Data models for random-article discovery.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawPage`] / [`QueryResponse`]: the MediaWiki `action=query` response shape
//! - [`ArticleCandidate`]: a page that passed the filters, annotated with a reading time
//! - [`Language`]: the fixed set of Wikipedia editions the user can pick from

use crate::error::Error;
use crate::utils::reading_time_minutes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A Wikipedia language edition offered in the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    /// Every selectable language, in picker order.
    pub const ALL: [Language; 2] = [Language::En, Language::Tr];

    /// The subdomain code, e.g. `"en"` for `en.wikipedia.org`.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    /// Display label in the language itself.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
        }
    }

    pub fn flag_url(self) -> &'static str {
        match self {
            Language::En => "https://flagcdn.com/40x30/us.png",
            Language::Tr => "https://flagcdn.com/40x30/tr.png",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == wanted)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

/// Top-level body of an `action=query&generator=random` response.
///
/// Both `query` and `query.pages` may be absent (for instance when the API
/// answers with an `error` object); callers treat that as an empty batch.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    /// Pages keyed by page id. The ids are integer-like strings; keying the
    /// map numerically yields ascending page-id iteration order.
    #[serde(default)]
    pub pages: Option<BTreeMap<i64, RawPage>>,
}

/// Error object MediaWiki returns in place of `query`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl QueryResponse {
    /// Pages of this batch in ascending page-id order, or `None` when the
    /// response carried no page container.
    pub fn into_pages(self) -> Option<Vec<RawPage>> {
        self.query
            .and_then(|q| q.pages)
            .map(|pages| pages.into_values().collect())
    }
}

/// A page as returned by `prop=info&inprop=url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawPage {
    pub pageid: u64,
    pub title: String,
    /// Page size in bytes. Absent lengths count as zero.
    #[serde(default)]
    pub length: u64,
    pub fullurl: String,
}

/// An article that survived the novelty and length filters.
///
/// Candidates are immutable once built: the reading time is derived from the
/// byte length at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCandidate {
    page_id: u64,
    title: String,
    full_url: String,
    length: u64,
    reading_time: u64,
}

impl ArticleCandidate {
    pub fn new(page_id: u64, title: impl Into<String>, full_url: impl Into<String>, length: u64) -> Self {
        Self {
            page_id,
            title: title.into(),
            full_url: full_url.into(),
            length,
            reading_time: reading_time_minutes(length),
        }
    }

    pub fn page_id(&self) -> u64 {
        self.page_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    /// Size of the article source in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Estimated reading time in whole minutes.
    pub fn reading_time(&self) -> u64 {
        self.reading_time
    }
}

impl From<RawPage> for ArticleCandidate {
    fn from(page: RawPage) -> Self {
        ArticleCandidate::new(page.pageid, page.title, page.fullurl, page.length)
    }
}
