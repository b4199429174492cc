//! Persistent record of article titles the user has already opened.
//!
//! The store is a single JSON file, `seenArticles.json`, holding an array of
//! titles in the order they were first opened:
//!
//! ```text
//! ["Ada Lovelace", "Göbekli Tepe", "Tardigrade"]
//! ```
//!
//! It is read once at startup and rewritten (temp file + rename) every time a
//! new title is recorded. The file is written before the in-memory set is
//! updated, so a crash can never leave memory ahead of disk.

use crate::error::{Error, Result};
use crate::utils::ensure_writable_dir;
use itertools::Itertools;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Fixed key under which the seen list is stored.
pub const SEEN_KEY: &str = "seenArticles";

/// Set of seen titles with stable insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a stored sequence, keeping the first occurrence of
    /// each title.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = titles.into_iter().map(Into::into).unique().collect();
        let members = order.iter().cloned().collect();
        Self { order, members }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.members.contains(title)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Titles in insertion order.
    pub fn titles(&self) -> &[String] {
        &self.order
    }

    /// Add a title. Returns `false` if it was already present.
    fn insert(&mut self, title: String) -> bool {
        if self.members.contains(&title) {
            return false;
        }
        self.members.insert(title.clone());
        self.order.push(title);
        true
    }
}

/// Encode titles as the stored JSON array.
pub fn encode(titles: &[String]) -> Result<String> {
    Ok(serde_json::to_string(titles)?)
}

/// Decode a stored JSON array into a [`SeenSet`].
pub fn decode(raw: &str, path: &Path) -> Result<SeenSet> {
    let titles: Vec<String> = serde_json::from_str(raw).map_err(|e| Error::StoreCorrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(SeenSet::from_titles(titles))
}

fn store_path(dir: &Path) -> PathBuf {
    dir.join(format!("{SEEN_KEY}.json"))
}

/// Read the stored titles without creating or writing anything.
///
/// A missing directory or file yields an empty set.
pub async fn read_seen(dir: &Path) -> Result<SeenSet> {
    let path = store_path(dir);
    match fs::read_to_string(&path).await {
        Ok(raw) => {
            let seen = decode(&raw, &path)?;
            info!(count = seen.len(), "Loaded seen articles");
            Ok(seen)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No seen store yet; starting empty");
            Ok(SeenSet::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// File-backed owner of the [`SeenSet`].
#[derive(Debug)]
pub struct SeenStore {
    path: PathBuf,
    seen: SeenSet,
}

impl SeenStore {
    /// Load the store from `dir`, creating the directory if needed.
    ///
    /// A missing file yields an empty set; a file that is not a JSON string
    /// array yields [`Error::StoreCorrupt`].
    #[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
    pub async fn load(dir: &Path) -> Result<Self> {
        ensure_writable_dir(dir).await?;
        let seen = read_seen(dir).await?;
        Ok(Self {
            path: store_path(dir),
            seen,
        })
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `title` as seen and flush to disk.
    ///
    /// Returns `Ok(false)` without touching the file if the title is already
    /// recorded.
    #[instrument(level = "info", skip(self))]
    pub async fn record(&mut self, title: &str) -> Result<bool> {
        if self.seen.contains(title) {
            debug!("Title already recorded");
            return Ok(false);
        }

        let mut next = self.seen.titles().to_vec();
        next.push(title.to_string());
        self.flush(&next).await?;

        self.seen.insert(title.to_string());
        info!(count = self.seen.len(), "Recorded seen article");
        Ok(true)
    }

    async fn flush(&self, titles: &[String]) -> Result<()> {
        let json = encode(titles)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            warn!(path = %self.path.display(), error = %e, "Failed to replace seen store");
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
