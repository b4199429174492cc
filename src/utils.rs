//! Small helpers shared across modules.
//!
//! - Reading-time estimation from an article's byte length
//! - String truncation for logging
//! - File system validation for the store directory

use crate::error::Result;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Bytes of wikitext assumed to take one minute to read.
pub const BYTES_PER_MINUTE: u64 = 1200;

/// Estimate reading time in whole minutes: `ceil(length / 1200)`.
///
/// The result is at least one minute, so a candidate always shows a positive
/// estimate even when the length filter is configured down to zero.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(reading_time_minutes(5000), 5);
/// assert_eq!(reading_time_minutes(1200), 1);
/// ```
pub fn reading_time_minutes(length: u64) -> u64 {
    length.div_ceil(BYTES_PER_MINUTE).max(1)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a marker file.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await?;
    let marker_path = path.join("..__write_check__");
    stdfs::File::create(&marker_path)?;
    let _ = stdfs::remove_file(&marker_path);
    info!("Store directory is writable");
    Ok(())
}
