//! JSON export of the working list.
//!
//! Used by `discover --json-out FILE` to hand a freshly acquired list to
//! other tools:
//!
//! ```json
//! {"language":"en","articles":[{"page_id":1,"title":"Foo", ...}]}
//! ```

use crate::error::Result;
use crate::models::{ArticleCandidate, Language};
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct WorkingListExport<'a> {
    pub language: Language,
    pub articles: &'a [ArticleCandidate],
}

/// Write the working list to `path` as pretty-printed JSON.
///
/// Parent directories are created as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_working_list(
    language: Language,
    articles: &[ArticleCandidate],
    path: &Path,
) -> Result<()> {
    let json = serde_json::to_string_pretty(&WorkingListExport { language, articles })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;
    info!(count = articles.len(), "Wrote working list JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_working_list() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out").join("list.json");
        let articles = vec![ArticleCandidate::new(9, "Foo", "https://tr.wikipedia.org/wiki/Foo", 7300)];

        write_working_list(Language::Tr, &articles, &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["language"], "tr");
        assert_eq!(value["articles"][0]["title"], "Foo");
        assert_eq!(value["articles"][0]["reading_time"], 7);
    }
}
