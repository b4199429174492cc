//! Interactive discovery state: working list, language, seen store.
//!
//! A [`Session`] owns everything that changes while the user browses:
//!
//! - the **working list** of candidates currently on offer
//! - the active **language** for the next fetch
//! - the **seen store**, mutated only by [`Session::select`]
//!
//! Fetching and selecting take `&mut self`, so a second fetch can never start
//! while one is in flight. Dropping an unfinished [`Session::start`] leaves the
//! previous working list in place and the session ready for the next call.

use crate::acquisition::{AcquisitionSettings, acquire};
use crate::api::RandomArticleSource;
use crate::error::{Error, Result};
use crate::models::{ArticleCandidate, Language};
use crate::navigator::Navigator;
use crate::store::SeenStore;
use tracing::{error, info, instrument, warn};

pub struct Session<S, N> {
    source: S,
    navigator: N,
    store: SeenStore,
    settings: AcquisitionSettings,
    language: Language,
    working_list: Vec<ArticleCandidate>,
}

impl<S, N> Session<S, N>
where
    S: RandomArticleSource,
    N: Navigator,
{
    pub fn new(
        source: S,
        navigator: N,
        store: SeenStore,
        settings: AcquisitionSettings,
        language: Language,
    ) -> Self {
        Self {
            source,
            navigator,
            store,
            settings,
            language,
            working_list: Vec::new(),
        }
    }

    pub fn working_list(&self) -> &[ArticleCandidate] {
        &self.working_list
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn store(&self) -> &SeenStore {
        &self.store
    }

    /// Change the language used by the next [`Session::start`].
    ///
    /// The current working list is left as it is.
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            info!(from = %self.language, to = %language, "Language changed");
        }
        self.language = language;
    }

    /// Fetch a fresh working list.
    ///
    /// On success the new list replaces the old one. On failure the error is
    /// logged and returned and the previous list stays in place.
    #[instrument(level = "info", skip(self), fields(lang = %self.language))]
    pub async fn start(&mut self) -> Result<usize> {
        let outcome = acquire(
            &self.source,
            self.language,
            self.store.seen(),
            &self.settings,
        )
        .await;

        match outcome {
            Ok(articles) => {
                let count = articles.len();
                self.working_list = articles;
                info!(count, "Working list replaced");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Error fetching articles");
                Err(e)
            }
        }
    }

    /// Open the candidate titled `title`, remember it, and drop it from the list.
    #[instrument(level = "info", skip(self))]
    pub async fn select(&mut self, title: &str) -> Result<ArticleCandidate> {
        let Some(chosen) = self
            .working_list
            .iter()
            .find(|c| c.title() == title)
            .cloned()
        else {
            return Err(Error::NotInWorkingList(title.to_string()));
        };

        if let Err(e) = self.navigator.open(chosen.full_url()) {
            warn!(error = %e, "Could not open article; still marking it as seen");
        }

        self.store.record(chosen.title()).await?;
        self.working_list.retain(|c| c.title() != chosen.title());
        info!(remaining = self.working_list.len(), "Article selected");
        Ok(chosen)
    }

    /// Same as [`Session::select`], addressing the card by its 1-based number.
    pub async fn select_index(&mut self, number: usize) -> Result<ArticleCandidate> {
        let title = number
            .checked_sub(1)
            .and_then(|i| self.working_list.get(i))
            .map(|c| c.title().to_string())
            .ok_or_else(|| Error::NotInWorkingList(format!("#{number}")))?;
        self.select(&title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::tests::{Scripted, ScriptedSource, long_batch, page};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Navigator for &RecordingNavigator {
        fn open(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                return Err(Error::Navigation {
                    url: url.to_string(),
                    reason: "no display".to_string(),
                });
            }
            Ok(())
        }
    }

    async fn session_with<'a>(
        script: Vec<Scripted>,
        nav: &'a RecordingNavigator,
        dir: &std::path::Path,
    ) -> Session<ScriptedSource, &'a RecordingNavigator> {
        let store = SeenStore::load(dir).await.unwrap();
        Session::new(
            ScriptedSource::new(script),
            nav,
            store,
            AcquisitionSettings::default(),
            Language::En,
        )
    }

    #[tokio::test]
    async fn test_start_fills_working_list() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(vec![long_batch(1, 10)], &nav, tmp.path()).await;

        assert_eq!(session.start().await.unwrap(), 10);
        assert_eq!(session.working_list().len(), 10);
    }

    #[tokio::test]
    async fn test_select_updates_seen_and_list() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(vec![long_batch(1, 10)], &nav, tmp.path()).await;
        session.start().await.unwrap();

        let others: Vec<String> = session
            .working_list()
            .iter()
            .filter(|c| c.title() != "Article 4")
            .map(|c| c.title().to_string())
            .collect();

        let chosen = session.select("Article 4").await.unwrap();
        assert_eq!(chosen.page_id(), 4);
        assert_eq!(
            nav.opened.lock().unwrap().as_slice(),
            &["https://en.wikipedia.org/wiki/Article_4"]
        );
        assert_eq!(session.store().seen().len(), 1);
        assert!(session.store().seen().contains("Article 4"));

        let remaining: Vec<String> = session
            .working_list()
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(remaining, others);

        let reloaded = SeenStore::load(tmp.path()).await.unwrap();
        assert_eq!(reloaded.seen().titles(), &["Article 4"]);
    }

    #[tokio::test]
    async fn test_select_unknown_title_changes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(vec![long_batch(1, 10)], &nav, tmp.path()).await;
        session.start().await.unwrap();

        let err = session.select("Nope").await.unwrap_err();
        assert!(matches!(err, Error::NotInWorkingList(_)));
        assert_eq!(session.working_list().len(), 10);
        assert!(session.store().seen().is_empty());
        assert!(nav.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_index_is_one_based() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(vec![long_batch(1, 10)], &nav, tmp.path()).await;
        session.start().await.unwrap();

        let chosen = session.select_index(1).await.unwrap();
        assert_eq!(chosen.title(), "Article 1");
        assert!(session.select_index(0).await.is_err());
        assert!(session.select_index(10).await.is_err());
        assert_eq!(session.working_list().len(), 9);
    }

    #[tokio::test]
    async fn test_navigation_failure_still_records() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator {
            fail: true,
            ..Default::default()
        };
        let mut session = session_with(vec![long_batch(1, 10)], &nav, tmp.path()).await;
        session.start().await.unwrap();

        session.select("Article 2").await.unwrap();
        assert!(session.store().seen().contains("Article 2"));
        assert_eq!(session.working_list().len(), 9);
    }

    #[tokio::test]
    async fn test_language_change_keeps_list_until_next_start() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session =
            session_with(vec![long_batch(1, 10), long_batch(100, 10)], &nav, tmp.path()).await;
        session.start().await.unwrap();
        let before = session.working_list().to_vec();

        session.set_language(Language::Tr);
        assert_eq!(session.language(), Language::Tr);
        assert_eq!(session.working_list(), before.as_slice());

        session.start().await.unwrap();
        assert_eq!(session.working_list()[0].page_id(), 100);
        assert_eq!(
            session.source.calls.lock().unwrap().as_slice(),
            &[Language::En, Language::Tr]
        );
    }

    #[tokio::test]
    async fn test_failed_start_keeps_previous_list() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session =
            session_with(vec![long_batch(1, 10), Scripted::Fail], &nav, tmp.path()).await;
        session.start().await.unwrap();
        let before = session.working_list().to_vec();

        assert!(session.start().await.is_err());
        assert_eq!(session.working_list(), before.as_slice());
    }

    #[tokio::test]
    async fn test_seen_titles_excluded_from_next_start() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(
            vec![
                Scripted::Pages(vec![page(1, "Foo", 6000)]),
                long_batch(10, 9),
                Scripted::Pages(vec![page(1, "Foo", 6000)]),
                long_batch(20, 10),
            ],
            &nav,
            tmp.path(),
        )
        .await;

        session.start().await.unwrap();
        session.select("Foo").await.unwrap();
        session.start().await.unwrap();

        assert!(session.working_list().iter().all(|c| c.title() != "Foo"));
        assert_eq!(session.working_list().len(), 10);
    }

    #[tokio::test]
    async fn test_abandoned_start_leaves_session_usable() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(
            vec![long_batch(1, 10), Scripted::Hang, long_batch(20, 10)],
            &nav,
            tmp.path(),
        )
        .await;
        session.start().await.unwrap();
        let before = session.working_list().to_vec();

        let abandoned = tokio::time::timeout(Duration::from_millis(20), session.start()).await;
        assert!(abandoned.is_err());
        assert_eq!(session.working_list(), before.as_slice());

        assert_eq!(session.start().await.unwrap(), 10);
        assert_eq!(session.working_list()[0].page_id(), 20);
    }

    #[tokio::test]
    async fn test_select_repeated_title_shrinks_list_by_one() {
        let tmp = tempfile::tempdir().unwrap();
        let nav = RecordingNavigator::default();
        let mut session = session_with(
            vec![
                long_batch(1, 5),
                Scripted::Pages(vec![page(1, "Article 1", 8000)]),
                long_batch(10, 5),
            ],
            &nav,
            tmp.path(),
        )
        .await;
        session.start().await.unwrap();
        assert_eq!(session.working_list().len(), 10);

        session.select("Article 1").await.unwrap();
        assert_eq!(session.working_list().len(), 9);
        assert_eq!(session.store().seen().len(), 1);
    }
}
