//! Interactive command loop on top of a [`Session`].
//!
//! ```text
//! <n>        open card n
//! r          fetch a fresh list
//! l <code>   switch language for the next fetch (en, tr)
//! ls         show the current cards again
//! h          help
//! q          quit
//! ```

use crate::api::RandomArticleSource;
use crate::error::{Error, Result};
use crate::models::Language;
use crate::navigator::Navigator;
use crate::outputs::cards::{render_cards, render_languages};
use crate::session::Session;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

const HELP: &str = "\
  <n>       open article n
  r         fetch a new list
  l <code>  switch language (en, tr)
  ls        show the list again
  h         help
  q         quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Open(usize),
    Refresh,
    Language(Language),
    List,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<ReplCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let cmd = match (head, arg) {
        ("q" | "quit" | "exit", None) => ReplCommand::Quit,
        ("r" | "refresh" | "start", None) => ReplCommand::Refresh,
        ("ls" | "list", None) => ReplCommand::List,
        ("h" | "help" | "?", None) => ReplCommand::Help,
        ("l" | "lang", Some(code)) => ReplCommand::Language(code.parse().map_err(|e: Error| e.to_string())?),
        ("l" | "lang", None) => return Err("usage: l <code>".to_string()),
        (n, None) => match n.parse::<usize>() {
            Ok(n) => ReplCommand::Open(n),
            Err(_) => return Err(format!("unknown command {n:?}, type h for help")),
        },
        (other, Some(_)) => return Err(format!("unexpected argument after {other:?}")),
    };
    if parts.next().is_some() {
        return Err("too many arguments".to_string());
    }
    Ok(Some(cmd))
}

/// Fetch a list, print it, and report a failure without ending the session.
async fn refresh<S, N, W>(session: &mut Session<S, N>, out: &mut W) -> Result<()>
where
    S: RandomArticleSource,
    N: Navigator,
    W: Write,
{
    writeln!(out, "Loading {} articles…", session.language().label())?;
    out.flush()?;
    match session.start().await {
        Ok(_) => write!(out, "{}", render_cards(session.working_list()))?,
        Err(e) => writeln!(out, "Could not fetch articles: {e}")?,
    }
    Ok(())
}

/// Run the loop until `q` or end of input.
///
/// A fresh list is fetched before the first prompt.
pub async fn run<S, N, R, W>(session: &mut Session<S, N>, input: R, out: &mut W) -> Result<()>
where
    S: RandomArticleSource,
    N: Navigator,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    refresh(session, out).await?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            debug!("Input closed");
            break;
        };

        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        match cmd {
            ReplCommand::Quit => break,
            ReplCommand::Help => write!(out, "{HELP}")?,
            ReplCommand::List => write!(out, "{}", render_cards(session.working_list()))?,
            ReplCommand::Refresh => refresh(session, out).await?,
            ReplCommand::Language(lang) => {
                session.set_language(lang);
                write!(out, "{}", render_languages(lang))?;
            }
            ReplCommand::Open(n) => match session.select_index(n).await {
                Ok(article) => {
                    writeln!(
                        out,
                        "Opened {} ({} min)\n    {}",
                        article.title(),
                        article.reading_time(),
                        article.full_url()
                    )?;
                    write!(out, "{}", render_cards(session.working_list()))?;
                }
                Err(Error::NotInWorkingList(_)) => writeln!(out, "No article #{n}")?,
                Err(e) => {
                    warn!(error = %e, "Selection failed");
                    writeln!(out, "Could not record selection: {e}")?;
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::AcquisitionSettings;
    use crate::acquisition::tests::{Scripted, ScriptedSource, long_batch};
    use crate::navigator::NoBrowser;
    use crate::store::SeenStore;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("3").unwrap(), Some(ReplCommand::Open(3)));
        assert_eq!(parse_command("  r ").unwrap(), Some(ReplCommand::Refresh));
        assert_eq!(parse_command("l tr").unwrap(), Some(ReplCommand::Language(Language::Tr)));
        assert_eq!(parse_command("q").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(parse_command("").unwrap(), None);
        assert!(parse_command("l").is_err());
        assert!(parse_command("l de").is_err());
        assert!(parse_command("jump").is_err());
        assert!(parse_command("r now").is_err());
        assert!(parse_command("l en tr").is_err());
    }

    #[tokio::test]
    async fn test_run_open_and_quit() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SeenStore::load(tmp.path()).await.unwrap();
        let mut session = Session::new(
            ScriptedSource::new(vec![long_batch(1, 10)]),
            NoBrowser,
            store,
            AcquisitionSettings::default(),
            Language::En,
        );

        let input: &[u8] = b"2\nl tr\n42\nq\n";
        let mut out = Vec::new();
        run(&mut session, input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Opened Article 2 (7 min)\n    https://en.wikipedia.org/wiki/Article_2\n"));
        assert!(text.contains("No article #42"));
        assert_eq!(session.working_list().len(), 9);
        assert_eq!(session.language(), Language::Tr);
        assert!(session.store().seen().contains("Article 2"));
    }

    #[tokio::test]
    async fn test_run_reports_fetch_failure_and_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SeenStore::load(tmp.path()).await.unwrap();
        let mut session = Session::new(
            ScriptedSource::new(vec![Scripted::Fail, long_batch(1, 10)]),
            NoBrowser,
            store,
            AcquisitionSettings::default(),
            Language::En,
        );

        let input: &[u8] = b"ls\nr\n";
        let mut out = Vec::new();
        run(&mut session, input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Could not fetch articles"));
        assert!(text.contains("No articles."));
        assert_eq!(session.working_list().len(), 10);
    }
}
