//! Terminal rendering of candidates, languages, and the seen list.

use crate::models::{ArticleCandidate, Language};
use crate::store::SeenSet;
use std::fmt::Write;

/// Render the working list as numbered cards (1-based).
pub fn render_cards(articles: &[ArticleCandidate]) -> String {
    if articles.is_empty() {
        return "No articles. Press r to fetch a new list.\n".to_string();
    }
    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        // writeln! into a String cannot fail
        let _ = writeln!(
            out,
            "{:>2}. {:<50} 👀 {} min\n    {}  ({} bytes)",
            i + 1,
            article.title(),
            article.reading_time(),
            article.full_url(),
            article.length()
        );
    }
    out
}

/// Render the language picker options, marking the active one.
pub fn render_languages(active: Language) -> String {
    let mut out = String::new();
    for lang in Language::ALL {
        let marker = if lang == active { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<3} {:<8} {}", lang.code(), lang.label(), lang.flag_url());
    }
    out
}

pub fn render_seen(seen: &SeenSet) -> String {
    if seen.is_empty() {
        return "No articles seen yet.\n".to_string();
    }
    let mut out = String::new();
    for title in seen.titles() {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{} article(s) seen", seen.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cards_numbers_and_minutes() {
        let articles = vec![
            ArticleCandidate::new(1, "Foo", "https://en.wikipedia.org/wiki/Foo", 5000),
            ArticleCandidate::new(2, "Bar", "https://en.wikipedia.org/wiki/Bar", 12000),
        ];
        let out = render_cards(&articles);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(" 1. Foo"));
        assert!(lines[0].ends_with("👀 5 min"));
        assert_eq!(lines[1].trim(), "https://en.wikipedia.org/wiki/Foo  (5000 bytes)");
        assert!(lines[2].ends_with("👀 10 min"));
    }

    #[test]
    fn test_render_cards_empty() {
        assert!(render_cards(&[]).starts_with("No articles"));
    }

    #[test]
    fn test_render_languages_marks_active() {
        let out = render_languages(Language::Tr);
        assert!(out.lines().any(|l| l.starts_with("* tr")));
        assert!(out.lines().any(|l| l.starts_with("  en")));
    }

    #[test]
    fn test_render_seen_counts() {
        let seen = SeenSet::from_titles(["Foo", "Bar"]);
        let out = render_seen(&seen);
        assert!(out.ends_with("2 article(s) seen\n"));
        assert!(render_seen(&SeenSet::new()).starts_with("No articles seen"));
    }
}
