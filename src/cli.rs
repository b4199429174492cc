//! Command-line interface definitions.
//!
//! Every flag here is optional and overrides the corresponding key in
//! `config.yaml`. The language and store directory may also come from the
//! environment.

use crate::config::Overrides;
use crate::models::Language;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Discover random, long-form Wikipedia articles you have not read yet.
///
/// # Examples
///
/// ```sh
/// # Interactive session in English
/// wiki_discover discover
///
/// # Turkish articles of at least 8 KB, give up after 100 requests
/// wiki_discover discover --lang tr --min-length 8000 --max-attempts 100
///
/// # One-shot export for scripting
/// wiki_discover discover --json-out ./list.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding seenArticles.json
    #[arg(long, global = true, env = "WIKI_DISCOVER_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a list of articles and pick from it interactively
    Discover(DiscoverArgs),
    /// Print the titles already opened
    Seen,
    /// Print the available languages
    Languages,
}

#[derive(Args, Debug, Default)]
pub struct DiscoverArgs {
    /// Wikipedia edition to read (en, tr)
    #[arg(short, long, env = "WIKI_DISCOVER_LANG", value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Number of articles per list
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Minimum article size in bytes
    #[arg(long)]
    pub min_length: Option<u64>,

    /// Random pages requested per API call
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Stop after this many API calls instead of searching indefinitely
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Print article URLs instead of opening a browser
    #[arg(long)]
    pub no_open: bool,

    /// Write the fetched list to this JSON file and exit
    #[arg(long)]
    pub json_out: Option<PathBuf>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse::<Language>().map_err(|e| e.to_string())
}

impl Cli {
    /// Command-line values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            store_dir: self.store_dir.clone(),
            ..Overrides::default()
        };
        if let Command::Discover(args) = &self.command {
            overrides.language = args.lang;
            overrides.desired_count = args.count;
            overrides.min_length = args.min_length;
            overrides.batch_size = args.batch_size;
            overrides.max_attempts = args.max_attempts;
            overrides.no_open = args.no_open;
        }
        overrides
    }
}
