//! # wiki_discover
//!
//! Surfaces random Wikipedia articles that are long enough to be worth a sit-down
//! read and that you have not opened before.
//!
//! ## Usage
//!
//! ```sh
//! wiki_discover discover --lang tr
//! ```
//!
//! ## Architecture
//!
//! 1. **Acquisition**: pull random batches from the MediaWiki API until ten
//!    unseen articles of at least 5000 bytes have been collected
//! 2. **Presentation**: print them as numbered cards with a reading-time estimate
//! 3. **Selection**: open the chosen article, remember its title in
//!    `seenArticles.json`, and drop it from the list

use clap::Parser;
use std::error::Error;
use tokio::io::BufReader;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod acquisition;
mod api;
mod cli;
mod config;
mod error;
mod models;
mod navigator;
mod outputs;
mod repl;
mod session;
mod store;
mod utils;

use api::WikipediaApi;
use cli::{Cli, Command};
use config::{Settings, load_config};
use navigator::AnyNavigator;
use outputs::{cards, json};
use session::Session;
use store::SeenStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = load_config(args.config.as_deref()).await?;
    let settings = Settings::resolve(file_config, args.overrides())?;
    debug!(?settings, "Resolved settings");

    match args.command {
        Command::Languages => {
            print!("{}", cards::render_languages(settings.language));
        }
        Command::Seen => {
            let seen = store::read_seen(&settings.store_dir).await?;
            print!("{}", cards::render_seen(&seen));
        }
        Command::Discover(discover) => {
            let store = match SeenStore::load(&settings.store_dir).await {
                Ok(store) => {
                    debug!(path = %store.path().display(), "Seen store ready");
                    store
                }
                Err(e) => {
                    error!(path = %settings.store_dir.display(), error = %e, "Cannot open seen store");
                    return Err(e.into());
                }
            };
            let api = WikipediaApi::new(
                settings.api_endpoint.clone(),
                settings.batch_size,
                settings.request_timeout,
            )?;
            let navigator = AnyNavigator::new(settings.open_in_browser);
            let mut session = Session::new(
                api,
                navigator,
                store,
                settings.acquisition.clone(),
                settings.language,
            );

            if let Some(path) = discover.json_out {
                session.start().await?;
                json::write_working_list(session.language(), session.working_list(), &path).await?;
            } else {
                let stdin = BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();
                repl::run(&mut session, stdin, &mut stdout).await?;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
