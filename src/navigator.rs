//! Opening a chosen article outside the terminal.

use crate::error::{Error, Result};
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Something that can take the user to a URL.
pub trait Navigator {
    fn open(&self, url: &str) -> Result<()>;
}

/// Hands the URL to the platform's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Navigator for SystemBrowser {
    #[instrument(level = "debug", skip(self))]
    fn open(&self, url: &str) -> Result<()> {
        Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        debug!("Launched browser");
        Ok(())
    }
}

/// Launches nothing (`--no-open`); the caller shows the URL to the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBrowser;

impl Navigator for NoBrowser {
    fn open(&self, url: &str) -> Result<()> {
        debug!(%url, "Browser launch disabled");
        Ok(())
    }
}

/// Runtime choice between the two navigators.
#[derive(Debug, Clone, Copy)]
pub enum AnyNavigator {
    Browser(SystemBrowser),
    Disabled(NoBrowser),
}

impl AnyNavigator {
    pub fn new(open_in_browser: bool) -> Self {
        if open_in_browser {
            AnyNavigator::Browser(SystemBrowser)
        } else {
            AnyNavigator::Disabled(NoBrowser)
        }
    }
}

impl Navigator for AnyNavigator {
    fn open(&self, url: &str) -> Result<()> {
        match self {
            AnyNavigator::Browser(b) => b.open(url),
            AnyNavigator::Disabled(n) => n.open(url),
        }
    }
}
