// Startup announcement
// Prints which URL serves which root and optionally opens the browser,
// at most once per server no matter how often a build event fires.
// A quiet server skips both.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ServerConfig;
use crate::logger;

/// Something that can show a URL to the user
pub trait BrowserLauncher: Send + Sync {
    fn launch(&self, url: &str);
}

/// Opens URLs with the platform's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn launch(&self, url: &str) {
        if let Err(e) = open::that_detached(url) {
            logger::log_warning(&format!("Failed to open browser at {url}: {e}"));
        }
    }
}

/// Once-only banner and browser hook
pub struct Announcer {
    url: String,
    roots: Vec<PathBuf>,
    verbose: bool,
    open: bool,
    announced: AtomicBool,
    launcher: Box<dyn BrowserLauncher>,
}

impl Announcer {
    pub fn new(config: &ServerConfig, port: u16) -> Self {
        Self {
            url: format!("http://{}:{port}", config.host),
            roots: config.roots.clone(),
            verbose: config.verbose,
            open: config.open,
            announced: AtomicBool::new(false),
            launcher: Box::new(SystemBrowser),
        }
    }

    #[must_use]
    pub fn with_launcher(mut self, launcher: impl BrowserLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    /// Primary serving URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `(url, absolute root)` for every configured root, in priority order
    pub fn banner_lines(&self) -> Vec<(String, PathBuf)> {
        self.roots
            .iter()
            .map(|root| {
                let root = std::path::absolute(root).unwrap_or_else(|_| root.clone());
                (self.url.clone(), root)
            })
            .collect()
    }

    /// Build/generate hook. Only the first call has any effect, and with
    /// `verbose` off it does nothing at all (no banner, no browser).
    ///
    /// Returns whether this call performed the announcement.
    pub fn on_generate(&self) -> bool {
        if self
            .announced
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        if !self.verbose {
            return false;
        }

        let green = anstyle::Style::new()
            .bold()
            .fg_color(Some(anstyle::AnsiColor::Green.into()));
        for (url, root) in self.banner_lines() {
            anstream::println!("{green}{url}{green:#} -> {}", root.display());
        }

        if self.open {
            self.launcher.launch(&self.url);
        }

        true
    }
}
