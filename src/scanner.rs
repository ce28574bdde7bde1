//! Periodic ad scanning: one pass at start, then one per interval

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{MotivadError, Result};
use crate::fetch::{self, PageSource};
use crate::page::HtmlPage;
use crate::replace::{AdReplacer, ReplaceReport};
use crate::session::Session;
use crate::store::ReminderSource;

/// Default scan period in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// How often the loop checks for shutdown while waiting
const POLL_STEP: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub interval: Duration,
    /// Stop after this many passes (None = until interrupted)
    pub max_passes: Option<usize>,
    /// Day to treat as today (None = the local date at each pass)
    pub today: Option<NaiveDate>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_passes: None,
            today: None,
        }
    }
}

/// Output of one pass
#[derive(Debug)]
pub struct PassResult {
    /// 1-based
    pub pass: usize,
    pub report: ReplaceReport,
    /// The page after replacement
    pub html: String,
}

/// Fail unless `source` can be loaded again on every pass
pub fn ensure_rescannable(source: &PageSource) -> Result<()> {
    if source.is_repeatable() {
        Ok(())
    } else {
        Err(MotivadError::SourceNotRepeatable(source.describe()))
    }
}

/// Re-reads a page and replaces its ads on a fixed period.
///
/// The session lives as long as the scanner, so a reminder shown in one pass
/// is not shown again in a later one. Passes never overlap: a slow pass
/// delays the next.
pub struct Scanner<'a> {
    source: PageSource,
    replacer: AdReplacer,
    session: Session,
    reminders: &'a dyn ReminderSource,
    passes: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(
        source: PageSource,
        replacer: AdReplacer,
        session: Session,
        reminders: &'a dyn ReminderSource,
    ) -> Self {
        Self {
            source,
            replacer,
            session,
            reminders,
            passes: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load the page and replace its ads once
    pub fn run_pass(&mut self, today: NaiveDate) -> Result<PassResult> {
        let html = fetch::load_page(&self.source)?;
        let mut page = HtmlPage::parse(&html);
        let report = self
            .replacer
            .replace_ads(&mut page, &mut self.session, self.reminders, today);

        self.passes += 1;
        Ok(PassResult {
            pass: self.passes,
            report,
            html: page.to_html(),
        })
    }

    /// Run passes until `running` is cleared or `max_passes` is reached.
    ///
    /// A pass that cannot load the page is logged and retried next tick.
    /// Returns the number of completed passes. Sources that can only be read
    /// once (stdin) are rejected before the first pass.
    pub fn run<F>(&mut self, options: &ScanOptions, running: &AtomicBool, mut on_pass: F) -> Result<usize>
    where
        F: FnMut(&PassResult) -> Result<()>,
    {
        ensure_rescannable(&self.source)?;
        info!(source = %self.source.describe(), interval_secs = options.interval.as_secs(), "scanner starting");
        let mut attempts = 0usize;

        while running.load(Ordering::SeqCst) {
            if options.max_passes.is_some_and(|max| attempts >= max) {
                break;
            }
            attempts += 1;

            let started = Instant::now();
            let today = options.today.unwrap_or_else(|| Local::now().date_naive());
            match self.run_pass(today) {
                Ok(result) => on_pass(&result)?,
                Err(e) => warn!(source = %self.source.describe(), error = %e, "scan pass failed"),
            }

            if options.max_passes.is_some_and(|max| attempts >= max) {
                break;
            }

            let next_due = started + options.interval;
            while running.load(Ordering::SeqCst) && Instant::now() < next_due {
                std::thread::sleep(POLL_STEP.min(next_due.saturating_duration_since(Instant::now())));
            }
        }

        info!(passes = self.passes, "scanner stopped");
        Ok(self.passes)
    }
}
