//! Per-page-load state: quotes, shown reminders, randomness

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quotes::{Quote, QuoteBook, QuoteSource};
use crate::reminder::{self, ProcessedSet, Reminder};

/// State that lives for one page load (one CLI run or scanner lifetime).
///
/// Dropping the session forgets which reminders were shown.
#[derive(Debug)]
pub struct Session {
    quotes: QuoteBook,
    processed: ProcessedSet,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Session with reproducible quote picks
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            quotes: QuoteBook::new(),
            processed: ProcessedSet::new(),
            rng,
        }
    }

    /// Session start: create and load quotes from `source`
    pub fn start(source: &QuoteSource, seed: Option<u64>) -> Self {
        let mut session = match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        session.load_quotes(source);
        session
    }

    pub fn load_quotes(&mut self, source: &QuoteSource) -> usize {
        self.quotes.load(source)
    }

    pub fn quotes(&self) -> &QuoteBook {
        &self.quotes
    }

    pub fn processed(&self) -> &ProcessedSet {
        &self.processed
    }

    pub fn select_reminder(&mut self, all: &[Reminder], today: NaiveDate) -> Option<Reminder> {
        reminder::select_reminder(all, today, &mut self.processed)
    }

    pub fn random_quote(&mut self) -> Quote {
        self.quotes.random(&mut self.rng).clone()
    }
}
