//! Motivational quotes: the bundled list and the per-session quote book

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{MotivadError, Result};
use crate::fetch;

/// Quotes compiled into the binary
pub const BUNDLED_QUOTES: &str = include_str!("../assets/quotes.json");

/// A motivational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub tag: String,
}

impl Quote {
    /// The quote that is always available, even when loading fails
    pub fn fallback() -> Self {
        Self {
            content: "Stay focused and never give up.".to_string(),
            author: "Unknown".to_string(),
            tag: "motivation".to_string(),
        }
    }

    /// Display form: `"<content>" - <author>`
    pub fn display(&self) -> String {
        format!("\"{}\" - {}", self.content, self.author)
    }
}

/// Where quotes are loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl QuoteSource {
    /// Interpret a configured `quotes_path` (None means the bundled list)
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            None | Some("") => Self::Bundled,
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
                Self::Url(s.to_string())
            }
            Some(s) => Self::File(PathBuf::from(s)),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::Bundled => Ok(BUNDLED_QUOTES.to_string()),
            Self::File(path) => Ok(std::fs::read_to_string(path)?),
            Self::Url(url) => fetch::fetch_text(url),
        }
    }
}

/// Parse a JSON array of quotes
pub fn parse_quotes(json: &str) -> Result<Vec<Quote>> {
    let quotes: Vec<Quote> = serde_json::from_str(json)?;
    if quotes.iter().any(|q| q.content.trim().is_empty()) {
        return Err(MotivadError::QuoteLoadError("quote with empty content".into()));
    }
    Ok(quotes)
}

/// Quotes available to one session: the fallback plus at most one loaded batch
#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    loaded: bool,
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self {
            quotes: vec![Quote::fallback()],
            loaded: false,
        }
    }
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append quotes from `source`. Returns how many were added.
    ///
    /// Only the first successful load takes effect; later calls return 0.
    /// Read and parse failures are logged and leave the book unchanged.
    pub fn load(&mut self, source: &QuoteSource) -> usize {
        if self.loaded {
            debug!(?source, "quotes already loaded for this session");
            return 0;
        }

        match source.read().and_then(|json| parse_quotes(&json)) {
            Ok(quotes) => {
                let added = quotes.len();
                self.quotes.extend(quotes);
                self.loaded = true;
                info!(?source, added, "loaded quotes");
                added
            }
            Err(e) => {
                warn!(?source, error = %e, "failed to load quotes, using fallback");
                0
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }

    /// Uniformly random quote (the book is never empty)
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> &Quote {
        self.quotes.choose(rng).unwrap_or(&self.quotes[0])
    }
}
