use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::Result;

/// Default HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});

/// Where a page's HTML comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    File(PathBuf),
    Url(String),
    Stdin,
}

impl PageSource {
    /// `-` reads stdin, anything with an http(s) scheme is fetched, the rest is a path
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input == "-" {
            return Ok(Self::Stdin);
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            url::Url::parse(input)?;
            return Ok(Self::Url(input.to_string()));
        }
        Ok(Self::File(PathBuf::from(input)))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }

    /// Whether loading again yields the page again (stdin is drained by the first read)
    pub fn is_repeatable(&self) -> bool {
        !matches!(self, Self::Stdin)
    }
}

/// Read the current HTML of a page
pub fn load_page(source: &PageSource) -> Result<String> {
    debug!(source = %source.describe(), "loading page");
    match source {
        PageSource::File(path) => Ok(std::fs::read_to_string(path)?),
        PageSource::Url(url) => fetch_text(url),
        PageSource::Stdin => {
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

/// GET a URL and return the body as text
pub fn fetch_text(url: &str) -> Result<String> {
    let request = HTTP_AGENT.get(url).header(
        "User-Agent",
        concat!("Mozilla/5.0 (compatible; motivad/", env!("CARGO_PKG_VERSION"), ")"),
    );

    let response = request.call()?;
    let body = response.into_body().read_to_string()?;
    Ok(body)
}
