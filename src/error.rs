use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotivadError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid selector '{selector}': {reason}")]
    SelectorError { selector: String, reason: String },

    #[error("Element is no longer attached to the document")]
    Detached,

    #[error("Quote loading failed: {0}")]
    QuoteLoadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0} can only be read once and cannot be re-scanned")]
    SourceNotRepeatable(String),
}

impl MotivadError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MotivadError::HttpError(_) => Some(
                "Check your internet connection, or save the page and pass the file path instead"
            ),
            MotivadError::DatabaseError(_) | MotivadError::MigrationError(_) => Some(
                "Check the storage path with `motivad config show` (override it with MOTIVAD_DB)"
            ),
            MotivadError::SelectorError { .. } => Some(
                "Fix or remove the entry in `extra_selectors` of your config file"
            ),
            MotivadError::TomlError(_) | MotivadError::ConfigError(_) => Some(
                "Run `motivad config show` to see which file is being read, or `motivad config init` to reset it"
            ),
            MotivadError::SourceNotRepeatable(_) => Some(
                "Save the page to a file and pass its path, or drop --watch to clean it once"
            ),
            MotivadError::QuoteLoadError(_) => Some(
                "Check that `quotes_path` points to a JSON array of {content, author, tag} objects"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MotivadError>;
