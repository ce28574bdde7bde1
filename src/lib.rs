pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod page;
pub mod popup;
pub mod quotes;
pub mod reminder;
pub mod render;
pub mod replace;
pub mod scanner;
pub mod session;
pub mod store;

pub use error::{MotivadError, Result};
