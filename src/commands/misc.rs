//! Miscellaneous commands: quotes, config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use motivad::cli::{Cli, CompletionShell};
use motivad::config::Config;
use motivad::error::Result;
use motivad::quotes::QuoteSource;
use motivad::replace::AdReplacer;
use motivad::session::Session;

/// Show the quotes a session would use
pub fn cmd_quotes(random: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::start(&QuoteSource::from_setting(config.quotes_path.as_deref()), None);

    if random {
        let quote = session.random_quote();
        if json {
            println!("{}", serde_json::to_string_pretty(&quote)?);
        } else {
            println!("{}", quote.display());
        }
        return Ok(());
    }

    let quotes = session.quotes().all();
    if json {
        println!("{}", serde_json::to_string_pretty(quotes)?);
        return Ok(());
    }

    println!("\nQuotes ({}):\n", quotes.len());
    for q in quotes {
        let tag = if q.tag.is_empty() { String::new() } else { format!(" [{}]", q.tag) };
        println!("  {}{}", q.display(), tag.dimmed());
    }
    println!();

    Ok(())
}

/// Print the effective configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let db_path = Config::db_path()?;

    println!("\n{}", "Files".bold());
    let status = if config_path.exists() { "" } else { " (not created, using defaults)" };
    println!("  Config:   {}{}", config_path.display(), status.dimmed());
    println!("  Storage:  {}", db_path.display());

    println!("\n{}", "Settings".bold());
    println!("  Scan interval: {}s", config.scan_interval_secs);
    println!("  Storage key:   {}", config.storage_key);
    println!(
        "  Quotes:        {}",
        config.quotes_path.as_deref().unwrap_or("bundled")
    );

    // Validates extra selectors as a side effect
    let replacer = AdReplacer::with_extra_selectors(&config.extra_selectors)?;
    println!("\n{}", "Ad selectors".bold());
    for s in replacer.selectors() {
        println!("  {}", s);
    }
    println!();

    Ok(())
}

/// Write the default configuration
pub fn cmd_config_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        println!("\nConfig already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    Config::default().save()?;
    println!("\nWrote default config to {}", path.display());
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "motivad", &mut io::stdout());
    Ok(())
}
