//! Page commands: clean (replace ads), scan (list ads)

use chrono::Local;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use motivad::config::Config;
use motivad::error::{MotivadError, Result};
use motivad::fetch::{self, PageSource};
use motivad::page::HtmlPage;
use motivad::quotes::QuoteSource;
use motivad::replace::{AdReplacer, NudgeKind};
use motivad::scanner::{ensure_rescannable, PassResult, ScanOptions, Scanner};
use motivad::session::Session;

use crate::commands::open_store;
use crate::utils::{format_interval, parse_interval_str, resolve_today, truncate_str, MIN_INTERVAL_SECS};

/// Replace ads in a page once, or keep re-scanning it
#[allow(clippy::too_many_arguments)]
pub fn cmd_clean(
    source: &str,
    out: Option<String>,
    watch: bool,
    interval: Option<String>,
    passes: Option<usize>,
    today: Option<String>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let source = PageSource::parse(source)?;
    if watch {
        ensure_rescannable(&source)?;
    }
    let replacer = AdReplacer::with_extra_selectors(&config.extra_selectors)?;
    let store = open_store(&config)?;
    let fixed_today = match today {
        Some(ref d) => Some(resolve_today(Some(d))?),
        None => None,
    };

    // Session start: quotes are loaded once and kept for every pass
    let session = Session::start(&QuoteSource::from_setting(config.quotes_path.as_deref()), seed);
    let description = source.describe();
    let mut scanner = Scanner::new(source, replacer, session, &store);

    if !watch {
        let result = scanner.run_pass(fixed_today.unwrap_or_else(|| Local::now().date_naive()))?;
        return emit_pass(&result, out.as_deref(), json);
    }

    let interval_secs = match interval {
        Some(ref s) => parse_interval_str(s)?,
        None => config.scan_interval_secs.max(MIN_INTERVAL_SECS),
    };
    let options = ScanOptions {
        interval: Duration::from_secs(interval_secs),
        max_passes: passes,
        today: fixed_today,
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| MotivadError::ConfigError(format!("Failed to set Ctrl+C handler: {}", e)))?;

    if !json {
        println!(
            "\nWatching {} every {}. Press Ctrl+C to stop.\n",
            description.bold(),
            format_interval(interval_secs)
        );
    }

    let completed = scanner.run(&options, &running, |result| {
        emit_pass(result, out.as_deref(), json)
    })?;

    if !json {
        println!("\nStopped after {} pass(es).", completed);
    }
    Ok(())
}

fn emit_pass(result: &PassResult, out: Option<&str>, json: bool) -> Result<()> {
    if let Some(path) = out {
        std::fs::write(path, &result.html)?;
    }

    if json {
        let value = serde_json::json!({
            "pass": result.pass,
            "report": result.report,
        });
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    if out.is_none() {
        // The page owns stdout; keep the summary out of it
        println!("{}", result.html);
        eprintln!("{}", summary_line(result));
        return Ok(());
    }

    println!("{}", summary_line(result));
    for r in &result.report.replaced {
        let kind = match r.kind {
            NudgeKind::Reminder => "reminder".green(),
            NudgeKind::Quote => "quote".dimmed(),
        };
        println!("  {} [{}] {}", r.element.describe(), kind, truncate_str(&r.text, 70));
    }
    Ok(())
}

fn summary_line(result: &PassResult) -> String {
    let report = &result.report;
    format!(
        "Pass {}: {} replaced ({} reminder(s)), {} skipped, {} failed",
        result.pass,
        report.replaced.len(),
        report.reminders_shown(),
        report.skipped,
        report.failed
    )
}

/// List ad-like elements without replacing them
pub fn cmd_scan(source: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let source = PageSource::parse(source)?;
    let replacer = AdReplacer::with_extra_selectors(&config.extra_selectors)?;
    let page = HtmlPage::parse(&fetch::load_page(&source)?);
    let matches = replacer.find_ads(&page);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("\nNo ads found in {}.", source.describe());
        return Ok(());
    }

    println!("\nAds in {} ({}):\n", source.describe(), matches.len());
    for m in &matches {
        let src = m
            .element
            .src
            .as_deref()
            .map(|s| format!(" src={}", truncate_str(s, 50)))
            .unwrap_or_default();
        println!("  {:<22} {}{}", m.selector.dimmed(), m.element.describe(), src);
    }
    println!();

    Ok(())
}
