//! Reminder commands: add, list, today

use colored::Colorize;

use motivad::config::Config;
use motivad::error::Result;
use motivad::popup::Popup;
use motivad::reminder::{self, ProcessedSet};
use motivad::store::{ReminderStore, SqliteKv};

use crate::utils::resolve_today;

/// Open the reminder list in the configured storage
pub fn open_store(config: &Config) -> Result<ReminderStore<SqliteKv>> {
    Ok(ReminderStore::with_key(SqliteKv::open()?, config.storage_key.clone()))
}

/// Save a reminder through the popup flow
pub fn cmd_remind_add(text: &str, time: &str) -> Result<()> {
    let config = Config::load()?;
    let mut popup = Popup::open(open_store(&config)?)?;
    popup.text_input = text.to_string();
    popup.time_input = time.to_string();

    let Some(saved) = popup.save()? else {
        println!("\nNothing saved: both text and time are required.");
        return Ok(());
    };

    println!("\nReminder saved!");
    println!("  {}", saved.line());
    if saved.scheduled_at().is_none() {
        println!(
            "  {}",
            "Note: the time isn't a recognizable date, so it will never replace an ad.".yellow()
        );
    }

    Ok(())
}

/// List all reminders
pub fn cmd_remind_list(json: bool, html: bool) -> Result<()> {
    let config = Config::load()?;
    let popup = Popup::open(open_store(&config)?)?;

    if html {
        println!("{}", popup.list_html());
        return Ok(());
    }

    let reminders = popup.store().list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }

    if reminders.is_empty() {
        println!("\nNo reminders saved.");
        println!("Create one with: motivad remind add \"message\" --time 2024-06-01T15:00");
        return Ok(());
    }

    println!("\nReminders ({}):\n", reminders.len());
    for r in &reminders {
        println!("  {}", r.line());
    }
    println!();

    Ok(())
}

/// Show today's reminders in the order pages would receive them
pub fn cmd_remind_today(today: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let today = resolve_today(today.as_deref())?;
    let all = open_store(&config)?.list()?;

    let mut processed = ProcessedSet::new();
    let mut due = Vec::new();
    while let Some(r) = reminder::select_reminder(&all, today, &mut processed) {
        due.push(r);
    }

    if due.is_empty() {
        println!("\nNothing scheduled for {}. Ads will get quotes.", today);
        return Ok(());
    }

    println!("\nScheduled for {} ({}):\n", today, due.len());
    for r in &due {
        println!("  {}", r.line().green());
    }
    println!();

    Ok(())
}
