//! Reminder records and today's-reminder selection

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// A user-entered note scheduled for a date and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub text: String,
    /// Timestamp as entered, usually `YYYY-MM-DDTHH:MM`
    pub time: String,
}

impl Reminder {
    pub fn new(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            time: time.into(),
        }
    }

    /// Display line: `<text> (<time>)`
    pub fn line(&self) -> String {
        format!("{} ({})", self.text, self.time)
    }

    /// Parsed `time`, or None if it isn't a recognizable timestamp
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        parse_time(&self.time)
    }

    /// Whether the reminder falls on the given calendar day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.scheduled_at().map(|t| t.date() == day).unwrap_or(false)
    }
}

/// Parse a timestamp-like string.
///
/// Accepts the datetime-local form (`2024-01-01T10:00`), with seconds, with a
/// space instead of `T`, RFC 3339 (the offset is ignored and the date is taken
/// as written), or a bare date (midnight).
pub fn parse_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Ids of reminders already shown during one session
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    ids: HashSet<Uuid>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, reminder: &Reminder) -> bool {
        self.ids.contains(&reminder.id)
    }

    /// Returns false if the reminder was already marked
    pub fn mark(&mut self, reminder: &Reminder) -> bool {
        self.ids.insert(reminder.id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Pick the earliest unprocessed reminder scheduled on `today` and mark it.
///
/// Ties on time keep their stored order. Returns None when nothing is due today.
pub fn select_reminder(
    all: &[Reminder],
    today: NaiveDate,
    processed: &mut ProcessedSet,
) -> Option<Reminder> {
    let mut candidates: Vec<(NaiveDateTime, &Reminder)> = all
        .iter()
        .filter(|r| !processed.contains(r))
        .filter_map(|r| match r.scheduled_at() {
            Some(t) => Some((t, r)),
            None => {
                debug!(reminder = %r.id, time = %r.time, "skipping reminder with unparseable time");
                None
            }
        })
        .filter(|(t, _)| t.date() == today)
        .collect();

    // sort_by_key is stable
    candidates.sort_by_key(|(t, _)| *t);

    let (_, chosen) = candidates.into_iter().next()?;
    processed.mark(chosen);
    Some(chosen.clone())
}
