//! Tests for the reminder list in SQLite storage and the popup built on it

use chrono::NaiveDate;
use tempfile::TempDir;

use motivad::popup::{Popup, PopupState};
use motivad::reminder::{select_reminder, ProcessedSet, Reminder};
use motivad::store::{KvStore, ReminderStore, SqliteKv};

fn temp_store() -> (TempDir, ReminderStore<SqliteKv>) {
    let dir = tempfile::tempdir().unwrap();
    let kv = SqliteKv::open_at(&dir.path().join("motivad.db")).unwrap();
    (dir, ReminderStore::new(kv))
}

#[test]
fn test_add_then_list_renders_one_line() {
    let (_dir, store) = temp_store();
    store.add("Buy milk", "2024-01-01T10:00").unwrap();

    let lines = store.lines().unwrap();
    assert_eq!(lines, vec!["Buy milk (2024-01-01T10:00)".to_string()]);
}

#[test]
fn test_list_keeps_insertion_order() {
    let (_dir, store) = temp_store();
    store.add("Late", "2024-01-01T22:00").unwrap();
    store.add("Early", "2024-01-01T06:00").unwrap();

    let texts: Vec<String> = store.list().unwrap().into_iter().map(|r| r.text).collect();
    assert_eq!(texts, vec!["Late".to_string(), "Early".to_string()]);
}

#[test]
fn test_whole_list_written_under_one_key() {
    let (_dir, store) = temp_store();
    store.add("One", "2024-01-01T01:00").unwrap();
    store.add("Two", "2024-01-01T02:00").unwrap();

    let value = store.kv().get("reminders").unwrap().unwrap();
    let stored: Vec<Reminder> = serde_json::from_value(value).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].text, "Two");
}

#[test]
fn test_two_stores_share_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motivad.db");
    let popup_side = ReminderStore::new(SqliteKv::open_at(&path).unwrap());
    let page_side = ReminderStore::new(SqliteKv::open_at(&path).unwrap());

    popup_side.add("Shared", "2024-01-01T12:00").unwrap();

    assert_eq!(page_side.lines().unwrap(), vec!["Shared (2024-01-01T12:00)".to_string()]);
}

#[test]
fn test_popup_save_flow() {
    let (_dir, store) = temp_store();
    let mut popup = Popup::open(store).unwrap();
    assert_eq!(popup.list_html(), "<ul id=\"reminder-list\"></ul>");

    popup.text_input = "Buy milk".into();
    popup.time_input = "2024-01-01T10:00".into();
    popup.save().unwrap();

    assert_eq!(popup.state(), PopupState::Idle);
    assert_eq!(
        popup.list_html(),
        "<ul id=\"reminder-list\"><li>Buy milk (2024-01-01T10:00)</li></ul>"
    );
    assert!(popup.text_input.is_empty() && popup.time_input.is_empty());
}

#[test]
fn test_selection_over_stored_reminders() {
    let (_dir, store) = temp_store();
    store.add("Yesterday", "2023-12-31T09:00").unwrap();
    store.add("Second", "2024-01-01T11:00").unwrap();
    store.add("First", "2024-01-01T08:00").unwrap();
    let all = store.list().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut processed = ProcessedSet::new();

    let mut picked = Vec::new();
    while let Some(r) = select_reminder(&all, today, &mut processed) {
        assert!(r.is_on(today));
        picked.push(r.text);
    }
    assert_eq!(picked, vec!["First".to_string(), "Second".to_string()]);
}
