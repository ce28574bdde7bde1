//! Synchronized key-value storage and the reminder list kept in it

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, DEFAULT_STORAGE_KEY};
use crate::error::Result;
use crate::reminder::Reminder;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Whole-value key-value storage, shared by every front-end
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

/// SQLite-backed storage
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Open or create the storage at the configured path
    pub fn open() -> Result<Self> {
        Self::open_at(&Config::db_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        embedded::migrations::runner().run(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        embedded::migrations::runner().run(&mut conn)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM sync_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sync_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, serde_json::to_string(value)?, Utc::now().timestamp()],
        )?;
        Ok(())
    }
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Anything that can hand out the current reminder list
pub trait ReminderSource {
    fn reminders(&self) -> Result<Vec<Reminder>>;
}

impl ReminderSource for Vec<Reminder> {
    fn reminders(&self) -> Result<Vec<Reminder>> {
        Ok(self.clone())
    }
}

/// Stored shape, tolerating records written before reminders carried an id
#[derive(Deserialize)]
struct StoredReminder {
    #[serde(default)]
    id: Option<Uuid>,
    text: String,
    time: String,
}

/// The reminder list kept under one storage key
pub struct ReminderStore<S: KvStore> {
    kv: S,
    key: String,
}

impl<S: KvStore> ReminderStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// All stored reminders, in stored order
    pub fn list(&self) -> Result<Vec<Reminder>> {
        let stored: Vec<StoredReminder> = match self.kv.get(&self.key)? {
            Some(value) => serde_json::from_value(value)?,
            None => return Ok(Vec::new()),
        };

        let mut upgraded = false;
        let reminders: Vec<Reminder> = stored
            .into_iter()
            .map(|r| Reminder {
                id: r.id.unwrap_or_else(|| {
                    upgraded = true;
                    Uuid::new_v4()
                }),
                text: r.text,
                time: r.time,
            })
            .collect();

        if upgraded {
            info!(key = %self.key, "assigned ids to stored reminders");
            self.save_all(&reminders)?;
        }

        Ok(reminders)
    }

    /// Display lines for every reminder
    pub fn lines(&self) -> Result<Vec<String>> {
        Ok(self.list()?.iter().map(Reminder::line).collect())
    }

    /// Append a reminder and persist the whole list.
    ///
    /// Returns None without saving if either field is blank.
    pub fn add(&self, text: &str, time: &str) -> Result<Option<Reminder>> {
        let (text, time) = (text.trim(), time.trim());
        if text.is_empty() || time.is_empty() {
            debug!("ignoring reminder with empty text or time");
            return Ok(None);
        }

        let mut reminders = self.list()?;
        let reminder = Reminder::new(text, time);
        reminders.push(reminder.clone());
        self.save_all(&reminders)?;

        debug!(reminder = %reminder.id, total = reminders.len(), "saved reminder");
        Ok(Some(reminder))
    }

    fn save_all(&self, reminders: &[Reminder]) -> Result<()> {
        self.kv.set(&self.key, &serde_json::to_value(reminders)?)
    }
}

impl<S: KvStore> ReminderSource for ReminderStore<S> {
    fn reminders(&self) -> Result<Vec<Reminder>> {
        self.list()
    }
}
