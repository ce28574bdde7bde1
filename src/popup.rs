//! Headless model of the reminder popup: two inputs, a save action, a list

use tracing::debug;

use crate::error::Result;
use crate::reminder::Reminder;
use crate::render::render_list_html;
use crate::store::{KvStore, ReminderStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Idle,
    Saving,
}

pub struct Popup<S: KvStore> {
    store: ReminderStore<S>,
    pub text_input: String,
    pub time_input: String,
    state: PopupState,
    list_html: String,
}

impl<S: KvStore> Popup<S> {
    /// Load the stored reminders and render the list
    pub fn open(store: ReminderStore<S>) -> Result<Self> {
        let mut popup = Self {
            store,
            text_input: String::new(),
            time_input: String::new(),
            state: PopupState::Idle,
            list_html: String::new(),
        };
        popup.refresh()?;
        Ok(popup)
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Current list markup, every entry escaped
    pub fn list_html(&self) -> &str {
        &self.list_html
    }

    pub fn store(&self) -> &ReminderStore<S> {
        &self.store
    }

    /// Re-read storage and re-render
    pub fn refresh(&mut self) -> Result<()> {
        let lines = self.store.lines()?;
        self.list_html = render_list_html(&lines);
        Ok(())
    }

    /// Save the current inputs.
    ///
    /// Blank inputs save nothing and are left as typed. After a save the list
    /// is re-rendered and both inputs are cleared.
    pub fn save(&mut self) -> Result<Option<Reminder>> {
        self.state = PopupState::Saving;
        let result = self.save_inputs();
        self.state = PopupState::Idle;
        result
    }

    fn save_inputs(&mut self) -> Result<Option<Reminder>> {
        let Some(reminder) = self.store.add(&self.text_input, &self.time_input)? else {
            debug!("popup save ignored: missing text or time");
            return Ok(None);
        };

        self.refresh()?;
        self.text_input.clear();
        self.time_input.clear();
        Ok(Some(reminder))
    }
}
