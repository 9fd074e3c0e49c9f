use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One question/answer exchange of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTurn {
    /// What the user asked
    pub question: String,

    /// What the assistant answered
    pub answer: String,
}

impl SessionTurn {
    /// Create a turn
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Named conversations plus an active-session pointer.
///
/// Owned by the caller and passed by reference into the pipeline; the core
/// only ever reads turns. Turn lists are append-only through [`append`].
///
/// [`append`]: SessionStore::append
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionStore {
    sessions: BTreeMap<String, Vec<SessionTurn>>,
    active: Option<String>,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file, or start empty if it does not exist
    pub fn load_or_new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(std::io::Error::other)
    }

    /// Persist the store as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, data)
    }

    /// Session titles, sorted
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.sessions.keys().map(String::as_str).collect()
    }

    /// Mark a session as active, creating it if needed
    pub fn set_active(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.sessions.entry(title.clone()).or_default();
        self.active = Some(title);
    }

    /// Title of the active session, if any
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Turns of a named session; empty if the session does not exist
    #[must_use]
    pub fn turns(&self, title: &str) -> &[SessionTurn] {
        self.sessions.get(title).map_or(&[], Vec::as_slice)
    }

    /// Turns of the active session; empty if none is active
    #[must_use]
    pub fn active_turns(&self) -> &[SessionTurn] {
        self.active().map_or(&[], |title| self.turns(title))
    }

    /// Append a turn to a session, creating it if needed
    pub fn append(&mut self, title: impl Into<String>, turn: SessionTurn) {
        self.sessions.entry(title.into()).or_default().push(turn);
    }
}
