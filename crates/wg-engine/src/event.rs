//! Events: the outcomes available after landing on a specific table entry.

use std::fmt;

use crate::outcome::Outcome;

/// Identifies an event by table and entry name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    /// Table the entry belongs to.
    pub table_name: String,
    /// Entry name within that table.
    pub entry_name: String,
}

impl EventKey {
    /// Create a key.
    pub fn new(table_name: impl Into<String>, entry_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            entry_name: entry_name.into(),
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.table_name, self.entry_name)
    }
}

/// Binds a (table, entry) pair to its outcomes.
#[derive(Debug, Clone)]
pub struct Event {
    /// Table the entry belongs to.
    pub table_name: String,
    /// Entry name within that table.
    pub entry_name: String,
    /// Outcomes in declaration order.
    pub outcomes: Vec<Outcome>,
}

impl Event {
    /// Create an event.
    pub fn new(
        table_name: impl Into<String>,
        entry_name: impl Into<String>,
        outcomes: Vec<Outcome>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            entry_name: entry_name.into(),
            outcomes,
        }
    }

    /// This event's key.
    pub fn key(&self) -> EventKey {
        EventKey::new(self.table_name.clone(), self.entry_name.clone())
    }

    /// Whether this event fires for the given table and entry.
    pub fn is_for(&self, table_name: &str, entry_name: &str) -> bool {
        self.table_name == table_name && self.entry_name == entry_name
    }

    /// Fold more outcomes into this event.
    ///
    /// An incoming outcome with the same target and the same likelihood as an
    /// existing one contributes its thresholds to that outcome. Anything else
    /// is appended.
    pub fn merge(&mut self, outcomes: impl IntoIterator<Item = Outcome>) {
        for outcome in outcomes {
            let existing = self.outcomes.iter_mut().find(|o| {
                o.table_name == outcome.table_name && o.likelihood == outcome.likelihood
            });
            match existing {
                Some(existing) => existing.thresholds.extend(outcome.thresholds),
                None => self.outcomes.push(outcome),
            }
        }
    }
}
