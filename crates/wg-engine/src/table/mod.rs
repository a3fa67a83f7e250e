//! Named tables of range-addressed entries.

pub mod entry;
pub mod registry;

pub use entry::TableEntry;
pub use registry::TableRegistry;

/// A named, ordered collection of entries.
///
/// Ranges may overlap or leave gaps; lookups return the first entry, in
/// insertion order, whose range contains the roll.
#[derive(Debug, Clone)]
pub struct Table {
    /// Unique name within a registry.
    pub name: String,
    entries: Vec<TableEntry>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Create a table from a list of entries.
    pub fn with_entries(name: impl Into<String>, entries: Vec<TableEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Append an entry, builder style.
    pub fn with_entry(mut self, entry: TableEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append an entry.
    pub fn add_entry(&mut self, entry: TableEntry) {
        self.entries.push(entry);
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Names of all entries, in insertion order.
    pub fn entry_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Highest `end` across all entries, or 0 for an empty table.
    /// Rolls are drawn from `1..=max_value()`.
    pub fn max_value(&self) -> i64 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// The first entry whose range contains `roll`.
    pub fn entry_for(&self, roll: i64) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.matches(roll))
    }
}
