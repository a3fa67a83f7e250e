//! Range-addressed table rows.

use crate::tag::TagSpec;

/// One row of a table, selected by any roll in `start..=end`.
#[derive(Debug, Clone)]
pub struct TableEntry {
    /// First roll covered (inclusive).
    pub start: i64,
    /// Last roll covered (inclusive).
    pub end: i64,
    /// Identifier used to key events.
    pub name: String,
    /// Display text; defaults to the name.
    pub description: String,
    /// Tag effects applied when the entry is rolled.
    pub tags: Vec<TagSpec>,
}

impl TableEntry {
    /// Create an entry covering `start..=end` with no tags.
    ///
    /// `start <= end` is expected but not enforced; an inverted range simply
    /// matches nothing.
    pub fn new(start: i64, end: i64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            start,
            end,
            description: name.clone(),
            name,
            tags: Vec::new(),
        }
    }

    /// Create an entry covering exactly one roll.
    pub fn single(roll: i64, name: impl Into<String>) -> Self {
        Self::new(roll, roll, name)
    }

    /// Set the display text. An empty string keeps the name.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = description;
        }
        self
    }

    /// Append a tag effect.
    pub fn with_tags(mut self, tags: impl Into<TagSpec>) -> Self {
        self.tags.push(tags.into());
        self
    }

    /// Whether `roll` falls inside this entry's range.
    pub fn matches(&self, roll: i64) -> bool {
        roll >= self.start && roll <= self.end
    }
}
