//! The record of one traversal: accumulated tags plus the path taken.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::TableEntry;
use crate::tag::{TagCheck, TagSpec, TagState, evaluate_all};

/// One roll on one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// The rolled value.
    pub roll: i64,
    /// The table rolled on.
    pub table_name: String,
    /// Name of the entry the roll landed on.
    pub entry: String,
    /// Display text of that entry.
    pub description: String,
    /// Accumulated tags right after this entry's tags were applied.
    pub tags: BTreeMap<String, i64>,
}

/// Criteria for matching path steps. Every criterion that is set must hold;
/// an empty query matches every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathQuery {
    /// Table name must match.
    pub table_name: Option<String>,
    /// Entry name must match.
    pub entry: Option<String>,
    /// Roll must equal this value.
    pub roll_equals: Option<i64>,
    /// Roll must be strictly below this value.
    pub roll_less_than: Option<i64>,
    /// Roll must be strictly above this value.
    pub roll_greater_than: Option<i64>,
}

impl PathQuery {
    /// A query matching every step.
    pub fn any() -> Self {
        Self::default()
    }

    /// Steps on the named table.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Restrict to an entry name.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Restrict to an exact roll.
    pub fn roll_equals(mut self, roll: i64) -> Self {
        self.roll_equals = Some(roll);
        self
    }

    /// Restrict to rolls below `roll`.
    pub fn roll_less_than(mut self, roll: i64) -> Self {
        self.roll_less_than = Some(roll);
        self
    }

    /// Restrict to rolls above `roll`.
    pub fn roll_greater_than(mut self, roll: i64) -> Self {
        self.roll_greater_than = Some(roll);
        self
    }

    /// Whether `step` meets every set criterion.
    pub fn matches(&self, step: &PathStep) -> bool {
        self.table_name.as_ref().is_none_or(|t| *t == step.table_name)
            && self.entry.as_ref().is_none_or(|e| *e == step.entry)
            && self.roll_equals.is_none_or(|r| step.roll == r)
            && self.roll_less_than.is_none_or(|r| step.roll < r)
            && self.roll_greater_than.is_none_or(|r| step.roll > r)
    }
}

/// Tag state and path of a traversal.
///
/// The engine is the only writer; callers read it through the query methods
/// or hand a previous journey back in to continue from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    tags: TagState,
    path: Vec<PathStep>,
}

impl Journey {
    /// A fresh journey with no tags and no steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from existing tags and path.
    pub fn resume(tags: TagState, path: Vec<PathStep>) -> Self {
        Self { tags, path }
    }

    /// Current accumulated tags.
    pub fn tags(&self) -> &TagState {
        &self.tags
    }

    #[cfg(test)]
    pub(crate) fn tags_mut(&mut self) -> &mut TagState {
        &mut self.tags
    }

    /// Steps taken so far, oldest first.
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// Consume the journey, keeping only the path.
    pub fn into_path(self) -> Vec<PathStep> {
        self.path
    }

    /// The most recent step.
    pub fn last_step(&self) -> Option<&PathStep> {
        self.path.last()
    }

    /// Whether any tag has been applied.
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Check an accumulated tag. Tags never applied fail every check.
    pub fn has_tag(&self, name: &str, check: TagCheck) -> bool {
        self.tags.has_tag(name, check)
    }

    /// Steps matching a query, oldest first.
    pub fn steps_matching<'a>(
        &'a self,
        query: &'a PathQuery,
    ) -> impl Iterator<Item = &'a PathStep> {
        self.path.iter().filter(move |s| query.matches(s))
    }

    /// Whether at least one step matches.
    pub fn has_path(&self, query: &PathQuery) -> bool {
        self.has_path_more_than(query, 0)
    }

    /// Whether more than `count` steps match.
    pub fn has_path_more_than(&self, query: &PathQuery, count: usize) -> bool {
        self.steps_matching(query).count() > count
    }

    /// Whether every threshold in `specs` is met. Computed thresholds are
    /// evaluated against this journey first.
    pub fn is_activated(&self, specs: &[TagSpec]) -> bool {
        self.tags.satisfies(&evaluate_all(specs, self))
    }

    /// Apply an entry's tags and append the resulting step.
    ///
    /// Modifiers see the journey as it was before this entry.
    pub(crate) fn record(&mut self, roll: i64, table_name: &str, entry: &TableEntry) -> &PathStep {
        let applied = evaluate_all(&entry.tags, self);
        self.tags.accumulate(&applied);
        self.path.push(PathStep {
            roll,
            table_name: table_name.to_string(),
            entry: entry.name.clone(),
            description: entry.description.clone(),
            tags: self.tags.snapshot(),
        });
        &self.path[self.path.len() - 1]
    }

    /// Serialize tags and path as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
