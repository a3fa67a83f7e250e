//! Accumulated tag values for a journey.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Tag;

/// A comparison applied to a tag's accumulated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCheck {
    /// The tag has been applied at least once.
    Present,
    /// The value equals the operand.
    Equals(i64),
    /// The value is strictly below the operand.
    LessThan(i64),
    /// The value is strictly above the operand.
    GreaterThan(i64),
    /// The value is at or above the operand.
    AtLeast(i64),
}

impl TagCheck {
    fn holds(self, value: i64) -> bool {
        match self {
            Self::Present => true,
            Self::Equals(n) => value == n,
            Self::LessThan(n) => value < n,
            Self::GreaterThan(n) => value > n,
            Self::AtLeast(n) => value >= n,
        }
    }
}

/// Tag name to accumulated value.
///
/// Values only ever grow by addition; applying a tag never overwrites.
/// Sums clamp at `i64::MIN` and `i64::MAX` instead of wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagState {
    values: BTreeMap<String, i64>,
}

impl TagState {
    /// An empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated value, or 0 if the tag was never applied.
    pub fn get(&self, name: &str) -> i64 {
        self.values.get(name).copied().unwrap_or(0)
    }

    /// The accumulated value, or `None` if the tag was never applied.
    pub fn value(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Add `amount` to a tag. The sum saturates at the `i64` bounds.
    pub fn add(&mut self, name: &str, amount: i64) {
        let value = self.values.entry(name.to_string()).or_insert(0);
        *value = value.saturating_add(amount);
    }

    /// Fold a list of tags in.
    pub fn accumulate(&mut self, tags: &[Tag]) {
        for tag in tags {
            self.add(&tag.name, tag.value);
        }
    }

    /// True when every tag's accumulated value reaches its `value` as a minimum.
    /// Unapplied tags count as 0.
    pub fn satisfies(&self, thresholds: &[Tag]) -> bool {
        thresholds.iter().all(|t| self.get(&t.name) >= t.value)
    }

    /// Check a tag. A tag that was never applied fails every check.
    pub fn has_tag(&self, name: &str, check: TagCheck) -> bool {
        self.value(name).is_some_and(|v| check.holds(v))
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no tag was applied yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// An owned copy of the current values.
    pub fn snapshot(&self) -> BTreeMap<String, i64> {
        self.values.clone()
    }
}

impl From<BTreeMap<String, i64>> for TagState {
    fn from(values: BTreeMap<String, i64>) -> Self {
        Self { values }
    }
}

impl<const N: usize> From<[(&str, i64); N]> for TagState {
    fn from(pairs: [(&str, i64); N]) -> Self {
        let mut state = Self::new();
        for (name, value) in pairs {
            state.add(name, value);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation_is_additive() {
        let mut state = TagState::from([("danger", 1)]);
        state.accumulate(&[Tag::new("danger", 2)]);
        state.accumulate(&[Tag::new("danger", 2)]);
        assert_eq!(state.get("danger"), 5);
    }

    #[test]
    fn accumulation_saturates() {
        let mut state = TagState::from([("power", i64::MAX - 1)]);
        state.add("power", 5);
        assert_eq!(state.get("power"), i64::MAX);
        state.add("debt", i64::MIN);
        state.add("debt", -1);
        assert_eq!(state.get("debt"), i64::MIN);
    }

    #[test]
    fn missing_tags_read_as_zero() {
        let state = TagState::new();
        assert_eq!(state.get("gold"), 0);
        assert_eq!(state.value("gold"), None);
        assert!(state.is_empty());
    }

    #[test]
    fn satisfies_requires_every_threshold() {
        let state = TagState::from([("strength", 5), ("wisdom", 2)]);
        assert!(state.satisfies(&[Tag::new("strength", 5)]));
        assert!(!state.satisfies(&[Tag::new("strength", 5), Tag::new("wisdom", 3)]));
        assert!(state.satisfies(&[]));
        assert!(!state.satisfies(&[Tag::new("charm", 1)]));
    }

    #[test]
    fn zero_threshold_on_missing_tag_is_met() {
        let state = TagState::new();
        assert!(state.satisfies(&[Tag::new("anything", 0)]));
    }

    #[test]
    fn has_tag_checks() {
        let state = TagState::from([("danger", 3)]);
        assert!(state.has_tag("danger", TagCheck::Present));
        assert!(state.has_tag("danger", TagCheck::Equals(3)));
        assert!(state.has_tag("danger", TagCheck::LessThan(4)));
        assert!(state.has_tag("danger", TagCheck::GreaterThan(2)));
        assert!(state.has_tag("danger", TagCheck::AtLeast(3)));
        assert!(!state.has_tag("danger", TagCheck::GreaterThan(3)));
        assert!(!state.has_tag("calm", TagCheck::LessThan(10)));
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut state = TagState::from([("gold", 5)]);
        let snap = state.snapshot();
        state.add("gold", 1);
        assert_eq!(snap["gold"], 5);
        assert_eq!(state.get("gold"), 6);
    }

    #[test]
    fn serializes_as_plain_map() {
        let state = TagState::from([("a", 1), ("b", 2)]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }
}
