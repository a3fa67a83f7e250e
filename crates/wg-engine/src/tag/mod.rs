//! Tags, tag specifications, and dynamic tag modifiers.
//!
//! Entries and outcome thresholds describe their tags with a [`TagSpec`]:
//! a literal list, a name/value mapping, or a [`TagModifier`] computed from
//! the journey at the moment the tags are needed. Every consumer goes through
//! [`TagSpec::evaluate`], which expands modifiers until only plain [`Tag`]s
//! remain.

pub mod state;

pub use state::{TagCheck, TagState};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::journey::Journey;

/// A named numeric counter.
///
/// Values are whole numbers. Content with fractional amounts has to be
/// scaled to integers before it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Amount added when applied, or minimum required when used as a threshold.
    pub value: i64,
}

impl Tag {
    /// Create a tag.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

type ModifierFn = dyn Fn(&Journey) -> TagSpec + Send + Sync;

/// A tag function evaluated against the journey so far.
///
/// Modifiers are re-evaluated on every use; results are never cached.
#[derive(Clone)]
pub struct TagModifier(Arc<ModifierFn>);

impl TagModifier {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Journey) -> TagSpec + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the modifier once.
    pub fn apply(&self, journey: &Journey) -> TagSpec {
        (self.0)(journey)
    }
}

impl fmt::Debug for TagModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TagModifier(..)")
    }
}

/// How a set of tags is described.
#[derive(Debug, Clone)]
pub enum TagSpec {
    /// A fixed, ordered list of tags.
    Literal(Vec<Tag>),
    /// Name to value pairs.
    Mapping(BTreeMap<String, i64>),
    /// Tags computed from the current journey.
    Computed(TagModifier),
}

impl TagSpec {
    /// A spec with no tags.
    pub fn none() -> Self {
        Self::Literal(Vec::new())
    }

    /// Wrap a closure as a computed spec.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Journey) -> TagSpec + Send + Sync + 'static,
    {
        Self::Computed(TagModifier::new(f))
    }

    /// True for literal or mapping specs without tags.
    ///
    /// A computed spec is never empty, since its result is unknown until it runs.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal(tags) => tags.is_empty(),
            Self::Mapping(map) => map.is_empty(),
            Self::Computed(_) => false,
        }
    }

    /// Names of literal or mapping tags. Computed specs report none.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Literal(tags) => tags.iter().map(|t| t.name.as_str()).collect(),
            Self::Mapping(map) => map.keys().map(String::as_str).collect(),
            Self::Computed(_) => Vec::new(),
        }
    }

    /// Expand into plain tags, running modifiers (and whatever they return)
    /// against `journey`.
    pub fn evaluate(&self, journey: &Journey) -> Vec<Tag> {
        match self {
            Self::Literal(tags) => tags.clone(),
            Self::Mapping(map) => map
                .iter()
                .map(|(name, value)| Tag::new(name.clone(), *value))
                .collect(),
            Self::Computed(modifier) => modifier.apply(journey).evaluate(journey),
        }
    }
}

/// Expand a list of specs in order.
pub fn evaluate_all(specs: &[TagSpec], journey: &Journey) -> Vec<Tag> {
    specs.iter().flat_map(|s| s.evaluate(journey)).collect()
}

impl Default for TagSpec {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Tag>> for TagSpec {
    fn from(tags: Vec<Tag>) -> Self {
        Self::Literal(tags)
    }
}

impl From<Tag> for TagSpec {
    fn from(tag: Tag) -> Self {
        Self::Literal(vec![tag])
    }
}

impl From<BTreeMap<String, i64>> for TagSpec {
    fn from(map: BTreeMap<String, i64>) -> Self {
        Self::Mapping(map)
    }
}

impl<const N: usize> From<[(&str, i64); N]> for TagSpec {
    fn from(pairs: [(&str, i64); N]) -> Self {
        Self::Mapping(
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl From<TagModifier> for TagSpec {
    fn from(modifier: TagModifier) -> Self {
        Self::Computed(modifier)
    }
}
