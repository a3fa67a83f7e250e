//! Deterministic table-traversal engine for Wegweiser.
//!
//! Content is described as named tables of range-addressed entries, joined by
//! events: when a roll lands on an entry that has an event, one of the event's
//! weighted (and optionally tag-gated) outcomes picks the next table to roll
//! on. A [`Scenario`] walks that graph and records a [`Journey`]: the rolls
//! taken and the tags accumulated along the way. Seeded runs are reproducible
//! bit for bit through the [`Mulberry32`] stream.

pub mod config;
pub mod error;
pub mod event;
pub mod journey;
pub mod outcome;
pub mod rng;
pub mod scenario;
pub mod table;
pub mod tag;

pub use config::ScenarioConfig;
pub use error::{EngineError, EngineResult};
pub use event::{Event, EventKey};
pub use journey::{Journey, PathQuery, PathStep};
pub use outcome::Outcome;
pub use rng::{Mulberry32, RandomSource, Seed};
pub use scenario::{OutcomeCriteria, Scenario};
pub use table::{Table, TableEntry, TableRegistry};
pub use tag::{Tag, TagCheck, TagModifier, TagSpec, TagState};
