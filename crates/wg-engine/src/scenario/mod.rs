//! Scenarios: rules that chain table rolls into a journey.
//!
//! A scenario owns its tables, its events and its random source. Running it
//! rolls on the table of the first registered event, then repeatedly looks up
//! the event for the entry just rolled, resolves one of its outcomes, and
//! rolls once on that outcome's table. The run ends when a rolled entry has no
//! event or an event has no selectable outcome.

pub mod resolve;

pub use resolve::OutcomeCriteria;

use std::collections::HashMap;

use tracing::{debug, debug_span, trace, warn};

use crate::config::ScenarioConfig;
use crate::error::{EngineError, EngineResult};
use crate::event::{Event, EventKey};
use crate::journey::{Journey, PathStep};
use crate::outcome::Outcome;
use crate::rng::{Mulberry32, RandomSource};
use crate::table::{Table, TableEntry, TableRegistry};

/// Tables, events and a random source.
#[derive(Debug)]
pub struct Scenario<R: RandomSource = Mulberry32> {
    name: String,
    config: ScenarioConfig,
    registry: TableRegistry,
    events: Vec<Event>,
    index: HashMap<EventKey, usize>,
    rng: R,
}

impl Scenario {
    /// Create a scenario driven by [`Mulberry32`], seeded from the config or
    /// from OS entropy when no seed is set.
    pub fn new(name: impl Into<String>, config: ScenarioConfig) -> Self {
        let rng = match &config.seed {
            Some(seed) => Mulberry32::new(seed.clone()),
            None => Mulberry32::from_entropy(),
        };
        Self::with_source(name, config, rng)
    }
}

impl<R: RandomSource> Scenario<R> {
    /// Create a scenario with a caller-supplied random source. The config's
    /// seed is ignored.
    pub fn with_source(name: impl Into<String>, config: ScenarioConfig, rng: R) -> Self {
        Self {
            name: name.into(),
            config,
            registry: TableRegistry::new(),
            events: Vec::new(),
            index: HashMap::new(),
            rng,
        }
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active configuration.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// The tables this scenario rolls on.
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Mutable access to the tables.
    pub fn registry_mut(&mut self) -> &mut TableRegistry {
        &mut self.registry
    }

    /// Register a table.
    pub fn register_table(&mut self, table: Table) -> EngineResult<()> {
        self.registry.register(table)
    }

    /// Build and register a table.
    pub fn define_table(
        &mut self,
        name: impl Into<String>,
        entries: Vec<TableEntry>,
    ) -> EngineResult<()> {
        self.registry.define(name, entries)
    }

    /// The random source.
    pub fn source(&self) -> &R {
        &self.rng
    }

    /// Mutable access to the random source.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Attach the same outcomes to several entries of one table.
    ///
    /// Entries that already have an event get the outcomes merged in (see
    /// [`Event::merge`]). Nothing is registered if any name or weight is
    /// invalid.
    pub fn add<N, O>(
        &mut self,
        table_name: &str,
        entry_names: impl IntoIterator<Item = N>,
        outcomes: impl IntoIterator<Item = O>,
    ) -> EngineResult<()>
    where
        N: Into<String>,
        O: Into<Outcome>,
    {
        let entry_names: Vec<String> = entry_names.into_iter().map(Into::into).collect();
        let outcomes: Vec<Outcome> = outcomes.into_iter().map(Into::into).collect();

        if table_name.is_empty() {
            return Err(EngineError::InvalidName("table"));
        }
        if entry_names.iter().any(String::is_empty) {
            return Err(EngineError::InvalidName("entry"));
        }
        for outcome in &outcomes {
            outcome.validate()?;
        }

        for entry_name in entry_names {
            self.insert(Event::new(table_name, entry_name, outcomes.clone()));
        }
        Ok(())
    }

    /// Register a single event, merging with an existing one for the same key.
    pub fn register(&mut self, event: Event) -> EngineResult<()> {
        if event.table_name.is_empty() {
            return Err(EngineError::InvalidName("table"));
        }
        if event.entry_name.is_empty() {
            return Err(EngineError::InvalidName("entry"));
        }
        for outcome in &event.outcomes {
            outcome.validate()?;
        }
        self.insert(event);
        Ok(())
    }

    fn insert(&mut self, event: Event) {
        let key = event.key();
        match self.index.get(&key) {
            Some(&i) => self.events[i].merge(event.outcomes),
            None => {
                self.index.insert(key, self.events.len());
                self.events.push(event);
            }
        }
    }

    /// The event for a table entry, if any.
    pub fn event(&self, table_name: &str, entry_name: &str) -> Option<&Event> {
        self.index
            .get(&EventKey::new(table_name, entry_name))
            .map(|&i| &self.events[i])
    }

    /// All events in registration order. The first one is the root.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Resolve the next outcome of an event against a journey.
    ///
    /// `None` criteria means a plain weighted draw over every outcome,
    /// thresholds ignored.
    pub fn next_outcome(
        &mut self,
        key: &EventKey,
        criteria: Option<&OutcomeCriteria>,
        journey: &Journey,
    ) -> Option<&Outcome> {
        let &i = self.index.get(key)?;
        resolve::resolve(&self.events[i].outcomes, criteria, journey, &mut self.rng)
    }

    /// Run from the root event with a fresh journey.
    pub fn run(&mut self) -> EngineResult<Journey> {
        self.run_with(Journey::new())
    }

    /// Run from the root event, continuing `journey`.
    pub fn run_with(&mut self, mut journey: Journey) -> EngineResult<Journey> {
        let span = debug_span!("scenario", scenario = %self.name);
        let _enter = span.enter();

        let root = self.events.first().ok_or(EngineError::NoEvents)?.table_name.clone();
        debug!(root = %root, "starting run");

        let mut steps = 0;
        let mut table_name = root;
        loop {
            steps += 1;
            if !self.config.allows(steps) {
                warn!(limit = self.config.max_steps, "step limit reached");
                return Err(EngineError::StepLimitExceeded(self.config.max_steps));
            }
            let step = self.roll(&table_name, &mut journey)?;
            let key = EventKey::new(step.table_name.clone(), step.entry.clone());

            let Some(&i) = self.index.get(&key) else {
                debug!(event = %key, "no event for rolled entry");
                break;
            };
            trace!(event = %key, "matched event");

            let criteria = OutcomeCriteria::random();
            let outcome = resolve::resolve(
                &self.events[i].outcomes,
                Some(&criteria),
                &journey,
                &mut self.rng,
            );
            let Some(outcome) = outcome else {
                debug!(event = %key, "no selectable outcome");
                break;
            };
            trace!(
                next_table = %outcome.table_name,
                likelihood = outcome.likelihood,
                "chose outcome"
            );
            table_name = outcome.table_name.clone();
        }

        debug!(
            steps = journey.path().len(),
            tags = journey.tags().len(),
            "run finished"
        );
        Ok(journey)
    }

    /// Run with a fresh journey and return only the path.
    pub fn create(&mut self) -> EngineResult<Vec<PathStep>> {
        Ok(self.run()?.into_path())
    }

    /// Roll once on a table and record the result.
    fn roll<'j>(
        &mut self,
        table_name: &str,
        journey: &'j mut Journey,
    ) -> EngineResult<&'j PathStep> {
        let table = self.registry.require(table_name)?;
        let roll = self.rng.random_int(0, table.max_value()) + 1;
        let entry = table.entry_for(roll).ok_or_else(|| EngineError::NoEntryForRoll {
            table: table_name.to_string(),
            roll,
        })?;
        trace!(table = %table_name, roll, entry = %entry.name, "rolled");
        Ok(journey.record(roll, table_name, entry))
    }
}
