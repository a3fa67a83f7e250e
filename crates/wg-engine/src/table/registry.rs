//! Name-keyed table lookup.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

use super::{Table, TableEntry};

/// Owns the tables a scenario can roll on.
///
/// Each scenario carries its own registry, so independent runs never share
/// table state.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: HashMap<String, Table>,
    order: Vec<String>,
}

impl TableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Fails if the name is empty or already taken.
    pub fn register(&mut self, table: Table) -> EngineResult<()> {
        if table.name.is_empty() {
            return Err(EngineError::InvalidName("table"));
        }
        if table.entries().iter().any(|e| e.name.is_empty()) {
            return Err(EngineError::InvalidName("entry"));
        }
        if self.tables.contains_key(&table.name) {
            return Err(EngineError::DuplicateTable(table.name));
        }
        self.order.push(table.name.clone());
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    /// Build and register a table in one step.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        entries: Vec<TableEntry>,
    ) -> EngineResult<()> {
        self.register(Table::with_entries(name, entries))
    }

    /// Look up a table by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Look up a table that must exist.
    pub fn require(&self, name: &str) -> EngineResult<&Table> {
        self.get(name)
            .ok_or_else(|| EngineError::TableNotFound(name.to_string()))
    }

    /// Entry names of a registered table, for attaching one rule to every entry.
    pub fn keys(&self, name: &str) -> EngineResult<Vec<String>> {
        Ok(self.require(name)?.entry_names())
    }

    /// Whether a table with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// All tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.order.iter().filter_map(|name| self.tables.get(name))
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drop every registration. Tables handed out earlier are unaffected.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biomes() -> Table {
        Table::new("Biome")
            .with_entry(TableEntry::new(1, 50, "Desert"))
            .with_entry(TableEntry::new(51, 100, "Forest"))
    }

    #[test]
    fn register_and_get() {
        let mut registry = TableRegistry::new();
        registry.register(biomes()).unwrap();
        assert!(registry.contains("Biome"));
        assert_eq!(registry.get("Biome").unwrap().max_value(), 100);
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = TableRegistry::new();
        registry.register(biomes()).unwrap();
        let err = registry.register(biomes()).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateTable(name) if name == "Biome"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = TableRegistry::new();
        assert!(matches!(
            registry.register(Table::new("")),
            Err(EngineError::InvalidName("table"))
        ));
        assert!(matches!(
            registry.register(Table::new("Loot").with_entry(TableEntry::new(1, 6, ""))),
            Err(EngineError::InvalidName("entry"))
        ));
    }

    #[test]
    fn require_reports_missing_table() {
        let registry = TableRegistry::new();
        let err = registry.require("Ghost").unwrap_err();
        assert_eq!(err.to_string(), "table \"Ghost\" not found");
    }

    #[test]
    fn keys_lists_entry_names() {
        let mut registry = TableRegistry::new();
        registry.register(biomes()).unwrap();
        assert_eq!(registry.keys("Biome").unwrap(), vec!["Desert", "Forest"]);
        assert!(registry.keys("Nope").is_err());
    }

    #[test]
    fn tables_in_registration_order() {
        let mut registry = TableRegistry::new();
        registry.define("B", vec![]).unwrap();
        registry.define("A", vec![]).unwrap();
        let names: Vec<&str> = registry.tables().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn clear_allows_reregistration() {
        let mut registry = TableRegistry::new();
        let table = biomes();
        registry.register(table.clone()).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        registry.register(table).unwrap();
        assert_eq!(registry.len(), 1);
    }
}
