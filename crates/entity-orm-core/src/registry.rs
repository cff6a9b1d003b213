// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema registry: migrated tables keyed by name.
//!
//! Owned by one [`EntityManager`](crate::EntityManager). Readers take an
//! [`Arc`] snapshot under a read lock and never hold the lock across I/O, so
//! a concurrent migrate only ever swaps whole entries.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    error::{OrmError, Result},
    metadata::Table
};

/// Table metadata for every migrated entity.
#[derive(Debug, Default)]
pub struct Registry {
    tables: RwLock<HashMap<String, Arc<Table>>>
}

impl Registry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a table, if migrated.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.read().get(name).cloned()
    }

    /// Like [`get`](Self::get) but failing with
    /// [`OrmError::ModelNotFound`].
    ///
    /// # Errors
    ///
    /// When `name` was never registered or has been removed.
    pub fn require(&self, name: &str) -> Result<Arc<Table>> {
        self.get(name)
            .ok_or_else(|| OrmError::ModelNotFound(name.to_owned()))
    }

    /// Register a table, replacing any entry with the same name.
    pub fn set(&self, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        self.tables
            .write()
            .insert(table.name.clone(), Arc::clone(&table));
        table
    }

    /// Remove a table, returning the last snapshot.
    pub fn remove(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.write().remove(name)
    }

    /// Whether a table is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Registered table names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> Table {
        Table {
            name:           name.to_owned(),
            columns:        Vec::new(),
            mapped_columns: Vec::new(),
            primary_keys:   Vec::new()
        }
    }

    #[test]
    fn set_get_remove() {
        let registry = Registry::new();
        assert!(registry.get("Troop").is_none());
        registry.set(table("Troop"));
        assert!(registry.contains("Troop"));
        assert_eq!(registry.require("Troop").unwrap().name, "Troop");
        assert!(registry.remove("Troop").is_some());
        assert!(matches!(
            registry.require("Troop"),
            Err(OrmError::ModelNotFound(name)) if name == "Troop"
        ));
    }

    #[test]
    fn set_overwrites() {
        let registry = Registry::new();
        let first = registry.set(table("Troop"));
        let second = registry.set(table("Troop"));
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&registry.get("Troop").unwrap(), &second));
        assert_eq!(registry.names(), ["Troop"]);
    }

    #[test]
    fn snapshots_survive_removal() {
        let registry = Registry::new();
        registry.set(table("Troop"));
        let snapshot = registry.get("Troop").unwrap();
        registry.remove("Troop");
        assert_eq!(snapshot.name, "Troop");
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.set(table(&format!("T{i}")));
                        let _ = registry.get("T0");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.names().len(), 4);
    }
}
