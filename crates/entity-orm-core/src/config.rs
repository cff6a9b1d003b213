// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Datasource configuration.
//!
//! Records are plain serde types. Where they come from (a file, the
//! environment, code) is up to the application.
//!
//! ```json
//! {
//!   "datasources": [
//!     { "name": "army", "driver": "sqlite3", "url": "sqlite::memory:" },
//!     { "name": "hq", "driver": "postgres", "url": "postgres://localhost/hq", "schema": "army" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::{
    dialect::{Binding, Dialect},
    error::{OrmError, Result}
};

/// One database connection target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Datasource {
    /// Name used for lookup in [`Persistence`].
    pub name:   String,
    /// Driver name, e.g. `sqlite3` or `postgres`.
    pub driver: String,
    /// Connection URL handed to the pool.
    pub url:    String,
    /// Postgres schema set as `search_path` on every connection.
    #[serde(default)]
    pub schema: String
}

impl Datasource {
    /// Datasource without a schema.
    #[must_use]
    pub fn new(name: impl Into<String>, driver: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            driver: driver.into(),
            url:    url.into(),
            schema: String::new()
        }
    }

    /// Set the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Dialect for the driver name.
    ///
    /// # Errors
    ///
    /// [`OrmError::UnsupportedDriver`] for unknown drivers.
    pub fn dialect(&self) -> Result<Dialect> {
        Dialect::from_driver(&self.driver)
    }
}

/// All configured datasources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Persistence {
    /// Datasources in declaration order.
    #[serde(default)]
    pub datasources: Vec<Datasource>
}

impl Persistence {
    /// Look up a datasource by name.
    ///
    /// # Errors
    ///
    /// [`OrmError::DatasourceNotFound`] when no datasource has that name.
    pub fn datasource(&self, name: &str) -> Result<&Datasource> {
        self.datasources
            .iter()
            .find(|ds| ds.name == name)
            .ok_or_else(|| OrmError::DatasourceNotFound(name.to_owned()))
    }
}

/// Pool and generator settings for [`EntityManager`](crate::EntityManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManagerOptions {
    /// Upper bound of pooled connections.
    pub max_connections: u32,
    /// How entity values reach generated statements.
    pub binding:         Binding
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            binding:         Binding::Literal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "datasources": [
            { "name": "army", "driver": "sqlite3", "url": "sqlite::memory:" },
            { "name": "hq", "driver": "postgres", "url": "postgres://localhost/hq", "schema": "army" }
        ]
    }"#;

    #[test]
    fn lookup_by_name() {
        let persistence: Persistence = serde_json::from_str(CONFIG).unwrap();
        let army = persistence.datasource("army").unwrap();
        assert_eq!(army.schema, "");
        assert_eq!(army.dialect().unwrap(), Dialect::Sqlite);

        let hq = persistence.datasource("hq").unwrap();
        assert_eq!(hq.schema, "army");
        assert_eq!(hq.dialect().unwrap(), Dialect::Postgres);
    }

    #[test]
    fn unknown_datasource() {
        let persistence: Persistence = serde_json::from_str(CONFIG).unwrap();
        assert!(matches!(
            persistence.datasource("field"),
            Err(OrmError::DatasourceNotFound(name)) if name == "field"
        ));
    }

    #[test]
    fn options_defaults() {
        let options: ManagerOptions = serde_json::from_str(r#"{ "binding": "bound" }"#).unwrap();
        assert_eq!(options.binding, Binding::Bound);
        assert_eq!(options.max_connections, 5);
    }

    #[test]
    fn builder() {
        let ds = Datasource::new("x", "mysql", "mysql://").with_schema("s");
        assert_eq!(ds.schema, "s");
        assert!(matches!(ds.dialect(), Err(OrmError::UnsupportedDriver(_))));
    }
}
