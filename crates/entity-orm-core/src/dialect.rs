// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL dialects and statement generation.
//!
//! A [`Dialect`] is picked once, from the datasource driver name. Statement
//! text comes from a [`SqlGenerator`], which borrows the manager's
//! [`Registry`] to resolve foreign-key chains.
//!
//! # Architecture
//!
//! ```text
//! dialect.rs (Dialect, Binding, Statement, SqlGenerator)
//! ├── types.rs  - kind to SQL type mapping per dialect
//! ├── ddl.rs    - CREATE TABLE / DROP TABLE
//! ├── dml.rs    - INSERT / UPDATE / DELETE
//! └── query.rs  - First / Find with recursive joins
//! ```
//!
//! # Dialect Differences
//!
//! | | SQLite | PostgreSQL |
//! |-|--------|------------|
//! | Auto-increment key | `INTEGER PRIMARY KEY AUTOINCREMENT` | `SERIAL`, key deferred to `PRIMARY KEY (..)` |
//! | Placeholder | `?` | `$1, $2, ...` |
//! | Session setup | `PRAGMA foreign_keys = ON` | `SET search_path TO <schema>` |

mod ddl;
mod dml;
mod query;
mod types;

use std::{fmt, str::FromStr};

use serde::Deserialize;
pub use types::{PostgresTypeMapper, SqliteTypeMapper, TypeMapper};

use crate::{
    error::{OrmError, Result},
    registry::Registry,
    value::Value
};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQLite 3.
    #[default]
    #[serde(alias = "sqlite3")]
    Sqlite,

    /// PostgreSQL.
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres
}

impl Dialect {
    /// Resolve a datasource driver name.
    ///
    /// # Errors
    ///
    /// [`OrmError::UnsupportedDriver`] for unknown names.
    pub fn from_driver(driver: &str) -> Result<Self> {
        match driver.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(OrmError::UnsupportedDriver(other.to_owned()))
        }
    }

    /// Placeholder for the parameter at `index` (1-based).
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Self::Sqlite => "?".to_owned(),
            Self::Postgres => format!("${index}")
        }
    }

    /// Whether a parameter used twice can share one placeholder.
    #[must_use]
    pub const fn numbered_placeholders(&self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Statements run on every new pooled connection.
    #[must_use]
    pub fn session_setup(&self, schema: &str) -> Vec<String> {
        match self {
            Self::Sqlite => vec!["PRAGMA foreign_keys = ON".to_owned()],
            Self::Postgres if schema.trim().is_empty() => Vec::new(),
            Self::Postgres => vec![format!("SET search_path TO {}", schema.trim())]
        }
    }

    /// Type mapper of this dialect.
    #[must_use]
    pub fn type_mapper(&self) -> &'static dyn TypeMapper {
        match self {
            Self::Sqlite => &SqliteTypeMapper,
            Self::Postgres => &PostgresTypeMapper
        }
    }

    /// Generator bound to a registry.
    #[must_use]
    pub const fn generator<'r>(&self, registry: &'r Registry, binding: Binding) -> SqlGenerator<'r> {
        SqlGenerator {
            dialect: *self,
            binding,
            registry
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres"
        }
    }
}

impl FromStr for Dialect {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_driver(s)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How entity values reach the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// Values are embedded as SQL literals.
    #[default]
    Literal,

    /// Values become placeholders and travel in [`Statement::values`].
    Bound
}

impl FromStr for Binding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "bound" => Ok(Self::Bound),
            other => Err(format!("unknown binding mode: {other}"))
        }
    }
}

/// Generated SQL plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    /// Statement text.
    pub sql:    String,
    /// Bound values. Empty in [`Binding::Literal`] mode.
    pub values: Vec<Value>
}

impl Statement {
    /// Statement without bound values.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql:    sql.into(),
            values: Vec::new()
        }
    }
}

/// Renders values as literals or placeholders, collecting bound values.
#[derive(Debug)]
pub(crate) struct Binder {
    dialect: Dialect,
    binding: Binding,
    values:  Vec<Value>
}

impl Binder {
    pub(crate) const fn new(dialect: Dialect, binding: Binding) -> Self {
        Self {
            dialect,
            binding,
            values: Vec::new()
        }
    }

    pub(crate) fn render(&mut self, value: Value) -> String {
        match self.binding {
            Binding::Literal => value.to_literal(),
            Binding::Bound => {
                self.values.push(value);
                self.dialect.placeholder(self.values.len())
            }
        }
    }

    pub(crate) fn finish(self, sql: String) -> Statement {
        Statement {
            sql,
            values: self.values
        }
    }
}

/// Statement generator for one dialect and registry.
#[derive(Debug, Clone, Copy)]
pub struct SqlGenerator<'r> {
    dialect:  Dialect,
    binding:  Binding,
    registry: &'r Registry
}

impl SqlGenerator<'_> {
    /// Dialect in use.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Binding mode in use.
    #[must_use]
    pub const fn binding(&self) -> Binding {
        self.binding
    }

    fn binder(&self) -> Binder {
        Binder::new(self.dialect, self.binding)
    }
}

/// Treat blank filters as absent.
pub(crate) fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_names() {
        assert_eq!(Dialect::from_driver("sqlite3").unwrap(), Dialect::Sqlite);
        assert_eq!(Dialect::from_driver("SQLite").unwrap(), Dialect::Sqlite);
        assert_eq!(Dialect::from_driver("postgres").unwrap(), Dialect::Postgres);
        assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert!(matches!(
            Dialect::from_driver("mysql"),
            Err(OrmError::UnsupportedDriver(name)) if name == "mysql"
        ));
    }

    #[test]
    fn placeholders() {
        assert_eq!(Dialect::Sqlite.placeholder(3), "?");
        assert_eq!(Dialect::Postgres.placeholder(3), "$3");
    }

    #[test]
    fn session_setup() {
        assert_eq!(
            Dialect::Sqlite.session_setup(""),
            ["PRAGMA foreign_keys = ON"]
        );
        assert!(Dialect::Postgres.session_setup(" ").is_empty());
        assert_eq!(
            Dialect::Postgres.session_setup("army"),
            ["SET search_path TO army"]
        );
    }

    #[test]
    fn deserializes_with_aliases() {
        let dialect: Dialect = serde_json::from_str("\"sqlite3\"").unwrap();
        assert_eq!(dialect, Dialect::Sqlite);
        let dialect: Dialect = serde_json::from_str("\"postgresql\"").unwrap();
        assert_eq!(dialect, Dialect::Postgres);
        let binding: Binding = serde_json::from_str("\"bound\"").unwrap();
        assert_eq!(binding, Binding::Bound);
    }

    #[test]
    fn binder_modes() {
        let mut literal = Binder::new(Dialect::Postgres, Binding::Literal);
        assert_eq!(literal.render(Value::from("a")), "'a'");
        assert!(literal.finish(String::new()).values.is_empty());

        let mut bound = Binder::new(Dialect::Postgres, Binding::Bound);
        assert_eq!(bound.render(Value::from("a")), "$1");
        assert_eq!(bound.render(Value::from(2_i32)), "$2");
        let statement = bound.finish("x".into());
        assert_eq!(statement.values, [Value::from("a"), Value::Int(2)]);
    }

    #[test]
    fn blank_filters_are_absent() {
        assert_eq!(normalize_filter(None), None);
        assert_eq!(normalize_filter(Some("  ")), None);
        assert_eq!(normalize_filter(Some(" a = 1 ")), Some("a = 1"));
    }
}
