// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity Manager: the orchestration facade.
//!
//! Owns a connection pool, a [`Dialect`] and a [`Registry`]. Every operation
//! looks up the entity's [`Table`], asks the [`SqlGenerator`] for statement
//! text, runs it on the pool and, for reads, binds the rows back through the
//! marshaller.
//!
//! # Operation Flow
//!
//! ```text
//! first(&mut soldier, filter, params)
//!   │
//!   ├── registry.require("Soldier")          ModelNotFound
//!   ├── params::compile(filter)              MissingParameter
//!   ├── generator.first(table, soldier)      NoPrimaryKey
//!   ├── pool.fetch_optional(sql, values)     Database
//!   └── row::bind_row(row, slots, soldier)   Decode / NotFound
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let manager = EntityManager::connect(&Datasource::new("army", "sqlite3", "sqlite::memory:")).await?;
//! manager.migrate::<Troop>(true, true).await?;
//! manager.insert(&Troop { id: 0, name: "TheBestTeam".into() }).await?;
//!
//! let mut troop = Troop { id: 1, ..Default::default() };
//! manager.first(&mut troop, None, &Params::new()).await?;
//! ```

mod row;

use std::sync::Arc;

use sqlx::{
    Any, AnyPool, Executor, Transaction,
    any::{AnyArguments, AnyPoolOptions, AnyQueryResult, AnyRow, install_default_drivers},
    query::Query
};
use tracing::{debug, info, warn};

use crate::{
    config::{Datasource, ManagerOptions},
    dialect::{Binding, Dialect, SqlGenerator, Statement},
    entity::Entity,
    error::{OrmError, Result},
    marshal::native_read_slots,
    metadata::{Table, parse_model},
    params::{Params, compile},
    registry::Registry,
    value::Value
};

type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Rows changed by the statement.
    pub rows_affected:  u64,
    /// Row id generated by the insert, where the driver reports one.
    pub last_insert_id: Option<i64>
}

impl From<AnyQueryResult> for QueryResult {
    fn from(result: AnyQueryResult) -> Self {
        Self {
            rows_affected:  result.rows_affected(),
            last_insert_id: result.last_insert_id()
        }
    }
}

/// Connection pool, dialect and schema registry of one datasource.
#[derive(Debug)]
pub struct EntityManager {
    pool:     AnyPool,
    dialect:  Dialect,
    binding:  Binding,
    registry: Registry
}

impl EntityManager {
    /// Connect with default [`ManagerOptions`].
    ///
    /// # Errors
    ///
    /// [`OrmError::UnsupportedDriver`] or the driver's connection error.
    pub async fn connect(datasource: &Datasource) -> Result<Self> {
        Self::connect_with(datasource, ManagerOptions::default()).await
    }

    /// Connect and prepare every pooled connection with the dialect's
    /// session setup.
    ///
    /// In-memory SQLite databases live and die with their connection, so the
    /// pool is pinned to one connection that never expires.
    ///
    /// # Errors
    ///
    /// [`OrmError::UnsupportedDriver`] or the driver's connection error.
    pub async fn connect_with(datasource: &Datasource, options: ManagerOptions) -> Result<Self> {
        let dialect = datasource.dialect()?;
        install_default_drivers();

        let setup: Arc<[String]> = dialect.session_setup(&datasource.schema).into();
        let mut pool_options =
            AnyPoolOptions::new().max_connections(options.max_connections.max(1));
        if dialect == Dialect::Sqlite && is_in_memory(&datasource.url) {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .after_connect(move |conn, _meta| {
                let setup = Arc::clone(&setup);
                Box::pin(async move {
                    for sql in setup.iter() {
                        (&mut *conn).execute(sql.as_str()).await?;
                    }
                    Ok(())
                })
            })
            .connect(&datasource.url)
            .await?;

        info!(
            datasource = %datasource.name,
            dialect = %dialect,
            binding = ?options.binding,
            "connected"
        );
        Ok(Self {
            pool,
            dialect,
            binding: options.binding,
            registry: Registry::new()
        })
    }

    /// Wrap an existing pool. Session setup is the caller's business.
    #[must_use]
    pub fn with_pool(pool: AnyPool, dialect: Dialect) -> Self {
        Self {
            pool,
            dialect,
            binding: Binding::default(),
            registry: Registry::new()
        }
    }

    /// Switch the value binding mode.
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Register `T` and optionally (re)create its table.
    ///
    /// With `drop_if_exists` the table is dropped first and its registry entry
    /// removed; a failing drop is logged and skipped. The extracted metadata
    /// is registered before `CREATE TABLE` runs, so a table that already
    /// exists still ends up registered while the driver error is returned.
    ///
    /// # Errors
    ///
    /// Extraction errors, [`OrmError::UnknownType`] from `CREATE`, or the
    /// driver error (e.g. "table already exists").
    pub async fn migrate<T: Entity>(
        &self,
        auto_create: bool,
        drop_if_exists: bool
    ) -> Result<Arc<Table>> {
        let generator = self.generator();
        if drop_if_exists {
            let statement = Statement::new(generator.drop_if_exists(T::NAME));
            if let Err(err) = self.execute(T::NAME, statement).await {
                warn!(table = T::NAME, error = %err, "drop before migrate failed");
            }
            self.registry.remove(T::NAME);
        }

        let table = self.registry.set(parse_model::<T>()?);
        if auto_create {
            let statement = Statement::new(generator.create(&table)?);
            self.execute(&table.name, statement).await?;
        }

        info!(table = %table.name, auto_create, drop_if_exists, "migrated");
        Ok(table)
    }

    /// Drop the table of `T` and forget its metadata.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`] when `T` is not registered, or the driver
    /// error. The registry entry survives a failed drop.
    pub async fn drop_table<T: Entity>(&self) -> Result<()> {
        let table = self.registry.require(T::NAME)?;
        let statement = Statement::new(self.generator().drop(&table.name));
        self.execute(&table.name, statement).await?;
        self.registry.remove(&table.name);
        info!(table = %table.name, "dropped");
        Ok(())
    }

    /// Registered metadata of `T`.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`] when `T` is not registered.
    pub fn model<T: Entity>(&self) -> Result<Arc<Table>> {
        self.registry.require(T::NAME)
    }

    /// Insert one entity.
    ///
    /// On SQLite `last_insert_id` is the generated rowid, read on the same
    /// connection that ran the insert.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`], marshalling errors, or the driver error
    /// (including unique and foreign key violations).
    pub async fn insert<T: Entity>(&self, entity: &T) -> Result<QueryResult> {
        let table = self.registry.require(T::NAME)?;
        let statement = self.generator().insert(&table, entity)?;
        if self.dialect != Dialect::Sqlite {
            return self.execute(&table.name, statement).await;
        }

        trace(&table.name, &statement);
        let Statement { sql, values } = statement;
        let mut conn = self.pool.acquire().await?;
        let mut result: QueryResult = bind_values(sqlx::query(&sql), values)?
            .execute(&mut *conn)
            .await?
            .into();
        if result.last_insert_id.is_none() {
            let rowid: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
                .fetch_one(&mut *conn)
                .await?;
            result.last_insert_id = Some(rowid);
        }
        Ok(result)
    }

    /// Update the row matching the entity's key.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`], [`OrmError::NoPrimaryKey`], or the driver
    /// error.
    pub async fn update<T: Entity>(&self, entity: &T) -> Result<QueryResult> {
        let table = self.registry.require(T::NAME)?;
        let statement = self.generator().update(&table, entity)?;
        self.execute(&table.name, statement).await
    }

    /// Delete rows matching `filter`, or the entity's key without one.
    ///
    /// Zero matching rows is not an error.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`], [`OrmError::NoPrimaryKey`],
    /// [`OrmError::MissingParameter`], or the driver error.
    pub async fn remove<T: Entity>(
        &self,
        entity: &T,
        filter: Option<&str>,
        params: &Params
    ) -> Result<QueryResult> {
        let table = self.registry.require(T::NAME)?;
        let (filter, values) = self.compile_filter(filter, params)?;
        let statement = self.generator().delete(&table, entity, filter.as_deref())?;
        self.execute(&table.name, with_values(statement, values)).await
    }

    /// Load the first row matching `filter` (or the entity's key) into
    /// `entity`, embedded entities included.
    ///
    /// # Errors
    ///
    /// [`OrmError::NotFound`] when nothing matches, plus the errors of
    /// [`remove`](Self::remove) and [`OrmError::Decode`].
    pub async fn first<T: Entity>(
        &self,
        entity: &mut T,
        filter: Option<&str>,
        params: &Params
    ) -> Result<()> {
        let table = self.registry.require(T::NAME)?;
        let generator = self.generator();
        let (filter, values) = self.compile_filter(filter, params)?;
        let statement = generator.first(&table, entity, filter.as_deref())?;
        let slots = generator.slots(&table)?;

        let row = self
            .fetch_optional(&table.name, with_values(statement, values))
            .await?
            .ok_or_else(|| OrmError::NotFound(table.name.clone()))?;
        row::bind_row(&row, &slots, entity)
    }

    /// Load every row matching `filter`.
    ///
    /// # Errors
    ///
    /// [`OrmError::NotFound`] when nothing matches, plus the errors of
    /// [`first`](Self::first).
    pub async fn find<T: Entity + Default>(
        &self,
        filter: Option<&str>,
        params: &Params
    ) -> Result<Vec<T>> {
        let table = self.registry.require(T::NAME)?;
        let generator = self.generator();
        let (filter, values) = self.compile_filter(filter, params)?;
        let statement = generator.find(&table, filter.as_deref())?;
        let slots = generator.slots(&table)?;

        let rows = self.fetch_all(&table.name, with_values(statement, values)).await?;
        if rows.is_empty() {
            return Err(OrmError::NotFound(table.name.clone()));
        }
        rows.iter()
            .map(|row| {
                let mut entity = T::default();
                row::bind_row(row, &slots, &mut entity)?;
                Ok(entity)
            })
            .collect()
    }

    /// Run caller SQL and load the first row into `entity`.
    ///
    /// Cells bind by position to every scalar field, descending into
    /// embedded entities, annotations ignored. `T` does not need to be
    /// migrated.
    ///
    /// # Errors
    ///
    /// [`OrmError::MissingParameter`], [`OrmError::NotFound`],
    /// [`OrmError::Decode`], or the driver error.
    pub async fn native_first<T: Entity>(
        &self,
        entity: &mut T,
        sql: &str,
        params: &Params
    ) -> Result<()> {
        let statement = self.compile_native(sql, params)?;
        let slots = native_read_slots(T::NAME, T::FIELDS);
        let row = self
            .fetch_optional(T::NAME, statement)
            .await?
            .ok_or_else(|| OrmError::NotFound(T::NAME.to_owned()))?;
        row::bind_row(&row, &slots, entity)
    }

    /// Run caller SQL and load every row.
    ///
    /// # Errors
    ///
    /// [`OrmError::NotFound`] when nothing matches, plus the errors of
    /// [`native_first`](Self::native_first).
    pub async fn native_find<T: Entity + Default>(
        &self,
        sql: &str,
        params: &Params
    ) -> Result<Vec<T>> {
        let statement = self.compile_native(sql, params)?;
        let slots = native_read_slots(T::NAME, T::FIELDS);
        let rows = self.fetch_all(T::NAME, statement).await?;
        if rows.is_empty() {
            return Err(OrmError::NotFound(T::NAME.to_owned()));
        }
        rows.iter()
            .map(|row| {
                let mut entity = T::default();
                row::bind_row(row, &slots, &mut entity)?;
                Ok(entity)
            })
            .collect()
    }

    /// Begin a transaction on a pooled connection.
    ///
    /// The transaction holds its connection until commit or rollback. An
    /// in-memory SQLite pool has exactly one connection, so any other call
    /// on this manager waits for the pool's acquire timeout until the
    /// transaction ends. Run statements through the transaction instead.
    ///
    /// # Errors
    ///
    /// The driver error.
    pub async fn tx_begin(&self) -> Result<Transaction<'static, Any>> {
        Ok(self.pool.begin().await?)
    }

    /// Underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Dialect in use.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Value binding mode in use.
    #[must_use]
    pub const fn binding(&self) -> Binding {
        self.binding
    }

    /// Schema registry of this manager.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Close the pool. Later operations fail with the driver's closed-pool
    /// error.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(dialect = %self.dialect, "closed");
    }

    fn generator(&self) -> SqlGenerator<'_> {
        self.dialect.generator(&self.registry, self.binding)
    }

    fn compile_filter(
        &self,
        filter: Option<&str>,
        params: &Params
    ) -> Result<(Option<String>, Vec<Value>)> {
        match filter {
            Some(filter) => {
                let (sql, values) = compile(filter, params, self.dialect)?;
                Ok((Some(sql), values))
            }
            None => Ok((None, Vec::new()))
        }
    }

    fn compile_native(&self, sql: &str, params: &Params) -> Result<Statement> {
        let (sql, values) = compile(sql, params, self.dialect)?;
        Ok(Statement { sql, values })
    }

    async fn execute(&self, table: &str, statement: Statement) -> Result<QueryResult> {
        trace(table, &statement);
        let Statement { sql, values } = statement;
        let result = bind_values(sqlx::query(&sql), values)?
            .execute(&self.pool)
            .await?;
        Ok(result.into())
    }

    async fn fetch_optional(&self, table: &str, statement: Statement) -> Result<Option<AnyRow>> {
        trace(table, &statement);
        let Statement { sql, values } = statement;
        Ok(bind_values(sqlx::query(&sql), values)?
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_all(&self, table: &str, statement: Statement) -> Result<Vec<AnyRow>> {
        trace(table, &statement);
        let Statement { sql, values } = statement;
        Ok(bind_values(sqlx::query(&sql), values)?
            .fetch_all(&self.pool)
            .await?)
    }
}

fn trace(table: &str, statement: &Statement) {
    debug!(
        table,
        sql = %statement.sql,
        param_count = statement.values.len(),
        "executing statement"
    );
}

/// Prepend compiled filter values. At most one of the two is non-empty: a
/// filter replaces the key condition.
fn with_values(mut statement: Statement, mut values: Vec<Value>) -> Statement {
    values.append(&mut statement.values);
    statement.values = values;
    statement
}

fn bind_values(mut query: AnyQuery<'_>, values: Vec<Value>) -> Result<AnyQuery<'_>> {
    for value in values {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Int(v) => query.bind(v),
            Value::UInt(v) => query.bind(i64::try_from(v).map_err(|_| OrmError::Conversion {
                expected: "i64",
                found:    v.to_string()
            })?),
            Value::Float(v) => query.bind(v),
            Value::Bool(v) => query.bind(v),
            Value::Text(v) => query.bind(v)
        };
    }
    Ok(query)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_values_lead() {
        let statement = Statement {
            sql:    "x".into(),
            values: vec![Value::Int(2)]
        };
        let merged = with_values(statement, vec![Value::Int(1)]);
        assert_eq!(merged.values, [Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://army.db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://army.db"));
    }

    #[test]
    fn unsigned_overflow_is_rejected() {
        let bound = bind_values(sqlx::query("SELECT ?"), vec![Value::UInt(u64::MAX)]);
        assert!(matches!(
            bound,
            Err(OrmError::Conversion {
                expected: "i64",
                ..
            })
        ));
    }
}
