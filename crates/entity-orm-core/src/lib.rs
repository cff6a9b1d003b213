// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime of entity-orm.
//!
//! Everything `#[derive(Entity)]` generated code and applications need at
//! run time: table metadata, SQL generation per dialect, row marshalling and
//! the async [`EntityManager`].
//!
//! # Overview
//!
//! - [`Entity`] / [`Record`] - implemented by the derive
//! - [`parse_model`] - static field descriptors to [`Table`] metadata
//! - [`Registry`] - migrated tables of one manager
//! - [`Dialect`] / [`SqlGenerator`] - SQLite and PostgreSQL statement text
//! - [`marshal`] - entity values to columns and result cells back to fields
//! - [`EntityManager`] - migrate, CRUD, First/Find and native queries
//! - [`prelude`] - convenient re-exports
//!
//! # Architecture
//!
//! ```text
//! EntityManager
//! ├── Registry ─────────── Table (metadata::parse_model)
//! ├── SqlGenerator ─────── Dialect ── TypeMapper
//! ├── marshal ──────────── Record (derive)
//! └── params::compile ──── :name -> ? / $n
//! ```
//!
//! # Usage
//!
//! Most users depend on `entity-orm`, which re-exports this crate together
//! with the derive. Entities can also be written by hand by implementing
//! [`Entity`] and [`Record`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod manager;
pub mod marshal;
pub mod metadata;
pub mod params;
pub mod prelude;
pub mod registry;
pub mod value;

pub use config::{Datasource, ManagerOptions, Persistence};
pub use dialect::{Binding, Dialect, SqlGenerator, Statement, TypeMapper};
pub use entity::{Entity, FieldDescriptor, FieldKind, FieldRef, Record};
pub use error::{OrmError, Result};
pub use manager::{EntityManager, QueryResult};
pub use marshal::ReadSlot;
pub use metadata::{Column, ForeignKey, MappedBy, PrimaryKey, Table, parse_fields, parse_model};
pub use params::Params;
pub use registry::Registry;
/// Re-export sqlx for transactions and custom queries on the manager's pool.
pub use sqlx;
pub use value::{FromValue, ScalarKind, Value};
