// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use entity_orm::prelude::*;
//! ```

pub use crate::{
    Binding, Datasource, Dialect, Entity, EntityManager, ManagerOptions, OrmError, Params,
    Persistence, QueryResult, Record, Table, Value
};
