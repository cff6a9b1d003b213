// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Annotation-driven ORM for SQLite and PostgreSQL.
//!
//! Derive [`Entity`] on a struct, migrate it through an [`EntityManager`] and
//! persist instances without writing SQL. Embedded entities become foreign
//! keys and are loaded back through joins.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use entity_orm::prelude::*;
//!
//! #[derive(Entity, Debug, Default)]
//! pub struct Troop {
//!     #[orm(pk, autoincrement)]
//!     pub id: i32,
//!     #[orm(unique)]
//!     pub name: String,
//! }
//!
//! #[derive(Entity, Debug, Default)]
//! pub struct Soldier {
//!     #[orm(pk, autoincrement)]
//!     pub id: i32,
//!     #[orm(unique)]
//!     pub name: String,
//!     #[orm(fk = "Troop(id)")]
//!     pub troop: Troop,
//! }
//!
//! let manager = EntityManager::connect(&Datasource::new("army", "sqlite3", "sqlite::memory:")).await?;
//! manager.migrate::<Troop>(true, true).await?;
//! manager.migrate::<Soldier>(true, true).await?;
//!
//! manager.insert(&Troop { name: "TheBestTeam".into(), ..Default::default() }).await?;
//! manager.insert(&Soldier { name: "Ryan".into(), troop: Troop { id: 1, ..Default::default() }, ..Default::default() }).await?;
//!
//! let mut ryan = Soldier { id: 1, ..Default::default() };
//! manager.first(&mut ryan, None, &Params::new()).await?;
//! assert_eq!(ryan.troop.name, "TheBestTeam");
//!
//! let named: Vec<Soldier> = manager
//!     .find(Some("Soldier.name = :name"), &Params::new().with("name", "Ryan"))
//!     .await?;
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `entity-orm-core` | metadata, dialects, marshalling, manager |
//! | `entity-orm-derive` | `#[derive(Entity)]` |
//! | `entity-orm` | this facade |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Re-export all core types
pub use entity_orm_core::*;
// Re-export derive macro
pub use entity_orm_derive::Entity;

/// Convenient re-exports, including the derive.
pub mod prelude {
    pub use entity_orm_core::prelude::*;
    pub use entity_orm_derive::Entity;
}
