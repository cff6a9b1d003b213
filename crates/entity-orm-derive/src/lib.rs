// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Proc-macro implementation of `#[derive(Entity)]` for entity-orm.
//!
//! Use the `entity-orm` crate, which re-exports this derive together with the
//! runtime its expansion refers to.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod entity;

use proc_macro::TokenStream;

/// Derive table metadata and by-name field access for a struct.
///
/// # Overview
///
/// Generates two impls consumed by the entity-orm runtime:
///
/// - **`Entity`**: the table name and one static field descriptor per field,
///   in declaration order
/// - **`Record`**: read, assign and descend into fields by name, so rows can
///   be bound into nested entities without reflection
///
/// # Entity Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `#[orm(table = "...")]` | struct name | Table name |
///
/// # Field Attributes
///
/// Tokens inside `#[orm(...)]`, any number per field:
///
/// | Token | Description |
/// |-------|-------------|
/// | `pk` | Primary key column. Several make a composite key. |
/// | `unique` | Unique column. Also used as the lookup key when no `pk` exists. |
/// | `autoincrement` | Database generated value, never written. |
/// | `ignore` | Not persisted and never selected. |
/// | `fk = "Table(Column)"` | Foreign key. On an embedded entity it names the referenced key field. |
/// | `mapped_by = "Table(Column)"` | Reverse side of a relation (`mappedBy` also accepted). Not persisted. |
///
/// Unknown tokens are kept in the annotation string and ignored at run time.
///
/// # Field Types
///
/// | Type | Kind |
/// |------|------|
/// | `i8`..`i64`, `isize`, `u8`..`u64`, `usize`, `f32`, `f64`, `bool`, `char`, `String` | scalar column |
/// | `Vec<T>` | reverse relation |
/// | `Option<T>`, `i128`, `u128`, tuples, arrays, references | unsupported, needs `ignore` to persist the entity |
/// | any other path | embedded entity, must derive `Entity` itself |
///
/// An ignored field of an entity-like type is treated as unsupported, so it
/// does not need to implement `Entity`.
///
/// # Example
///
/// ```rust,ignore
/// use entity_orm::Entity;
///
/// #[derive(Entity, Default)]
/// pub struct Troop {
///     #[orm(pk, autoincrement)]
///     pub id: i32,
///
///     #[orm(unique)]
///     pub name: String,
///
///     #[orm(mapped_by = "Soldier(troop)")]
///     pub soldiers: Vec<Soldier>,
/// }
///
/// #[derive(Entity, Default)]
/// pub struct Soldier {
///     #[orm(pk, autoincrement)]
///     pub id: i32,
///
///     #[orm(unique)]
///     pub name: String,
///
///     #[orm(fk = "Troop(id)")]
///     pub troop: Troop,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
