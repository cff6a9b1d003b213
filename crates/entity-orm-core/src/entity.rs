// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Traits implemented by `#[derive(Entity)]`.
//!
//! The derive replaces runtime reflection with two pieces of generated code:
//!
//! - [`Entity`] carries static [`FieldDescriptor`]s, one per field in
//!   declaration order. [`parse_model`](crate::parse_model) turns them into a
//!   [`Table`](crate::Table).
//! - [`Record`] gives object-safe access to field values by name, so the
//!   marshaller can walk nested entities without knowing their types.
//!
//! # Generated Shape
//!
//! ```rust,ignore
//! #[derive(Entity, Default)]
//! pub struct Soldier {
//!     #[orm(pk, autoincrement)]
//!     pub id: i32,
//!     #[orm(fk = "Troop(id)")]
//!     pub troop: Troop,
//! }
//!
//! // expands to roughly
//! impl Entity for Soldier {
//!     const NAME: &'static str = "Soldier";
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::new("id", "i32", "pk,autoincrement", FieldKind::Scalar(ScalarKind::I32)),
//!         FieldDescriptor::new("troop", "Troop", "fk=Troop(id)", FieldKind::Entity {
//!             name:   <Troop as Entity>::NAME,
//!             fields: <Troop as Entity>::FIELDS,
//!         }),
//!     ];
//! }
//! ```

use crate::{error::Result, value::{ScalarKind, Value}};

/// Shape of a field as seen by the derive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// A primitive with a direct column mapping.
    Scalar(ScalarKind),

    /// An embedded entity (many-to-one relation).
    Entity {
        /// Table name of the embedded type.
        name:   &'static str,
        /// Field descriptors of the embedded type.
        fields: &'static [FieldDescriptor]
    },

    /// A `Vec<T>`, the reverse side of a relation.
    Many,

    /// A type without a column mapping.
    Unsupported
}

/// Static description of one struct field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Field identifier, used verbatim as the column title.
    pub name:       &'static str,
    /// Declared type as written in the struct.
    pub type_name:  &'static str,
    /// Comma separated annotation tokens.
    pub annotation: &'static str,
    /// Field shape.
    pub kind:       FieldKind
}

impl FieldDescriptor {
    /// Build a descriptor. Used by generated code.
    #[must_use]
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        annotation: &'static str,
        kind: FieldKind
    ) -> Self {
        Self {
            name,
            type_name,
            annotation,
            kind
        }
    }
}

/// Borrowed view of a field value.
pub enum FieldRef<'a> {
    /// A scalar field, already converted.
    Value(Value),
    /// An embedded entity.
    Record(&'a dyn Record)
}

/// By-name access to an entity's fields.
///
/// Object safe so that embedded entities can be traversed as `&dyn Record`.
pub trait Record: Send + Sync {
    /// Read a field. Returns `None` for unknown names and for fields that
    /// have no scalar or entity representation (`Vec<T>`, unsupported types).
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Overwrite a scalar field from a decoded value.
    ///
    /// # Errors
    ///
    /// [`OrmError::UnknownField`](crate::OrmError::UnknownField) for names
    /// that are not assignable scalars, or a conversion error when the value
    /// does not fit the field type.
    fn assign(&mut self, name: &str, value: Value) -> Result<()>;

    /// Mutable access to an embedded entity.
    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn Record>;
}

/// A persistable type.
pub trait Entity: Record + Sized {
    /// Table name.
    const NAME: &'static str;

    /// Field descriptors in declaration order.
    const FIELDS: &'static [FieldDescriptor];
}
