// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Entity derive macro.
//!
//! Struct-level `#[orm(table = "...")]` goes through [`darling`]. Field-level
//! `#[orm(...)]` is a token list mixing markers and key-value pairs and is
//! parsed by hand with `parse_nested_meta`.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (EntityDef)
//! ├── attrs.rs            - struct-level darling attributes
//! └── field.rs            - FieldDef
//!     ├── annotation.rs   - #[orm(pk, fk = "..")] to annotation string
//!     └── shape.rs        - field type classification
//! ```

mod attrs;
mod field;

pub use field::{FieldDef, FieldShape};
use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use self::attrs::EntityAttrs;

/// Parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident:    Ident,
    /// Struct generics, forwarded to the impls.
    pub generics: Generics,
    /// Table name.
    pub table:    String,
    /// Fields in declaration order.
    pub fields:   Vec<FieldDef>
}

impl EntityDef {
    /// Parse the derive input.
    ///
    /// # Errors
    ///
    /// Non-struct input, tuple structs and malformed `#[orm(...)]` tokens.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let table = attrs.table.unwrap_or_else(|| attrs.ident.to_string());

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            table,
            fields
        })
    }

    /// Scalar fields, assignable from a decoded value.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.shape.is_scalar())
    }

    /// Embedded entity fields.
    pub fn entity_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.shape.is_entity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_defaults_to_struct_name() {
        let input: DeriveInput = syn::parse_quote! {
            pub struct Soldier {
                #[orm(pk, autoincrement)]
                pub id: i32,
                pub name: String,
            }
        };
        let entity = EntityDef::from_derive_input(&input).unwrap();
        assert_eq!(entity.table, "Soldier");
        assert_eq!(entity.fields.len(), 2);
        assert_eq!(entity.scalar_fields().count(), 2);
    }

    #[test]
    fn table_override() {
        let input: DeriveInput = syn::parse_quote! {
            #[orm(table = "soldiers")]
            pub struct Soldier {
                pub id: i32,
            }
        };
        let entity = EntityDef::from_derive_input(&input).unwrap();
        assert_eq!(entity.table, "soldiers");
    }

    #[test]
    fn splits_scalars_and_entities() {
        let input: DeriveInput = syn::parse_quote! {
            pub struct Soldier {
                #[orm(pk)]
                pub id: i32,
                #[orm(fk = "Troop(id)")]
                pub troop: Troop,
                #[orm(mapped_by = "Medal(soldier)")]
                pub medals: Vec<Medal>,
            }
        };
        let entity = EntityDef::from_derive_input(&input).unwrap();
        let scalars: Vec<_> = entity.scalar_fields().map(FieldDef::name_str).collect();
        let entities: Vec<_> = entity.entity_fields().map(FieldDef::name_str).collect();
        assert_eq!(scalars, ["id"]);
        assert_eq!(entities, ["troop"]);
    }

    #[test]
    fn rejects_tuple_struct() {
        let input: DeriveInput = syn::parse_quote! {
            pub struct Pair(i32, i32);
        };
        assert!(EntityDef::from_derive_input(&input).is_err());
    }

    #[test]
    fn rejects_enum() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum Rank { Private, Sergeant }
        };
        assert!(EntityDef::from_derive_input(&input).is_err());
    }
}
