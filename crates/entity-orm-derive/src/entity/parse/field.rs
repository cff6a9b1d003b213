// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level parsing.
//!
//! # Data Structures
//!
//! ```text
//! FieldDef
//! ├── ident: Ident            (field name, used as the column title)
//! ├── ty: Type                (written type)
//! ├── annotation: Annotation  (#[orm(...)] tokens)
//! └── shape: FieldShape       (Scalar / Entity / Many / Unsupported)
//! ```

mod annotation;
mod shape;

pub use annotation::Annotation;
pub use shape::FieldShape;
use quote::ToTokens;
use syn::{Field, Ident, Type};

/// Parsed struct field.
#[derive(Debug)]
pub struct FieldDef {
    pub ident:      Ident,
    pub ty:         Type,
    pub annotation: Annotation,
    pub shape:      FieldShape
}

impl FieldDef {
    /// Parse one named field.
    ///
    /// # Errors
    ///
    /// Unnamed fields and malformed `#[orm(...)]` tokens.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let annotation = Annotation::from_attrs(&field.attrs)?;
        let shape = FieldShape::classify(&field.ty, annotation.is_ignored());

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            annotation,
            shape
        })
    }

    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Written type without token spacing, e.g. `Vec<Soldier>`.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.ty
            .to_token_stream()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field() {
        let field: Field = syn::parse_quote! {
            #[orm(fk = "Troop(id)")]
            pub troop: Troop
        };
        let def = FieldDef::from_field(&field).unwrap();
        assert_eq!(def.name_str(), "troop");
        assert_eq!(def.type_name(), "Troop");
        assert_eq!(def.annotation.to_annotation_string(), "fk=Troop(id)");
        assert!(def.shape.is_entity());
    }

    #[test]
    fn compact_type_name() {
        let field: Field = syn::parse_quote! {
            pub soldiers: Vec<Soldier>
        };
        let def = FieldDef::from_field(&field).unwrap();
        assert_eq!(def.type_name(), "Vec<Soldier>");
        assert_eq!(def.shape, FieldShape::Many);
    }

    #[test]
    fn ignore_changes_shape() {
        let field: Field = syn::parse_quote! {
            #[orm(ignore)]
            pub cache: Lookup
        };
        let def = FieldDef::from_field(&field).unwrap();
        assert_eq!(def.shape, FieldShape::Unsupported);
    }

    #[test]
    fn malformed_annotation_is_an_error() {
        let field: Field = syn::parse_quote! {
            #[orm(mapped_by = "Soldier")]
            pub soldiers: Vec<Soldier>
        };
        assert!(FieldDef::from_field(&field).is_err());
    }
}
