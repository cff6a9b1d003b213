// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Entity` generation.
//!
//! ```rust,ignore
//! impl ::entity_orm::Entity for Soldier {
//!     const NAME: &'static str = "Soldier";
//!     const FIELDS: &'static [::entity_orm::FieldDescriptor] = &[
//!         ::entity_orm::FieldDescriptor::new("id", "i32", "pk,autoincrement",
//!             ::entity_orm::FieldKind::Scalar(::entity_orm::ScalarKind::I32)),
//!         ::entity_orm::FieldDescriptor::new("troop", "Troop", "fk=Troop(id)",
//!             ::entity_orm::FieldKind::Entity {
//!                 name: <Troop as ::entity_orm::Entity>::NAME,
//!                 fields: <Troop as ::entity_orm::Entity>::FIELDS,
//!             }),
//!     ];
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{EntityDef, FieldDef, FieldShape};

/// Generate the `Entity` impl.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let table = &entity.table;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();
    let descriptors = entity.fields.iter().map(descriptor);

    quote! {
        #[automatically_derived]
        impl #impl_generics ::entity_orm::Entity for #ident #ty_generics #where_clause {
            const NAME: &'static str = #table;
            const FIELDS: &'static [::entity_orm::FieldDescriptor] = &[
                #(#descriptors),*
            ];
        }
    }
}

fn descriptor(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let type_name = field.type_name();
    let annotation = field.annotation.to_annotation_string();
    let kind = kind(&field.shape);

    quote! {
        ::entity_orm::FieldDescriptor::new(#name, #type_name, #annotation, #kind)
    }
}

fn kind(shape: &FieldShape) -> TokenStream {
    match shape {
        FieldShape::Scalar(scalar) => {
            let variant = format_ident!("{}", scalar.variant());
            quote! { ::entity_orm::FieldKind::Scalar(::entity_orm::ScalarKind::#variant) }
        }
        FieldShape::Entity(path) => quote! {
            ::entity_orm::FieldKind::Entity {
                name:   <#path as ::entity_orm::Entity>::NAME,
                fields: <#path as ::entity_orm::Entity>::FIELDS
            }
        },
        FieldShape::Many => quote! { ::entity_orm::FieldKind::Many },
        FieldShape::Unsupported => quote! { ::entity_orm::FieldKind::Unsupported }
    }
}

#[cfg(test)]
mod tests {
    use syn::DeriveInput;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        let entity = EntityDef::from_derive_input(&input).unwrap();
        generate(&entity).to_string()
    }

    #[test]
    fn name_and_scalar_descriptors() {
        let code = expand(syn::parse_quote! {
            pub struct Troop {
                #[orm(pk, autoincrement)]
                pub id: i32,
                #[orm(unique)]
                pub name: String,
            }
        });
        assert!(code.contains("const NAME : & 'static str = \"Troop\""));
        assert!(code.contains("\"pk,autoincrement\""));
        assert!(code.contains("ScalarKind :: I32"));
        assert!(code.contains("ScalarKind :: String"));
    }

    #[test]
    fn embedded_entity_borrows_descriptors() {
        let code = expand(syn::parse_quote! {
            pub struct Soldier {
                #[orm(fk = "Troop(id)")]
                pub troop: Troop,
            }
        });
        assert!(code.contains("< Troop as :: entity_orm :: Entity > :: NAME"));
        assert!(code.contains("< Troop as :: entity_orm :: Entity > :: FIELDS"));
        assert!(code.contains("\"fk=Troop(id)\""));
    }

    #[test]
    fn many_and_unsupported() {
        let code = expand(syn::parse_quote! {
            pub struct Troop {
                #[orm(mapped_by = "Soldier(troop)")]
                pub soldiers: Vec<Soldier>,
                pub nickname: Option<String>,
            }
        });
        assert!(code.contains("FieldKind :: Many"));
        assert!(code.contains("FieldKind :: Unsupported"));
        assert!(code.contains("\"Vec<Soldier>\""));
        assert!(code.contains("\"Option<String>\""));
    }

    #[test]
    fn table_override_sets_name() {
        let code = expand(syn::parse_quote! {
            #[orm(table = "troops")]
            pub struct Troop {
                pub id: i32,
            }
        });
        assert!(code.contains("\"troops\""));
    }
}
