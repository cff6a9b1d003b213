// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Record` generation.
//!
//! | Method | Scalar | Entity | `Vec<T>` / unsupported |
//! |--------|--------|--------|------------------------|
//! | `field` | `FieldRef::Value` | `FieldRef::Record` | `None` |
//! | `assign` | `FromValue` conversion | `UnknownField` | `UnknownField` |
//! | `nested_mut` | `None` | `Some(&mut field)` | `None` |

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generate the `Record` impl.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    let scalar_reads = entity.scalar_fields().map(|f| {
        let name = f.name_str();
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(::entity_orm::FieldRef::Value(
                ::entity_orm::Value::from(::core::clone::Clone::clone(&self.#field))
            ))
        }
    });
    let entity_reads = entity.entity_fields().map(|f| {
        let name = f.name_str();
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(::entity_orm::FieldRef::Record(&self.#field))
        }
    });
    let assigns = entity.scalar_fields().map(|f| {
        let name = f.name_str();
        let field = &f.ident;
        quote! {
            #name => {
                self.#field = ::entity_orm::FromValue::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });
    let nested = entity.entity_fields().map(|f| {
        let name = f.name_str();
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(&mut self.#field)
        }
    });

    let value_param = if entity.scalar_fields().next().is_some() {
        quote! { value }
    } else {
        quote! { _value }
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics ::entity_orm::Record for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<::entity_orm::FieldRef<'_>> {
                match name {
                    #(#scalar_reads,)*
                    #(#entity_reads,)*
                    _ => ::core::option::Option::None
                }
            }

            fn assign(
                &mut self,
                name: &str,
                #value_param: ::entity_orm::Value
            ) -> ::entity_orm::Result<()> {
                match name {
                    #(#assigns,)*
                    _ => ::core::result::Result::Err(::entity_orm::OrmError::UnknownField {
                        table: ::std::string::ToString::to_string(
                            <Self as ::entity_orm::Entity>::NAME
                        ),
                        field: ::std::string::ToString::to_string(name)
                    })
                }
            }

            fn nested_mut(
                &mut self,
                name: &str
            ) -> ::core::option::Option<&mut dyn ::entity_orm::Record> {
                match name {
                    #(#nested,)*
                    _ => ::core::option::Option::None
                }
            }
        }
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
    fn scalars_are_read_and_assigned() {
        let code = expand(syn::parse_quote! {
            pub struct Troop {
                pub id: i32,
                pub name: String,
            }
        });
        assert!(code.contains("\"id\" => :: core :: option :: Option :: Some (:: entity_orm :: FieldRef :: Value"));
        assert!(code.contains("self . name = :: entity_orm :: FromValue :: from_value (value) ?"));
        assert!(code.contains("value : :: entity_orm :: Value"));
    }

    #[test]
    fn entities_are_borrowed_and_nested() {
        let code = expand(syn::parse_quote! {
            pub struct Soldier {
                #[orm(fk = "Troop(id)")]
                pub troop: Troop,
            }
        });
        assert!(code.contains("FieldRef :: Record (& self . troop)"));
        assert!(code.contains("\"troop\" => :: core :: option :: Option :: Some (& mut self . troop)"));
        assert!(code.contains("_value : :: entity_orm :: Value"));
        assert!(!code.contains("from_value"));
    }

    #[test]
    fn many_fields_are_not_exposed() {
        let code = expand(syn::parse_quote! {
            pub struct Troop {
                pub id: i32,
                pub soldiers: Vec<Soldier>,
            }
        });
        assert!(!code.contains("\"soldiers\""));
    }
}
