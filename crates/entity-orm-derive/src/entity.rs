// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! ├── parse/          - EntityDef and FieldDef from the struct
//! ├── descriptor.rs   - impl Entity (NAME, FIELDS)
//! └── record.rs       - impl Record (field, assign, nested_mut)
//! ```
//!
//! Generated code refers to the runtime through `::entity_orm`, so the
//! expansion only compiles in crates depending on the facade.

mod descriptor;
mod parse;
mod record;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: &EntityDef) -> TokenStream {
    let descriptor = descriptor::generate(entity);
    let record = record::generate(entity);

    let expanded = quote! {
        #descriptor
        #record
    };

    expanded.into()
}
