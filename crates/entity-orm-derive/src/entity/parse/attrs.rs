// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | struct name | Table name |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

/// Struct-level `#[orm(...)]`.
///
/// Shape checks (named struct) happen in
/// [`EntityDef::from_derive_input`](super::EntityDef::from_derive_input) so
/// that both error messages stay in one place.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(orm), allow_unknown_fields)]
pub struct EntityAttrs {
    pub ident: Ident,

    pub generics: Generics,

    #[darling(default)]
    pub table: Option<String>
}
