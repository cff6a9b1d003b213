// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table override, ignored fields and pass-through tokens.

use entity_orm::{Entity, FieldKind, parse_model};

/// Not an entity; only allowed because the field is ignored.
#[derive(Debug, Default)]
pub struct Cache {
    pub hits: u32,
}

#[derive(Debug, Default, Entity)]
#[orm(table = "medals")]
pub struct Medal {
    #[orm(pk)]
    #[orm(audit)]
    pub code: String,

    #[orm(label = "display name")]
    pub title: String,

    #[orm(ignore)]
    pub cache: Cache,

    #[orm(ignore)]
    pub note: Option<String>,
}

fn main() {
    assert_eq!(Medal::NAME, "medals");
    assert_eq!(Medal::FIELDS[0].annotation, "pk,audit");
    assert_eq!(Medal::FIELDS[1].annotation, "label=display name");
    assert_eq!(Medal::FIELDS[2].kind, FieldKind::Unsupported);
    assert_eq!(Medal::FIELDS[3].type_name, "Option<String>");

    let table = parse_model::<Medal>().unwrap();
    assert_eq!(table.name, "medals");
    assert_eq!(table.primary_keys.len(), 1);
    assert!(table.column("cache").unwrap().ignore);
}
