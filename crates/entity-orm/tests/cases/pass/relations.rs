// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Embedded entities and reverse relations.

use entity_orm::{Entity, FieldKind, FieldRef, Record, Value, parse_model};

#[derive(Debug, Default, Entity)]
pub struct Troop {
    #[orm(pk, autoincrement)]
    pub id: i32,

    #[orm(unique)]
    pub name: String,

    #[orm(mapped_by = "Soldier(troop)")]
    pub soldiers: Vec<Soldier>,
}

#[derive(Debug, Default, Entity)]
pub struct Soldier {
    #[orm(pk, autoincrement)]
    pub id: i32,

    #[orm(unique)]
    pub name: String,

    #[orm(fk = "Troop(id)")]
    pub troop: Troop,
}

fn main() {
    assert_eq!(Troop::FIELDS[2].kind, FieldKind::Many);
    assert_eq!(Troop::FIELDS[2].annotation, "mappedBy=Soldier(troop)");
    assert!(matches!(
        Soldier::FIELDS[2].kind,
        FieldKind::Entity { name: "Troop", .. }
    ));

    let troop = parse_model::<Troop>().unwrap();
    assert_eq!(troop.columns.len(), 2);
    assert_eq!(troop.mapped_columns.len(), 1);

    let soldier = parse_model::<Soldier>().unwrap();
    let column = soldier.column("troop").unwrap();
    assert!(column.is_complex);
    assert_eq!(column.column_type_name, "Troop");

    let mut ryan = Soldier::default();
    ryan.nested_mut("troop").unwrap().assign("id", Value::from(7_i32)).unwrap();
    assert_eq!(ryan.troop.id, 7);
    assert!(matches!(ryan.field("troop"), Some(FieldRef::Record(_))));
}
