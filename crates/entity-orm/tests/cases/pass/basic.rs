// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! A flat entity with every scalar kind.

use entity_orm::{Entity, FieldKind, FieldRef, Record, ScalarKind, Value};

#[derive(Debug, Default, Entity)]
pub struct Sample {
    #[orm(pk, autoincrement)]
    pub id: i64,
    pub tiny: i8,
    pub small: i16,
    pub medium: i32,
    pub wide: isize,
    pub byte: u8,
    pub word: u16,
    pub dword: u32,
    pub qword: u64,
    pub size: usize,
    pub ratio: f32,
    pub precise: f64,
    pub active: bool,
    pub grade: char,
    #[orm(unique)]
    pub label: String,
}

fn main() {
    assert_eq!(Sample::NAME, "Sample");
    assert_eq!(Sample::FIELDS.len(), 15);
    assert_eq!(Sample::FIELDS[0].annotation, "pk,autoincrement");
    assert_eq!(Sample::FIELDS[14].kind, FieldKind::Scalar(ScalarKind::String));

    let mut sample = Sample::default();
    sample.assign("label", Value::from("alpha")).unwrap();
    sample.assign("grade", Value::from("b")).unwrap();
    assert_eq!(sample.label, "alpha");
    assert_eq!(sample.grade, 'b');
    assert!(matches!(sample.field("label"), Some(FieldRef::Value(Value::Text(_)))));
    assert!(sample.field("missing").is_none());
    assert!(sample.assign("missing", Value::Null).is_err());
    assert!(sample.nested_mut("label").is_none());
}
