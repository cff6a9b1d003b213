// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Named query parameters.
//!
//! Filters and native SQL refer to parameters as `:name`. Before a statement
//! runs, [`compile`] rewrites every reference into the dialect's placeholder
//! and collects the values in placeholder order.
//!
//! ```text
//! Soldier.name = :name OR Soldier.name = :name
//!   sqlite   -> Soldier.name = ? OR Soldier.name = ?      [name, name]
//!   postgres -> Soldier.name = $1 OR Soldier.name = $1    [name]
//! ```
//!
//! Text inside single quotes and `::` casts are left alone.

use std::collections::HashMap;

use crate::{
    dialect::Dialect,
    error::{OrmError, Result},
    value::Value
};

/// Named parameter values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, Value>
}

impl Params {
    /// No parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    ///
    /// ```rust
    /// use entity_orm_core::Params;
    ///
    /// let params = Params::new().with("name", "Ryan").with("troop", 1);
    /// assert_eq!(params.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a parameter, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        }
    }
}

/// Rewrite `:name` references into placeholders.
///
/// # Errors
///
/// [`OrmError::MissingParameter`] for a reference without a value.
pub fn compile(sql: &str, params: &Params, dialect: Dialect) -> Result<(String, Vec<Value>)> {
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut numbered: Vec<String> = Vec::new();
    let mut in_quote = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_quote = !in_quote;
                out.push(c);
            }
            ':' if !in_quote => match chars.peek() {
                Some(':') => {
                    chars.next();
                    out.push_str("::");
                }
                Some(&next) if next.is_ascii_alphabetic() || next == '_' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if !(next.is_ascii_alphanumeric() || next == '_') {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    let value = params
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| OrmError::MissingParameter(name.clone()))?;

                    if dialect.numbered_placeholders() {
                        let index = match numbered.iter().position(|n| *n == name) {
                            Some(index) => index + 1,
                            None => {
                                numbered.push(name);
                                values.push(value);
                                numbered.len()
                            }
                        };
                        out.push_str(&dialect.placeholder(index));
                    } else {
                        values.push(value);
                        out.push_str(&dialect.placeholder(values.len()));
                    }
                }
                _ => out.push(c)
            },
            _ => out.push(c)
        }
    }

    Ok((out, values))
}
