// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level `#[orm(...)]` parsing.
//!
//! The tokens are re-serialized into the runtime's annotation string, which
//! the metadata extractor parses again at migrate time:
//!
//! | Attribute | Annotation |
//! |-----------|------------|
//! | `#[orm(pk, autoincrement)]` | `pk,autoincrement` |
//! | `#[orm(fk = "Troop(id)")]` | `fk=Troop(id)` |
//! | `#[orm(mapped_by = "Soldier(troop)")]` | `mappedBy=Soldier(troop)` |
//! | `#[orm(audit = "x")]` | `audit=x` (kept, ignored at run time) |
//!
//! Several `#[orm]` attributes on one field are concatenated in order.
//! Values may not contain `,`, the token separator.

use syn::{Attribute, Lit, LitStr, Meta, meta::ParseNestedMeta};

/// Annotation tokens of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    tokens: Vec<String>,
    ignore: bool
}

impl Annotation {
    /// Collect every `#[orm(...)]` attribute of a field.
    ///
    /// # Errors
    ///
    /// Malformed `fk`/`mapped_by` values or a `Table(Column)` reference
    /// without parentheses.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut annotation = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("orm")) {
            if let Meta::List(list) = &attr.meta {
                list.parse_nested_meta(|meta| annotation.push(&meta))?;
            }
        }
        Ok(annotation)
    }

    fn push(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        let key = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .ok_or_else(|| meta.error("expected a single identifier"))?;

        match key.as_str() {
            "pk" | "unique" | "autoincrement" => self.tokens.push(key),
            "ignore" => {
                self.ignore = true;
                self.tokens.push(key);
            }
            "fk" => {
                let reference = parse_reference(meta)?;
                self.tokens.push(format!("fk={reference}"));
            }
            "mapped_by" | "mappedBy" => {
                let reference = parse_reference(meta)?;
                self.tokens.push(format!("mappedBy={reference}"));
            }
            _ if meta.input.peek(syn::Token![=]) => {
                let lit: Lit = meta.value()?.parse()?;
                let value = match &lit {
                    Lit::Str(s) => s.value(),
                    other => quote::quote!(#other).to_string()
                };
                if value.contains(',') {
                    return Err(syn::Error::new(
                        lit.span(),
                        "annotation values cannot contain ','"
                    ));
                }
                self.tokens.push(format!("{key}={value}"));
            }
            _ => self.tokens.push(key)
        }
        Ok(())
    }

    /// Comma-joined tokens.
    pub fn to_annotation_string(&self) -> String {
        self.tokens.join(",")
    }

    /// Whether `ignore` was given.
    pub const fn is_ignored(&self) -> bool {
        self.ignore
    }
}

/// `= "Table(Column)"`, checked for shape.
fn parse_reference(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let lit: LitStr = meta.value()?.parse()?;
    let value = lit.value().replace(' ', "");
    let well_formed = value
        .split_once('(')
        .is_some_and(|(table, rest)| {
            !table.is_empty()
                && rest.len() > 1
                && rest.ends_with(')')
                && !rest.contains('(')
                && !value.contains(',')
        });
    if well_formed {
        Ok(value)
    } else {
        Err(syn::Error::new(
            lit.span(),
            "expected a reference of the form \"Table(Column)\""
        ))
    }
}
