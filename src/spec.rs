//! Parsed form of the compact node specifications.
//!
//! A grammar is a base name plus a list of lines of the form
//!
//! ```text
//! Binary : Expr left, Token op, Expr right
//! ```
//!
//! The class name is everything before the first `:`, and the fields
//! are separated by exactly `", "`. Each field is `<type> <name>`, split
//! on the first space. Types are not interpreted in any way.

use rustc_hash::FxHashSet;

use crate::error::{Error, Result, SpecErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub ty: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec<'a> {
    pub class_name: &'a str,
    pub fields: Vec<FieldSpec<'a>>,
    /// The line this was parsed from, kept for diagnostics.
    pub line: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSpec<'a> {
    pub base_name: &'a str,
    pub types: Vec<TypeSpec<'a>>,
}

impl<'a> FieldSpec<'a> {
    pub fn parse(token: &'a str) -> Result<Self, SpecErrorKind> {
        let token = token.trim();
        let Some((ty, name)) = token.split_once(' ') else {
            return Err(SpecErrorKind::MalformedField {
                token: token.to_owned(),
            });
        };
        let ty = ty.trim();
        let name = name.trim();

        if ty.is_empty() || name.is_empty() {
            return Err(SpecErrorKind::MalformedField {
                token: token.to_owned(),
            });
        }
        if !is_identifier(name) {
            return Err(SpecErrorKind::InvalidIdentifier {
                ident: name.to_owned(),
            });
        }

        Ok(FieldSpec { ty, name })
    }
}

impl<'a> TypeSpec<'a> {
    pub fn parse(line: &'a str) -> Result<Self, SpecErrorKind> {
        let Some((class_name, fields)) = line.split_once(':') else {
            return Err(SpecErrorKind::MissingSeparator);
        };
        let class_name = class_name.trim();
        let fields = fields.trim();

        if class_name.is_empty() {
            return Err(SpecErrorKind::EmptyClassName);
        }
        if !is_identifier(class_name) {
            return Err(SpecErrorKind::InvalidIdentifier {
                ident: class_name.to_owned(),
            });
        }
        if fields.is_empty() {
            return Err(SpecErrorKind::EmptyFields);
        }

        let mut seen = FxHashSet::default();
        let mut parsed = Vec::new();
        for token in fields.split(", ") {
            let field = FieldSpec::parse(token)?;
            if !seen.insert(field.name) {
                return Err(SpecErrorKind::DuplicateField {
                    name: field.name.to_owned(),
                });
            }
            parsed.push(field);
        }

        Ok(TypeSpec {
            class_name,
            fields: parsed,
            line,
        })
    }
}

impl<'a> GrammarSpec<'a> {
    /// Parse every line of one grammar, failing on the first bad line.
    ///
    /// Types keep the order of `lines`.
    pub fn parse(base_name: &'a str, lines: &[&'a str]) -> Result<Self> {
        if !is_identifier(base_name) {
            return Err(Error::spec(
                base_name,
                base_name,
                SpecErrorKind::InvalidIdentifier {
                    ident: base_name.to_owned(),
                },
            ));
        }

        let mut seen = FxHashSet::default();
        seen.insert(base_name);

        let mut types = Vec::with_capacity(lines.len());
        for line in lines.iter().copied() {
            let ty = TypeSpec::parse(line).map_err(|kind| Error::spec(base_name, line, kind))?;
            if !seen.insert(ty.class_name) {
                return Err(Error::spec(
                    base_name,
                    line,
                    SpecErrorKind::DuplicateType {
                        name: ty.class_name.to_owned(),
                    },
                ));
            }
            types.push(ty);
        }

        Ok(GrammarSpec { base_name, types })
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
