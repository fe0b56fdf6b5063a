use std::fmt::Write as _;

use super::{Backend, FieldFragments, check_namespace};
use crate::error::Result;
use crate::grammar::GRAMMAR_VERSION;
use crate::naming;
use crate::spec::{FieldSpec, GrammarSpec, TypeSpec};

/// One `.rs` file per grammar: a `<Base>Visitor<R>` trait, the base as an
/// enum over all nodes, and one struct per node.
///
/// Fields typed as the grammar's own base are boxed.
#[derive(Debug, Clone)]
pub struct RustBackend {
    prelude: String,
}

impl RustBackend {
    pub const DEFAULT_NAMESPACE: &'static str = "super";

    /// `prelude` is glob-imported at the top of every file, so that field
    /// types such as `Token` resolve.
    pub fn new(prelude: &str) -> Result<Self> {
        check_namespace(prelude, "::")?;
        Ok(Self {
            prelude: prelude.to_owned(),
        })
    }
}

impl Backend for RustBackend {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn is_reserved(&self, ident: &str) -> bool {
        KEYWORDS.contains(&ident)
    }

    fn visit_method(&self, class_name: &str, base_name: &str) -> String {
        naming::snake(&naming::visit_method(class_name, base_name))
    }

    fn visitor_param(&self, base_name: &str) -> String {
        naming::snake(base_name)
    }

    fn field(&self, base_name: &str, field: &FieldSpec<'_>) -> FieldFragments {
        let FieldSpec { ty, name } = *field;
        let ident = naming::snake(name);
        let param = ident.clone();

        let (declaration, assignment) = if ty == base_name {
            (
                format!("pub {ident}: Box<{ty}>,"),
                format!("{ident}: Box::new({param}),"),
            )
        } else {
            (format!("pub {ident}: {ty},"), format!("{ident},"))
        };

        FieldFragments {
            declaration,
            parameter: format!("{param}: {ty}"),
            assignment,
            ident,
            param,
        }
    }

    fn emit_header(&self, grammar: &GrammarSpec<'_>, out: &mut String) {
        ml!(
            out,
            "
            //! `{base_name}` syntax tree nodes.
            //!
            //! Generated by astgen (grammar v{GRAMMAR_VERSION}). Do not edit by hand.

            use {prelude}::*;
            ",
            base_name = grammar.base_name,
            prelude = self.prelude,
        );
    }

    fn emit_visitor(&self, grammar: &GrammarSpec<'_>, out: &mut String) {
        let base_name = grammar.base_name;
        let param = self.visitor_param(base_name);

        ln!(out);
        ln!(out, "pub trait {base_name}Visitor<R> {{");
        for ty in &grammar.types {
            let class_name = ty.class_name;
            let method = self.visit_method(class_name, base_name);
            ln!(out, "    fn {method}(&mut self, {param}: &{class_name}) -> R;");
        }
        ln!(out, "}}");
    }

    fn emit_base(&self, grammar: &GrammarSpec<'_>, out: &mut String) {
        let base_name = grammar.base_name;

        ln!(out);
        ln!(out, "#[derive(Debug, Clone)]");
        ln!(out, "pub enum {base_name} {{");
        for ty in &grammar.types {
            ln!(out, "    {name}({name}),", name = ty.class_name);
        }
        ln!(out, "}}");
        ln!(out);
        ln!(out, "impl {base_name} {{");
        ln!(
            out,
            "    pub fn accept<R>(&self, visitor: &mut dyn {base_name}Visitor<R>) -> R {{"
        );
        ln!(out, "        match self {{");
        for ty in &grammar.types {
            ln!(
                out,
                "            {base_name}::{name}(node) => node.accept(visitor),",
                name = ty.class_name
            );
        }
        ln!(out, "        }}");
        ln!(out, "    }}");
        ln!(out, "}}");
    }

    fn emit_node(&self, base_name: &str, ty: &TypeSpec<'_>, out: &mut String) {
        let name = ty.class_name;
        let fields: Vec<_> = ty
            .fields
            .iter()
            .map(|field| self.field(base_name, field))
            .collect();

        ln!(out);
        ln!(out, "#[derive(Debug, Clone)]");
        ln!(out, "pub struct {name} {{");
        for field in &fields {
            ln!(out, "    {}", field.declaration);
        }
        ln!(out, "}}");
        ln!(out);
        ln!(out, "impl {name} {{");
        ln!(
            out,
            "    pub fn new({}) -> Self {{",
            fields.iter().map(|f| f.parameter.as_str()).collect::<Vec<_>>().join(", ")
        );
        ln!(out, "        Self {{");
        for field in &fields {
            ln!(out, "            {}", field.assignment);
        }
        ln!(out, "        }}");
        ln!(out, "    }}");
        ln!(out);
        ml!(
            out,
            "
                pub fn accept<R>(&self, visitor: &mut dyn {base_name}Visitor<R>) -> R {{
                    visitor.{method}(self)
                }}
            }}

            impl From<{name}> for {base_name} {{
                fn from(node: {name}) -> Self {{
                    {base_name}::{name}(node)
                }}
            }}
            ",
            method = self.visit_method(name, base_name),
        );
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];
