use std::fmt::Write as _;

use super::{Backend, FieldFragments, check_identifiers, check_namespace};
use crate::error::{Error, Result, SpecErrorKind};
use crate::grammar::GRAMMAR_VERSION;
use crate::naming;
use crate::spec::{FieldSpec, GrammarSpec, TypeSpec};

/// One `.cs` file per grammar: an `I<Base>Visitor<T>` interface, an
/// abstract `<Base>` class and one subclass per node.
#[derive(Debug, Clone)]
pub struct CSharpBackend {
    namespace: String,
}

impl CSharpBackend {
    pub const DEFAULT_NAMESPACE: &'static str = "CSLox";

    pub fn new(namespace: &str) -> Result<Self> {
        check_namespace(namespace, ".")?;
        Ok(Self {
            namespace: namespace.to_owned(),
        })
    }

    fn visitor_interface(base_name: &str) -> String {
        format!("I{base_name}Visitor")
    }
}

impl Backend for CSharpBackend {
    fn extension(&self) -> &'static str {
        "cs"
    }

    fn is_reserved(&self, ident: &str) -> bool {
        KEYWORDS.contains(&ident)
    }

    fn visit_method(&self, class_name: &str, base_name: &str) -> String {
        naming::visit_method(class_name, base_name)
    }

    fn visitor_param(&self, base_name: &str) -> String {
        naming::camel(base_name)
    }

    fn field(&self, _: &str, field: &FieldSpec<'_>) -> FieldFragments {
        let FieldSpec { ty, name } = *field;
        let ident = naming::pascal(name);
        let param = name.to_owned();

        FieldFragments {
            declaration: format!("public {ty} {ident};"),
            parameter: format!("{ty} {param}"),
            assignment: format!("{ident} = {param};"),
            ident,
            param,
        }
    }

    fn validate(&self, grammar: &GrammarSpec<'_>) -> Result<()> {
        check_identifiers(self, grammar)?;

        for ty in &grammar.types {
            for field in &ty.fields {
                let ident = naming::pascal(field.name);
                let kind = if ident == ty.class_name {
                    SpecErrorKind::MemberNamedAfterType { name: ident }
                } else if ident == "Accept" {
                    SpecErrorKind::ClashesWithDispatch { name: ident }
                } else {
                    continue;
                };
                return Err(Error::spec(grammar.base_name, ty.line, kind));
            }
        }

        Ok(())
    }

    fn emit_header(&self, _: &GrammarSpec<'_>, out: &mut String) {
        ml!(
            out,
            "
            // <auto-generated>
            // Generated by astgen (grammar v{GRAMMAR_VERSION}). Do not edit by hand.
            // </auto-generated>

            namespace {namespace};
            ",
            namespace = self.namespace,
        );
    }

    fn emit_visitor(&self, grammar: &GrammarSpec<'_>, out: &mut String) {
        let base_name = grammar.base_name;
        let param = self.visitor_param(base_name);

        ln!(out);
        ln!(out, "public interface {}<T>", Self::visitor_interface(base_name));
        ln!(out, "{{");
        for ty in &grammar.types {
            let class_name = ty.class_name;
            let method = self.visit_method(class_name, base_name);
            ln!(out, "    T {method}({class_name} {param});");
        }
        ln!(out, "}}");
    }

    fn emit_base(&self, grammar: &GrammarSpec<'_>, out: &mut String) {
        ln!(out);
        ml!(
            out,
            "
            public abstract class {base_name}
            {{
                public abstract T Accept<T>({visitor}<T> visitor);
            }}
            ",
            base_name = grammar.base_name,
            visitor = Self::visitor_interface(grammar.base_name),
        );
    }

    fn emit_node(&self, base_name: &str, ty: &TypeSpec<'_>, out: &mut String) {
        let name = ty.class_name;
        let fields: Vec<_> = ty
            .fields
            .iter()
            .map(|field| self.field(base_name, field))
            .collect();

        ln!(out);
        ln!(out, "public class {name} : {base_name}");
        ln!(out, "{{");
        for field in &fields {
            ln!(out, "    {}", field.declaration);
        }
        ln!(out);
        ln!(
            out,
            "    public {name}({})",
            fields.iter().map(|f| f.parameter.as_str()).collect::<Vec<_>>().join(", ")
        );
        ln!(out, "    {{");
        for field in &fields {
            ln!(out, "        {}", field.assignment);
        }
        ln!(out, "    }}");
        ln!(out);
        ml!(
            out,
            "
                public override T Accept<T>({visitor}<T> visitor)
                {{
                    return visitor.{method}(this);
                }}
            }}
            ",
            visitor = Self::visitor_interface(base_name),
            method = self.visit_method(name, base_name),
        );
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];
