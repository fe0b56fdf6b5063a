//! Emission of visitor contracts, base types and node types.
//!
//! The layout of an output file is the same for every target:
//!
//! 1. header (namespace or module imports)
//! 2. visitor contract, one method per node type
//! 3. base type exposing the dispatch method
//! 4. one node type per grammar entry, in table order
//!
//! How each of those is spelled is up to a [`Backend`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result, SpecErrorKind};
use crate::spec::{FieldSpec, GrammarSpec, TypeSpec};

macro_rules! ln {
    ($f:ident, $($tt:tt)*) => (writeln!($f, $($tt)*).unwrap());
    ($f:ident) => (writeln!($f).unwrap());
}

macro_rules! ml {
    ($f:ident, $($tt:tt)*) => (indoc::writedoc!($f, $($tt)*).unwrap());
}

mod csharp;
mod rust;

pub use csharp::CSharpBackend;
pub use rust::RustBackend;

/// The three pieces of target syntax derived from one `<type> <name>` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFragments {
    /// Normalized field identifier.
    pub ident: String,
    /// Constructor parameter identifier.
    pub param: String,
    /// e.g. `public Expr Left;`
    pub declaration: String,
    /// e.g. `Expr left`
    pub parameter: String,
    /// e.g. `Left = left;`
    pub assignment: String,
}

pub trait Backend {
    /// File extension of emitted files, without the dot.
    fn extension(&self) -> &'static str;

    fn is_reserved(&self, ident: &str) -> bool;

    /// Name of the visitor method that handles `class_name`.
    fn visit_method(&self, class_name: &str, base_name: &str) -> String;

    /// Name of the node parameter of every visitor method.
    fn visitor_param(&self, base_name: &str) -> String;

    fn field(&self, base_name: &str, field: &FieldSpec<'_>) -> FieldFragments;

    /// Target-specific checks on top of the structural ones done while parsing.
    fn validate(&self, grammar: &GrammarSpec<'_>) -> Result<()> {
        check_identifiers(self, grammar)
    }

    fn emit_header(&self, grammar: &GrammarSpec<'_>, out: &mut String);
    fn emit_visitor(&self, grammar: &GrammarSpec<'_>, out: &mut String);
    fn emit_base(&self, grammar: &GrammarSpec<'_>, out: &mut String);
    fn emit_node(&self, base_name: &str, ty: &TypeSpec<'_>, out: &mut String);
}

/// Rejects keywords of the backend's language among class names, field
/// identifiers, parameters and the visitor parameter, and fields that
/// normalize to the same identifier.
pub fn check_identifiers<B: Backend + ?Sized>(backend: &B, grammar: &GrammarSpec<'_>) -> Result<()> {
    let reserved = |ident: &str| {
        backend
            .is_reserved(ident)
            .then(|| SpecErrorKind::ReservedWord {
                ident: ident.to_owned(),
            })
    };

    let visitor_param = backend.visitor_param(grammar.base_name);
    if let Some(kind) = reserved(&visitor_param) {
        return Err(Error::spec(grammar.base_name, grammar.base_name, kind));
    }

    for ty in &grammar.types {
        let mut found = reserved(ty.class_name);
        let mut seen = FxHashSet::default();
        for field in &ty.fields {
            if found.is_some() {
                break;
            }
            let fragments = backend.field(grammar.base_name, field);
            found = reserved(&fragments.ident).or_else(|| reserved(&fragments.param));
            if found.is_none() && !seen.insert(fragments.ident.clone()) {
                found = Some(SpecErrorKind::DuplicateField {
                    name: fragments.ident,
                });
            }
        }
        if let Some(kind) = found {
            return Err(Error::spec(grammar.base_name, ty.line, kind));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Target {
    #[default]
    CSharp,
    Rust,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = match s {
            "csharp" | "cs" => Target::CSharp,
            "rust" | "rs" => Target::Rust,
            _ => return Err(format!("unknown target {s:?}, expected `csharp` or `rust`")),
        };
        Ok(v)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::CSharp => f.write_str("csharp"),
            Target::Rust => f.write_str("rust"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub target: Target,
    /// C# namespace, or the Rust module path glob-imported by each file.
    /// Uses the target's default when unset.
    pub namespace: Option<String>,
}

impl Options {
    pub fn backend(&self) -> Result<Box<dyn Backend>> {
        let backend: Box<dyn Backend> = match self.target {
            Target::CSharp => {
                let namespace = self.namespace.as_deref().unwrap_or(CSharpBackend::DEFAULT_NAMESPACE);
                Box::new(CSharpBackend::new(namespace)?)
            }
            Target::Rust => {
                let namespace = self.namespace.as_deref().unwrap_or(RustBackend::DEFAULT_NAMESPACE);
                Box::new(RustBackend::new(namespace)?)
            }
        };
        Ok(backend)
    }
}

/// Assemble the full contents of one grammar's output file.
pub fn emit_grammar(grammar: &GrammarSpec<'_>, backend: &dyn Backend) -> String {
    let mut out = String::new();

    backend.emit_header(grammar, &mut out);
    backend.emit_visitor(grammar, &mut out);
    backend.emit_base(grammar, &mut out);
    for ty in &grammar.types {
        backend.emit_node(grammar.base_name, ty, &mut out);
    }

    out
}

/// `<dir>/<base_name>.<ext>`
pub fn output_path(dir: &Path, grammar: &GrammarSpec<'_>, backend: &dyn Backend) -> PathBuf {
    dir.join(format!("{}.{}", grammar.base_name, backend.extension()))
}

/// Emit one grammar into `dir`, replacing any existing file.
pub fn define_ast(dir: &Path, grammar: &GrammarSpec<'_>, backend: &dyn Backend) -> Result<PathBuf> {
    let path = output_path(dir, grammar, backend);
    let out = emit_grammar(grammar, backend);
    write_file(&path, &out)?;
    Ok(path)
}

/// Validate every grammar against the backend, then emit each of them in order.
///
/// Nothing is written if any grammar fails validation.
pub fn generate(dir: &Path, grammars: &[GrammarSpec<'_>], options: &Options) -> Result<Vec<PathBuf>> {
    let backend = options.backend()?;
    for grammar in grammars {
        backend.validate(grammar)?;
    }

    grammars
        .iter()
        .map(|grammar| define_ast(dir, grammar, &*backend))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
    Missing,
}

/// Compare what [`generate`] would write against the files already in `dir`.
pub fn check(
    dir: &Path,
    grammars: &[GrammarSpec<'_>],
    options: &Options,
) -> Result<Vec<(PathBuf, Freshness)>> {
    let backend = options.backend()?;
    for grammar in grammars {
        backend.validate(grammar)?;
    }

    let mut report = Vec::with_capacity(grammars.len());
    for grammar in grammars {
        let path = output_path(dir, grammar, &*backend);
        let expected = emit_grammar(grammar, &*backend);
        let freshness = match std::fs::read_to_string(&path) {
            Ok(actual) if actual == expected => Freshness::Fresh,
            Ok(_) => Freshness::Stale,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Freshness::Missing,
            Err(err) => return Err(Error::io(path, err)),
        };
        report.push((path, freshness));
    }

    Ok(report)
}

/// Writes `contents` to a sibling temporary file, then renames it over `path`,
/// so `path` only ever holds complete output.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(err) = std::fs::write(&tmp, contents) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::io(path, err));
    }
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::io(path, err));
    }

    Ok(())
}

/// Checks a namespace made of `sep`-separated identifier segments.
fn check_namespace(namespace: &str, sep: &str) -> Result<()> {
    if namespace.split(sep).all(crate::spec::is_identifier) {
        Ok(())
    } else {
        Err(Error::InvalidNamespace {
            namespace: namespace.to_owned(),
        })
    }
}
