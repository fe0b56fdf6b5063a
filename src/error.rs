use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {grammar} spec {line:?}: {kind}")]
    Spec {
        grammar: String,
        line: String,
        kind: SpecErrorKind,
    },

    #[error("invalid namespace {namespace:?}")]
    InvalidNamespace { namespace: String },

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single specification line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecErrorKind {
    #[error("missing `:` between class name and fields")]
    MissingSeparator,

    #[error("class name is empty")]
    EmptyClassName,

    #[error("field list is empty")]
    EmptyFields,

    #[error("field {token:?} is not of the form `<type> <name>`")]
    MalformedField { token: String },

    #[error("{ident:?} is not a valid identifier")]
    InvalidIdentifier { ident: String },

    #[error("duplicate field {name:?}")]
    DuplicateField { name: String },

    #[error("duplicate type {name:?}")]
    DuplicateType { name: String },

    #[error("{ident:?} is a reserved word in the target language")]
    ReservedWord { ident: String },

    #[error("member {name:?} has the same name as its enclosing type")]
    MemberNamedAfterType { name: String },

    #[error("member {name:?} clashes with the generated dispatch method")]
    ClashesWithDispatch { name: String },
}

impl Error {
    pub(crate) fn spec(grammar: &str, line: &str, kind: SpecErrorKind) -> Self {
        Error::Spec {
            grammar: grammar.to_owned(),
            line: line.to_owned(),
            kind,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
