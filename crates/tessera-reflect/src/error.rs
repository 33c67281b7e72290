//! Error types for the `tessera-reflect` crate.
//!
//! Definition and parsing failures return [`ReflectError`]; schema loading
//! wraps them in [`SchemaError`] together with I/O and YAML failures.
//! Resolution itself never fails: "no match" is `None` or `false`.

use crate::descriptor::{DefId, TypeKind};

/// Errors raised while defining types or parsing type expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// A type with this name is already defined.
    #[error("duplicate type name: {0}")]
    DuplicateType(String),

    /// No type with this name is defined.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// The definition id does not belong to this type system.
    #[error("unknown type definition: {0}")]
    UnknownDefinition(DefId),

    /// A generic type was given the wrong number of type arguments.
    #[error("{name} expects {expected} type argument(s), got {actual}")]
    ArityMismatch {
        /// The generic type.
        name: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// A parameter reference is out of range for the definition.
    #[error("{name} has no type parameter #{index}")]
    UnknownParameter {
        /// The definition being declared.
        name: String,
        /// The offending parameter index.
        index: usize,
    },

    /// The same parameter name appears twice in a definition.
    #[error("{name} declares type parameter {param} more than once")]
    DuplicateParameter {
        /// The definition being declared.
        name: String,
        /// The repeated parameter.
        param: String,
    },

    /// A bare type parameter was used as a base or interface.
    #[error("{name} cannot inherit from a bare type parameter")]
    ParameterAsSupertype {
        /// The definition being declared.
        name: String,
    },

    /// A definition names itself as its base or as one of its interfaces.
    #[error("{name} cannot inherit from itself")]
    SelfInheritance {
        /// The definition being declared.
        name: String,
    },

    /// A base must be a class and an interface list must hold interfaces.
    #[error("{name} expects {target} to be a {expected:?}")]
    KindMismatch {
        /// The definition being declared.
        name: String,
        /// The referenced supertype.
        target: String,
        /// The kind the supertype was required to have.
        expected: TypeKind,
    },

    /// Interfaces extend other interfaces; they have no base class.
    #[error("interface {name} cannot declare a base type")]
    InterfaceWithBase {
        /// The interface being declared.
        name: String,
    },

    /// An open template was requested for a non-generic type.
    #[error("{0} is not generic and has no open form")]
    NotGeneric(String),

    /// An open template appeared where a closed type is required.
    #[error("open type {0}<> is not allowed here")]
    OpenTypeNotAllowed(String),

    /// A type expression could not be parsed.
    #[error("cannot parse type {input:?} at byte {position}: {message}")]
    Parse {
        /// The full input.
        input: String,
        /// Byte offset of the failure.
        position: usize,
        /// What was expected.
        message: &'static str,
    },
}

/// Errors raised while loading a type schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Failed to read the schema file from disk.
    #[error("failed to read schema file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse schema YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The schema parsed but describes an invalid type system.
    #[error("invalid schema: {source}")]
    Type {
        /// The underlying definition error.
        #[from]
        source: ReflectError,
    },
}

impl From<serde_yml::Error> for SchemaError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
