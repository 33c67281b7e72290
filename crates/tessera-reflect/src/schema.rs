//! Declarative type schemas.
//!
//! A schema is a YAML list of definitions in dependency order:
//!
//! ```yaml
//! types:
//!   - name: IEnumerable
//!     kind: interface
//!     params: [T]
//!   - name: ConcreteList
//!     kind: class
//!     params: [T]
//!     interfaces: ["IEnumerable<T>"]
//! ```
//!
//! Type expressions use the syntax of [`TypeSystem::parse_type`]; names that
//! match one of the entry's `params` refer to that parameter.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::descriptor::{DefId, TypeDef, TypeKind};
use crate::error::{ReflectError, SchemaError};
use crate::parse::parse_type_name;
use crate::system::TypeSystem;

/// A list of type definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TypeSchema {
    /// Definitions in declaration order.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One definition in a [`TypeSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Unique type name.
    pub name: String,

    /// Class or interface.
    pub kind: TypeKind,

    /// Generic parameter names.
    #[serde(default)]
    pub params: Vec<String>,

    /// Base class expression (classes only).
    #[serde(default)]
    pub base: Option<String>,

    /// Implemented (or extended) interface expressions.
    #[serde(default)]
    pub interfaces: Vec<String>,
}

impl TypeSchema {
    /// Load a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read, or
    /// [`SchemaError::Yaml`] if the content is not a valid schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a schema from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Yaml`] if the string is not a valid schema.
    pub fn parse(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

impl TypeSystem {
    /// Build a type system from every entry of `schema`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReflectError`] raised by an entry.
    pub fn from_schema(schema: &TypeSchema) -> Result<Self, ReflectError> {
        let mut system = Self::new();
        for entry in &schema.types {
            system.define_entry(entry)?;
        }
        info!(types = system.len(), "type system loaded from schema");
        Ok(system)
    }

    /// Parse the expressions of one schema entry and define it.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] on syntax errors, unknown names, or any
    /// validation failure of [`define`](Self::define).
    pub fn define_entry(&mut self, entry: &TypeEntry) -> Result<DefId, ReflectError> {
        let this = self.next_id();
        let resolve = |source: &str| {
            parse_type_name(source)
                .and_then(|parsed| self.resolve_expr(&parsed, this, &entry.name, &entry.params))
        };

        let mut def = match entry.kind {
            TypeKind::Class => TypeDef::class(entry.name.as_str()),
            TypeKind::Interface => TypeDef::interface(entry.name.as_str()),
        }
        .with_params(entry.params.iter().cloned());
        if let Some(base) = &entry.base {
            def = def.with_base(resolve(base)?);
        }
        for interface in &entry.interfaces {
            def = def.implementing(resolve(interface)?);
        }
        self.define(def)
    }
}
