//! Type-descriptor model and generic-aware interface resolution for the
//! Tessera framework.
//!
//! The data/serialization layer needs to know which typed contract a data
//! type satisfies, including open generic contracts such as
//! `IEnumerable<T>`. Rather than rely on host reflection, this crate models
//! types explicitly and resolves against that model.
//!
//! # Modules
//!
//! - [`descriptor`] -- Definitions, type expressions, closed descriptors and
//!   query templates.
//! - [`system`] -- [`TypeSystem`]: validated definitions, parsing, display,
//!   Rust type bindings.
//! - `resolve` -- [`TypeSystem::find_interface`] and
//!   [`TypeSystem::implements`].
//! - [`schema`] -- YAML [`TypeSchema`] loading.
//! - [`converters`] -- [`ConverterRegistry`], converter lookup by contract.
//! - [`error`] -- [`ReflectError`] and [`SchemaError`].
//!
//! # Usage
//!
//! ```
//! use tessera_reflect::{TypeDef, TypeExpr, TypeSystem};
//!
//! let mut types = TypeSystem::new();
//! let int = types.define(TypeDef::class("int")).ok();
//! let enumerable = types
//!     .define(TypeDef::interface("IEnumerable").with_params(["T"]))
//!     .ok();
//! if let (Some(_), Some(enumerable)) = (int, enumerable) {
//!     let list = TypeDef::class("ConcreteList")
//!         .with_params(["T"])
//!         .implementing(TypeExpr::apply(enumerable, vec![TypeExpr::param(0)]));
//!     assert!(types.define(list).is_ok());
//! }
//!
//! let list = types.parse_type("ConcreteList<int>");
//! let open = types.parse_template("IEnumerable<>");
//! if let (Ok(list), Ok(open)) = (list, open) {
//!     let found = types.find_interface(&list, &open);
//!     assert_eq!(found, types.parse_type("IEnumerable<int>").ok());
//!     assert!(types.implements(&list, &open));
//! }
//! ```

pub mod converters;
pub mod descriptor;
pub mod error;
mod parse;
mod resolve;
pub mod schema;
pub mod system;

// Re-export primary types at crate root.
pub use converters::ConverterRegistry;
pub use descriptor::{DefId, InterfaceTemplate, TypeDef, TypeDescriptor, TypeExpr, TypeKind};
pub use error::{ReflectError, SchemaError};
pub use schema::{TypeEntry, TypeSchema};
pub use system::{TypeDisplay, TypeSystem};
