//! The type system: an append-only table of validated definitions.
//!
//! Definitions may only inherit from definitions declared before them.
//! Self-reference is allowed inside type arguments (`Node : IComparable<Node>`)
//! but never as the outer base or interface. Ancestor chains and
//! super-interface graphs are therefore acyclic, and every walk over them
//! terminates.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::descriptor::{DefId, InterfaceTemplate, TypeDef, TypeDescriptor, TypeExpr, TypeKind};
use crate::error::ReflectError;
use crate::parse::{TypeName, parse_type_name};

/// A snapshot of declared types.
///
/// Immutable once built; queries take `&self` and need no locking.
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    defs: Vec<TypeDef>,
    names: HashMap<String, DefId>,
    bindings: HashMap<TypeId, TypeDescriptor>,
}

impl TypeSystem {
    /// Create an empty type system.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next [`define`](Self::define) call will assign.
    ///
    /// Needed to write self-referencing type arguments.
    pub fn next_id(&self) -> DefId {
        DefId(self.defs.len())
    }

    /// Number of defined types.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether no type is defined.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Validate and add a definition.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] if the name is taken, a referenced definition
    /// is unknown or declared later, a supertype has the wrong kind, an arity
    /// does not match, or a parameter index is out of range.
    pub fn define(&mut self, def: TypeDef) -> Result<DefId, ReflectError> {
        if self.names.contains_key(def.name()) {
            return Err(ReflectError::DuplicateType(def.name().to_owned()));
        }
        let mut seen = HashSet::new();
        if let Some(param) = def.params().iter().find(|p| !seen.insert(p.as_str())) {
            return Err(ReflectError::DuplicateParameter {
                name: def.name().to_owned(),
                param: param.clone(),
            });
        }

        let id = self.next_id();
        if let Some(base) = def.base() {
            if def.kind() == TypeKind::Interface {
                return Err(ReflectError::InterfaceWithBase {
                    name: def.name().to_owned(),
                });
            }
            self.check_supertype(&def, id, base, TypeKind::Class)?;
        }
        for interface in def.interfaces() {
            self.check_supertype(&def, id, interface, TypeKind::Interface)?;
        }

        debug!(
            name = def.name(),
            kind = ?def.kind(),
            params = def.params().len(),
            "type defined"
        );
        self.names.insert(def.name().to_owned(), id);
        self.defs.push(def);
        Ok(id)
    }

    fn check_supertype(
        &self,
        def: &TypeDef,
        id: DefId,
        expr: &TypeExpr,
        expected: TypeKind,
    ) -> Result<(), ReflectError> {
        let TypeExpr::Apply { def: target, args } = expr else {
            return Err(ReflectError::ParameterAsSupertype {
                name: def.name().to_owned(),
            });
        };
        if *target == id {
            return Err(ReflectError::SelfInheritance {
                name: def.name().to_owned(),
            });
        }
        let target_def = self.get(*target)?;
        if target_def.kind() != expected {
            return Err(ReflectError::KindMismatch {
                name: def.name().to_owned(),
                target: target_def.name().to_owned(),
                expected,
            });
        }
        check_arity(target_def.name(), target_def.params().len(), args.len())?;
        args.iter()
            .try_for_each(|arg| self.check_argument(def, id, arg))
    }

    fn check_argument(&self, def: &TypeDef, id: DefId, expr: &TypeExpr) -> Result<(), ReflectError> {
        match expr {
            TypeExpr::Param(index) => {
                if *index < def.params().len() {
                    Ok(())
                } else {
                    Err(ReflectError::UnknownParameter {
                        name: def.name().to_owned(),
                        index: *index,
                    })
                }
            }
            TypeExpr::Apply { def: target, args } => {
                let (name, arity) = if *target == id {
                    (def.name(), def.params().len())
                } else {
                    let target_def = self.get(*target)?;
                    (target_def.name(), target_def.params().len())
                };
                check_arity(name, arity, args.len())?;
                args.iter()
                    .try_for_each(|arg| self.check_argument(def, id, arg))
            }
        }
    }

    fn get(&self, id: DefId) -> Result<&TypeDef, ReflectError> {
        self.definition(id).ok_or(ReflectError::UnknownDefinition(id))
    }

    /// The definition behind `id`.
    pub fn definition(&self, id: DefId) -> Option<&TypeDef> {
        self.defs.get(id.0)
    }

    /// Look a definition up by name.
    pub fn lookup(&self, name: &str) -> Option<DefId> {
        self.names.get(name).copied()
    }

    /// Close a definition over `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::UnknownDefinition`] for foreign ids and
    /// [`ReflectError::ArityMismatch`] if `args` does not fit the definition.
    pub fn instantiate(
        &self,
        id: DefId,
        args: Vec<TypeDescriptor>,
    ) -> Result<TypeDescriptor, ReflectError> {
        let def = self.get(id)?;
        check_arity(def.name(), def.params().len(), args.len())?;
        if let Some(foreign) = args.iter().find(|arg| !self.contains(arg)) {
            return Err(ReflectError::UnknownDefinition(foreign.def()));
        }
        Ok(TypeDescriptor::new(id, args))
    }

    /// The descriptor of a non-generic definition.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::ArityMismatch`] if the definition is generic.
    pub fn descriptor(&self, id: DefId) -> Result<TypeDescriptor, ReflectError> {
        self.instantiate(id, Vec::new())
    }

    /// The open template of a generic definition.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::NotGeneric`] for non-generic definitions.
    pub fn open(&self, id: DefId) -> Result<InterfaceTemplate, ReflectError> {
        let def = self.get(id)?;
        if def.is_generic() {
            Ok(InterfaceTemplate::Open(id))
        } else {
            Err(ReflectError::NotGeneric(def.name().to_owned()))
        }
    }

    fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.definition(ty.def())
            .is_some_and(|def| def.params().len() == ty.args().len())
            && ty.args().iter().all(|arg| self.contains(arg))
    }

    /// Parse a closed type such as `ConcreteList<int>`.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] on syntax errors, unknown names, arity
    /// mismatches, or an open `Name<>` form.
    pub fn parse_type(&self, input: &str) -> Result<TypeDescriptor, ReflectError> {
        self.resolve_closed(&parse_type_name(input)?)
    }

    /// Parse a query template: `IEnumerable<>` is open, anything else is a
    /// closed type.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] on syntax errors or unknown names, or if the
    /// open form names a non-generic type.
    pub fn parse_template(&self, input: &str) -> Result<InterfaceTemplate, ReflectError> {
        let parsed = parse_type_name(input)?;
        if parsed.is_open() {
            let id = self
                .lookup(&parsed.name)
                .ok_or_else(|| ReflectError::UnknownType(parsed.name.clone()))?;
            return self.open(id);
        }
        self.resolve_closed(&parsed).map(InterfaceTemplate::Closed)
    }

    fn resolve_closed(&self, parsed: &TypeName) -> Result<TypeDescriptor, ReflectError> {
        if parsed.is_open() {
            return Err(ReflectError::OpenTypeNotAllowed(parsed.name.clone()));
        }
        let id = self
            .lookup(&parsed.name)
            .ok_or_else(|| ReflectError::UnknownType(parsed.name.clone()))?;
        let args = parsed
            .args()
            .iter()
            .map(|arg| self.resolve_closed(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.instantiate(id, args)
    }

    /// Resolve a type expression written inside the definition that will
    /// receive id `this`, named `this_name`, with parameters `params`.
    pub(crate) fn resolve_expr(
        &self,
        parsed: &TypeName,
        this: DefId,
        this_name: &str,
        params: &[String],
    ) -> Result<TypeExpr, ReflectError> {
        if parsed.is_open() {
            return Err(ReflectError::OpenTypeNotAllowed(parsed.name.clone()));
        }
        if parsed.args.is_none() {
            if let Some(index) = params.iter().position(|p| *p == parsed.name) {
                return Ok(TypeExpr::param(index));
            }
        }
        let def = if parsed.name == this_name {
            this
        } else {
            self.lookup(&parsed.name)
                .ok_or_else(|| ReflectError::UnknownType(parsed.name.clone()))?
        };
        let args = parsed
            .args()
            .iter()
            .map(|arg| self.resolve_expr(arg, this, this_name, params))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeExpr::apply(def, args))
    }

    /// Associate a Rust type with a descriptor, so code holding only a
    /// [`TypeId`] (for instance from a structural-change event) can reach
    /// the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::UnknownDefinition`] if `descriptor` does not
    /// belong to this type system.
    pub fn bind<T: ?Sized + 'static>(
        &mut self,
        descriptor: TypeDescriptor,
    ) -> Result<(), ReflectError> {
        if !self.contains(&descriptor) {
            return Err(ReflectError::UnknownDefinition(descriptor.def()));
        }
        debug!(
            rust_type = std::any::type_name::<T>(),
            descriptor = %self.display(&descriptor),
            "rust type bound"
        );
        self.bindings.insert(TypeId::of::<T>(), descriptor);
        Ok(())
    }

    /// The descriptor bound to a Rust type, if any.
    pub fn bound(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.bindings.get(&id)
    }

    /// Render a descriptor as `Name<Arg, ...>`.
    pub const fn display<'a>(&'a self, ty: &'a TypeDescriptor) -> TypeDisplay<'a> {
        TypeDisplay { system: self, ty }
    }

    /// Render a template; open templates print as `Name<>`.
    pub fn display_template(&self, template: &InterfaceTemplate) -> String {
        match template {
            InterfaceTemplate::Open(id) => match self.definition(*id) {
                Some(def) => format!("{}<>", def.name()),
                None => format!("{id}<>"),
            },
            InterfaceTemplate::Closed(ty) => self.display(ty).to_string(),
        }
    }
}

fn check_arity(name: &str, expected: usize, actual: usize) -> Result<(), ReflectError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ReflectError::ArityMismatch {
            name: name.to_owned(),
            expected,
            actual,
        })
    }
}

/// [`Display`](core::fmt::Display) adapter returned by [`TypeSystem::display`].
#[derive(Debug, Clone, Copy)]
pub struct TypeDisplay<'a> {
    system: &'a TypeSystem,
    ty: &'a TypeDescriptor,
}

impl core::fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.system.definition(self.ty.def()) {
            Some(def) => f.write_str(def.name())?,
            None => write!(f, "{}", self.ty.def())?,
        }
        if self.ty.args().is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (position, arg) in self.ty.args().iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.system.display(arg))?;
        }
        f.write_str(">")
    }
}
