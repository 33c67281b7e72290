//! The explicit type model the resolver walks.
//!
//! - [`TypeDef`] -- a declared class or interface: name, generic parameters,
//!   optional base, declared interfaces.
//! - [`TypeExpr`] -- a type as written inside a definition, where generic
//!   parameters may still be unbound.
//! - [`TypeDescriptor`] -- a closed type: a definition plus closed arguments.
//! - [`InterfaceTemplate`] -- what a query asks for: an open generic
//!   definition or a closed type.

use serde::Deserialize;

/// Index of a definition inside its [`TypeSystem`](crate::TypeSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId(pub(crate) usize);

impl DefId {
    /// Position of the definition in declaration order.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for DefId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a definition is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Concrete or abstract type with at most one base.
    Class,
    /// Contract type; may extend other interfaces.
    Interface,
}

/// A type as written inside a definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// The n-th generic parameter of the enclosing definition.
    Param(usize),
    /// A definition applied to arguments (none for non-generic types).
    Apply {
        /// The applied definition.
        def: DefId,
        /// One argument per parameter of `def`.
        args: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    /// Reference to the n-th parameter of the enclosing definition.
    pub const fn param(index: usize) -> Self {
        Self::Param(index)
    }

    /// Reference to a non-generic definition.
    pub const fn named(def: DefId) -> Self {
        Self::Apply {
            def,
            args: Vec::new(),
        }
    }

    /// A generic definition applied to `args`.
    pub const fn apply(def: DefId, args: Vec<Self>) -> Self {
        Self::Apply { def, args }
    }

    /// The outer definition, or `None` for a bare parameter.
    pub const fn def(&self) -> Option<DefId> {
        match self {
            Self::Param(_) => None,
            Self::Apply { def, .. } => Some(*def),
        }
    }

    /// Substitute `args` for the parameters of the enclosing definition.
    ///
    /// Returns `None` if a parameter index is out of range, which validated
    /// definitions never produce.
    pub(crate) fn close(&self, args: &[TypeDescriptor]) -> Option<TypeDescriptor> {
        match self {
            Self::Param(index) => args.get(*index).cloned(),
            Self::Apply { def, args: inner } => {
                let closed = inner
                    .iter()
                    .map(|expr| expr.close(args))
                    .collect::<Option<Vec<_>>>()?;
                Some(TypeDescriptor::new(*def, closed))
            }
        }
    }
}

/// A declared class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    name: String,
    kind: TypeKind,
    params: Vec<String>,
    base: Option<TypeExpr>,
    interfaces: Vec<TypeExpr>,
}

impl TypeDef {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
        }
    }

    /// Start declaring a class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Start declaring an interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Declare generic parameters, in order.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Declare the base class.
    #[must_use]
    pub fn with_base(mut self, base: TypeExpr) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a directly implemented (or, for interfaces, extended) interface.
    #[must_use]
    pub fn implementing(mut self, interface: TypeExpr) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or interface.
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Generic parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the definition has generic parameters.
    pub fn is_generic(&self) -> bool {
        !self.params.is_empty()
    }

    /// The base class, if any.
    pub const fn base(&self) -> Option<&TypeExpr> {
        self.base.as_ref()
    }

    /// Directly declared interfaces.
    pub fn interfaces(&self) -> &[TypeExpr] {
        &self.interfaces
    }
}

/// A closed type: every generic parameter is bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    def: DefId,
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub(crate) const fn new(def: DefId, args: Vec<Self>) -> Self {
        Self { def, args }
    }

    /// The definition this type closes.
    pub const fn def(&self) -> DefId {
        self.def
    }

    /// The closing type arguments; empty for non-generic types.
    pub fn args(&self) -> &[Self] {
        &self.args
    }

    /// Whether this type was built from a generic definition.
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }
}

/// The interface a query asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceTemplate {
    /// A generic definition with its parameters unbound, e.g. `IEnumerable<>`.
    /// Matches any closing of that definition.
    Open(DefId),
    /// A specific closed type. Matches by identity.
    Closed(TypeDescriptor),
}

impl InterfaceTemplate {
    /// The definition the template refers to.
    pub const fn def(&self) -> DefId {
        match self {
            Self::Open(def) => *def,
            Self::Closed(ty) => ty.def,
        }
    }

    /// Whether `candidate` satisfies this template.
    pub fn accepts(&self, candidate: &TypeDescriptor) -> bool {
        match self {
            Self::Open(def) => candidate.def == *def,
            Self::Closed(ty) => candidate == ty,
        }
    }
}

impl From<TypeDescriptor> for InterfaceTemplate {
    fn from(ty: TypeDescriptor) -> Self {
        Self::Closed(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(index: usize) -> TypeDescriptor {
        TypeDescriptor::new(DefId(index), Vec::new())
    }

    #[test]
    fn close_substitutes_nested_parameters() {
        // Pair<T, List<U>> closed with [int, string]
        let expr = TypeExpr::apply(
            DefId(9),
            vec![
                TypeExpr::param(0),
                TypeExpr::apply(DefId(8), vec![TypeExpr::param(1)]),
            ],
        );
        let closed = expr.close(&[leaf(1), leaf(2)]);
        assert_eq!(
            closed,
            Some(TypeDescriptor::new(
                DefId(9),
                vec![leaf(1), TypeDescriptor::new(DefId(8), vec![leaf(2)])],
            ))
        );
    }

    #[test]
    fn close_rejects_out_of_range_parameter() {
        assert_eq!(TypeExpr::param(3).close(&[leaf(1)]), None);
    }

    #[test]
    fn open_template_ignores_arguments() {
        let open = InterfaceTemplate::Open(DefId(4));
        assert!(open.accepts(&TypeDescriptor::new(DefId(4), vec![leaf(1)])));
        assert!(open.accepts(&TypeDescriptor::new(DefId(4), vec![leaf(2)])));
        assert!(!open.accepts(&leaf(5)));
    }

    #[test]
    fn closed_template_needs_identity() {
        let closed = InterfaceTemplate::from(TypeDescriptor::new(DefId(4), vec![leaf(1)]));
        assert!(closed.accepts(&TypeDescriptor::new(DefId(4), vec![leaf(1)])));
        assert!(!closed.accepts(&TypeDescriptor::new(DefId(4), vec![leaf(2)])));
        assert_eq!(closed.def(), DefId(4));
    }
}
