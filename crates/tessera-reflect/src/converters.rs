//! Converter lookup keyed by interface template.
//!
//! The serialization layer registers one converter per contract, typically an
//! open template such as `ISerializable<>`. Resolving a data type then picks
//! the first registered contract the type implements and hands back the
//! closed interface, so the converter knows its concrete type arguments.

use std::any::TypeId;

use tracing::debug;

use crate::descriptor::{InterfaceTemplate, TypeDescriptor};
use crate::system::TypeSystem;

/// Ordered table of `(template, converter)` pairs.
#[derive(Debug, Clone)]
pub struct ConverterRegistry<C> {
    entries: Vec<(InterfaceTemplate, C)>,
}

impl<C> Default for ConverterRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ConverterRegistry<C> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a converter. Earlier registrations win on overlap.
    pub fn register(&mut self, template: InterfaceTemplate, converter: C) {
        self.entries.push((template, converter));
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The converter for `ty` and the closed interface it was matched on.
    pub fn resolve(&self, system: &TypeSystem, ty: &TypeDescriptor) -> Option<(TypeDescriptor, &C)> {
        let resolved = self.entries.iter().find_map(|(template, converter)| {
            system
                .find_interface(ty, template)
                .map(|interface| (interface, converter))
        });
        if resolved.is_none() {
            debug!(ty = %system.display(ty), "no converter registered for type");
        }
        resolved
    }

    /// Like [`resolve`](Self::resolve), for a Rust type bound with
    /// [`TypeSystem::bind`].
    pub fn resolve_bound(&self, system: &TypeSystem, id: TypeId) -> Option<(TypeDescriptor, &C)> {
        system.bound(id).and_then(|ty| self.resolve(system, ty))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::descriptor::{TypeDef, TypeExpr};

    #[test]
    fn first_matching_template_wins() {
        let mut system = TypeSystem::new();
        let int = system.define(TypeDef::class("int")).unwrap();
        let text = system.define(TypeDef::interface("IText")).unwrap();
        let codec = system
            .define(TypeDef::interface("ICodec").with_params(["T"]))
            .unwrap();
        let counter = system
            .define(
                TypeDef::class("Counter")
                    .implementing(TypeExpr::named(text))
                    .implementing(TypeExpr::apply(codec, vec![TypeExpr::named(int)])),
            )
            .unwrap();
        let counter = system.descriptor(counter).unwrap();

        let mut registry = ConverterRegistry::new();
        registry.register(system.open(codec).unwrap(), "codec");
        registry.register(InterfaceTemplate::Closed(system.descriptor(text).unwrap()), "text");
        assert_eq!(registry.len(), 2);

        let (interface, converter) = registry.resolve(&system, &counter).unwrap();
        assert_eq!(*converter, "codec");
        assert_eq!(system.display(&interface).to_string(), "ICodec<int>");

        let int = system.descriptor(int).unwrap();
        assert!(registry.resolve(&system, &int).is_none());
    }
}
