//! Generic-aware interface resolution.
//!
//! Both queries walk the ancestor chain one level per iteration, starting at
//! the queried type and stopping at the first type without a base. At each
//! level the declared interfaces are expanded with the interfaces they extend.
//!
//! - [`TypeSystem::find_interface`] closes every interface against the
//!   current level's type arguments and returns the first one the template
//!   accepts, so an open template yields its closed form.
//! - [`TypeSystem::implements`] works on definitions only: the queried type
//!   is reduced to its generic definition and the template to its definition.

use std::collections::HashSet;

use tracing::trace;

use crate::descriptor::{DefId, InterfaceTemplate, TypeDef, TypeDescriptor, TypeExpr};
use crate::system::TypeSystem;

impl TypeSystem {
    /// Find the interface of `ty` that matches `template`.
    ///
    /// An open template matches any interface built from the same generic
    /// definition and the interface is returned closed, e.g. asking
    /// `ConcreteList<int>` for `IEnumerable<>` yields `IEnumerable<int>`.
    /// A closed template matches only itself. Returns `None` once the
    /// ancestor chain is exhausted.
    pub fn find_interface(
        &self,
        ty: &TypeDescriptor,
        template: &InterfaceTemplate,
    ) -> Option<TypeDescriptor> {
        let mut current = Some(ty.clone());
        while let Some(level) = current {
            let def = self.definition(level.def())?;
            if let Some(found) = self
                .closed_interfaces(def, level.args())
                .into_iter()
                .find(|interface| template.accepts(interface))
            {
                trace!(
                    ty = %self.display(ty),
                    declared_on = def.name(),
                    found = %self.display(&found),
                    "interface resolved"
                );
                return Some(found);
            }
            current = def.base().and_then(|base| base.close(level.args()));
        }
        None
    }

    /// Whether the generic definition of `ty`, or one of its ancestors,
    /// implements the definition of `template`.
    ///
    /// Type arguments are ignored on both sides: `ConcreteList<int>` and
    /// `ConcreteList<string>` give the same answer, and a closed generic
    /// template is treated like its open form.
    pub fn implements(&self, ty: &TypeDescriptor, template: &InterfaceTemplate) -> bool {
        let target = template.def();
        let mut current = Some(ty.def());
        while let Some(id) = current {
            let Some(def) = self.definition(id) else {
                return false;
            };
            if self.interface_defs(def).contains(&target) {
                return true;
            }
            current = def.base().and_then(TypeExpr::def);
        }
        false
    }

    /// Every interface `ty` implements, nearest level first, closed.
    pub fn all_interfaces(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        let mut found = Vec::new();
        let mut current = Some(ty.clone());
        while let Some(level) = current {
            let Some(def) = self.definition(level.def()) else {
                break;
            };
            for interface in self.closed_interfaces(def, level.args()) {
                if !found.contains(&interface) {
                    found.push(interface);
                }
            }
            current = def.base().and_then(|base| base.close(level.args()));
        }
        found
    }

    /// `ty` followed by each of its ancestors, closed.
    pub fn ancestors(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        let mut chain = Vec::new();
        let mut current = Some(ty.clone());
        while let Some(level) = current {
            current = self
                .definition(level.def())
                .and_then(TypeDef::base)
                .and_then(|base| base.close(level.args()));
            chain.push(level);
        }
        chain
    }

    /// Interfaces declared on one level, closed against `args`, followed
    /// depth-first by the interfaces they extend. Duplicates are dropped.
    fn closed_interfaces(&self, def: &TypeDef, args: &[TypeDescriptor]) -> Vec<TypeDescriptor> {
        let mut found: Vec<TypeDescriptor> = Vec::new();
        let mut pending: Vec<TypeDescriptor> = def
            .interfaces()
            .iter()
            .rev()
            .filter_map(|expr| expr.close(args))
            .collect();
        while let Some(interface) = pending.pop() {
            if found.contains(&interface) {
                continue;
            }
            if let Some(interface_def) = self.definition(interface.def()) {
                pending.extend(
                    interface_def
                        .interfaces()
                        .iter()
                        .rev()
                        .filter_map(|expr| expr.close(interface.args())),
                );
            }
            found.push(interface);
        }
        found
    }

    /// Definitions of the interfaces declared on `def` and everything they
    /// extend.
    fn interface_defs(&self, def: &TypeDef) -> HashSet<DefId> {
        let mut seen = HashSet::new();
        let mut pending: Vec<DefId> = def.interfaces().iter().filter_map(TypeExpr::def).collect();
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(interface_def) = self.definition(id) {
                pending.extend(interface_def.interfaces().iter().filter_map(TypeExpr::def));
            }
        }
        seen
    }
}
