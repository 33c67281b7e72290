//! Entity notification events for the Tessera framework.
//!
//! The entity subsystem announces every change to an entity's composition or
//! visibility through a closed set of notifications. This crate defines what
//! those notifications are and who may create them. Delivery belongs to the
//! surrounding framework through the [`EventDispatcher`] trait.
//!
//! # Modules
//!
//! - [`event`] -- The [`Event`] marker, [`Notification`] and its kind tag.
//! - [`singleton`] -- Process-wide registry of stateless event kinds.
//! - [`structural`] -- [`DataAdded`] / [`DataRemoved`] events and [`DataType`].
//! - [`entity`] -- [`EntityAuthority`] and [`EntityNotifier`], the only way
//!   to build structural-change events.
//! - [`ids`] -- [`EntityId`].
//! - [`error`] -- [`EventError`].
//!
//! # Usage
//!
//! ```
//! use tessera_events::{HideEntity, ShowEntity, SingletonEvent, instance_of};
//!
//! let first = instance_of::<ShowEntity>();
//! let second = ShowEntity::instance();
//! assert!(std::ptr::eq(first, second));
//!
//! // Distinct kinds never share an instance slot.
//! let _hidden: &'static HideEntity = instance_of::<HideEntity>();
//! ```

pub mod entity;
pub mod error;
pub mod event;
pub mod ids;
pub mod singleton;
pub mod structural;

// Re-export primary types at crate root.
pub use entity::{EntityAuthority, EntityNotifier};
pub use error::EventError;
pub use event::{Event, EventDispatcher, Notification, NotificationKind};
pub use ids::EntityId;
pub use singleton::{Construct, DestroyedEntity, HideEntity, ShowEntity, SingletonEvent, instance_of};
pub use structural::{DataAdded, DataRemoved, DataType};
