//! The event marker, the closed notification set, and the dispatcher seam.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::singleton::{DestroyedEntity, HideEntity, ShowEntity};
use crate::structural::{DataAdded, DataRemoved, DataType};

/// Marker for values that are valid notification payloads.
///
/// Carries no behavior. The bounds let a payload cross dispatcher threads
/// and live in the process-wide singleton registry.
pub trait Event: Send + Sync + 'static {}

/// Payload-free tag identifying which change a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The entity became visible.
    VisibilityShown,
    /// The entity became hidden.
    VisibilityHidden,
    /// The entity was destroyed.
    EntityDestroyed,
    /// A data instance was attached to the entity.
    DataAdded,
    /// A data instance was detached from the entity.
    DataRemoved,
}

/// A notification emitted by the entity subsystem.
///
/// Stateless kinds refer to their process-wide singleton; structural kinds
/// carry their event by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// See [`NotificationKind::VisibilityShown`].
    VisibilityShown(&'static ShowEntity),
    /// See [`NotificationKind::VisibilityHidden`].
    VisibilityHidden(&'static HideEntity),
    /// See [`NotificationKind::EntityDestroyed`].
    EntityDestroyed(&'static DestroyedEntity),
    /// See [`NotificationKind::DataAdded`].
    DataAdded(DataAdded),
    /// See [`NotificationKind::DataRemoved`].
    DataRemoved(DataRemoved),
}

impl Notification {
    /// The tag of this notification.
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::VisibilityShown(_) => NotificationKind::VisibilityShown,
            Self::VisibilityHidden(_) => NotificationKind::VisibilityHidden,
            Self::EntityDestroyed(_) => NotificationKind::EntityDestroyed,
            Self::DataAdded(_) => NotificationKind::DataAdded,
            Self::DataRemoved(_) => NotificationKind::DataRemoved,
        }
    }

    /// The data type a structural change concerns, if any.
    pub const fn subject_type(&self) -> Option<DataType> {
        match self {
            Self::DataAdded(event) => Some(event.subject_type()),
            Self::DataRemoved(event) => Some(event.subject_type()),
            Self::VisibilityShown(_) | Self::VisibilityHidden(_) | Self::EntityDestroyed(_) => {
                None
            }
        }
    }
}

impl Event for Notification {}

impl From<DataAdded> for Notification {
    fn from(event: DataAdded) -> Self {
        Self::DataAdded(event)
    }
}

impl From<DataRemoved> for Notification {
    fn from(event: DataRemoved) -> Self {
        Self::DataRemoved(event)
    }
}

/// Delivery mechanism supplied by the surrounding framework.
///
/// Ordering across subscribers, retries and persistence are the
/// implementor's concern.
pub trait EventDispatcher {
    /// Deliver `notification`, which concerns `entity`.
    fn dispatch(&self, entity: EntityId, notification: Notification);
}

impl<D: EventDispatcher + ?Sized> EventDispatcher for &D {
    fn dispatch(&self, entity: EntityId, notification: Notification) {
        (**self).dispatch(entity, notification);
    }
}

impl<D: EventDispatcher + ?Sized> EventDispatcher for Box<D> {
    fn dispatch(&self, entity: EntityId, notification: Notification) {
        (**self).dispatch(entity, notification);
    }
}

impl<D: EventDispatcher + ?Sized> EventDispatcher for Arc<D> {
    fn dispatch(&self, entity: EntityId, notification: Notification) {
        (**self).dispatch(entity, notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::singleton::instance_of;

    #[test]
    fn singleton_notifications_have_no_subject() {
        let shown = Notification::VisibilityShown(instance_of::<ShowEntity>());
        assert_eq!(shown.kind(), NotificationKind::VisibilityShown);
        assert_eq!(shown.subject_type(), None);

        let destroyed = Notification::EntityDestroyed(instance_of::<DestroyedEntity>());
        assert_eq!(destroyed.kind(), NotificationKind::EntityDestroyed);
        assert_eq!(destroyed.subject_type(), None);
    }

    #[test]
    fn structural_notifications_expose_subject() {
        let added = Notification::from(DataAdded::new(DataType::of::<u32>()));
        assert_eq!(added.kind(), NotificationKind::DataAdded);
        assert_eq!(added.subject_type(), Some(DataType::of::<u32>()));

        let removed = Notification::from(DataRemoved::new(DataType::of::<String>()));
        assert_eq!(removed.kind(), NotificationKind::DataRemoved);
        assert_eq!(removed.subject_type(), Some(DataType::of::<String>()));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::VisibilityHidden).ok();
        assert_eq!(json.as_deref(), Some("\"visibility_hidden\""));
    }
}
