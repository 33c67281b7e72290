//! Construction authority for entity notifications.
//!
//! [`EntityAuthority`] is a one-shot capability: the entity subsystem takes it
//! at startup and nobody else can obtain another. Structural-change events can
//! only be built through it. [`EntityNotifier`] pairs the authority with a
//! dispatcher and is what the entity subsystem calls after each mutation.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{trace, warn};

use crate::error::EventError;
use crate::event::{EventDispatcher, Notification};
use crate::ids::EntityId;
use crate::singleton::{DestroyedEntity, HideEntity, ShowEntity, instance_of};
use crate::structural::{DataAdded, DataRemoved, DataType};

static TAKEN: AtomicBool = AtomicBool::new(false);

/// The right to announce structural changes.
///
/// Not `Clone`. Exactly one exists per process.
#[derive(Debug)]
pub struct EntityAuthority {
    _private: (),
}

impl EntityAuthority {
    /// Claim the authority. Returns `Some` on the first call only.
    pub fn take() -> Option<Self> {
        if TAKEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(Self { _private: () })
        } else {
            warn!("entity authority requested after it was already taken");
            None
        }
    }

    #[cfg(test)]
    pub(crate) const fn for_tests() -> Self {
        Self { _private: () }
    }

    /// Build the event announcing that data of type `T` was added.
    pub fn data_added<T: ?Sized + 'static>(&self) -> DataAdded {
        DataAdded::new(DataType::of::<T>())
    }

    /// Build the event announcing that data of type `T` was removed.
    pub fn data_removed<T: ?Sized + 'static>(&self) -> DataRemoved {
        DataRemoved::new(DataType::of::<T>())
    }

    /// Build a [`DataAdded`] for storage that only knows types at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSubjectType`] if `subject_type` is absent.
    pub fn data_added_erased(
        &self,
        subject_type: Option<DataType>,
    ) -> Result<DataAdded, EventError> {
        DataAdded::from_erased(subject_type)
    }

    /// Build a [`DataRemoved`] for storage that only knows types at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSubjectType`] if `subject_type` is absent.
    pub fn data_removed_erased(
        &self,
        subject_type: Option<DataType>,
    ) -> Result<DataRemoved, EventError> {
        DataRemoved::from_erased(subject_type)
    }
}

/// Announces entity mutations to a dispatcher.
#[derive(Debug)]
pub struct EntityNotifier<D> {
    authority: EntityAuthority,
    dispatcher: D,
}

impl<D: EventDispatcher> EntityNotifier<D> {
    /// Pair the authority with the dispatcher that will deliver events.
    pub const fn new(authority: EntityAuthority, dispatcher: D) -> Self {
        Self {
            authority,
            dispatcher,
        }
    }

    /// The dispatcher events are delivered to.
    pub const fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// The entity became visible.
    pub fn show(&self, entity: EntityId) {
        self.emit(entity, Notification::VisibilityShown(instance_of::<ShowEntity>()));
    }

    /// The entity became hidden.
    pub fn hide(&self, entity: EntityId) {
        self.emit(entity, Notification::VisibilityHidden(instance_of::<HideEntity>()));
    }

    /// The entity was destroyed.
    pub fn destroy(&self, entity: EntityId) {
        self.emit(
            entity,
            Notification::EntityDestroyed(instance_of::<DestroyedEntity>()),
        );
    }

    /// Data of type `T` was added to the entity.
    pub fn data_added<T: ?Sized + 'static>(&self, entity: EntityId) {
        self.emit(entity, self.authority.data_added::<T>().into());
    }

    /// Data of type `T` was removed from the entity.
    pub fn data_removed<T: ?Sized + 'static>(&self, entity: EntityId) {
        self.emit(entity, self.authority.data_removed::<T>().into());
    }

    /// Type-erased form of [`data_added`](Self::data_added).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSubjectType`] and dispatches nothing if
    /// `subject_type` is absent.
    pub fn data_added_erased(
        &self,
        entity: EntityId,
        subject_type: Option<DataType>,
    ) -> Result<(), EventError> {
        let event = self.authority.data_added_erased(subject_type)?;
        self.emit(entity, event.into());
        Ok(())
    }

    /// Type-erased form of [`data_removed`](Self::data_removed).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingSubjectType`] and dispatches nothing if
    /// `subject_type` is absent.
    pub fn data_removed_erased(
        &self,
        entity: EntityId,
        subject_type: Option<DataType>,
    ) -> Result<(), EventError> {
        let event = self.authority.data_removed_erased(subject_type)?;
        self.emit(entity, event.into());
        Ok(())
    }

    /// Give back the authority and the dispatcher.
    pub fn into_parts(self) -> (EntityAuthority, D) {
        (self.authority, self.dispatcher)
    }

    fn emit(&self, entity: EntityId, notification: Notification) {
        trace!(
            %entity,
            kind = ?notification.kind(),
            subject = notification.subject_type().map(|t| t.name()),
            "dispatching entity notification"
        );
        self.dispatcher.dispatch(entity, notification);
    }
}
