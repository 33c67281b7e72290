//! Structural-change events.
//!
//! [`DataAdded`] and [`DataRemoved`] report that data of some type was
//! attached to or detached from an entity. They carry the data's type and
//! nothing else: no entity, no value. Constructors are crate-private and are
//! reached only through [`EntityAuthority`](crate::EntityAuthority), so
//! receiving one of these events means the entity subsystem really performed
//! the mutation.

use std::any::TypeId;

use crate::error::EventError;
use crate::event::{Event, NotificationKind};

/// Runtime identity of a data type.
///
/// Compared by [`TypeId`]; the name is kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    id: TypeId,
    name: &'static str,
}

impl DataType {
    /// The descriptor of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] this descriptor stands for.
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

/// A data instance of [`subject_type`](Self::subject_type) was added to an
/// entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataAdded {
    subject_type: DataType,
}

impl DataAdded {
    pub(crate) const fn new(subject_type: DataType) -> Self {
        Self { subject_type }
    }

    pub(crate) fn from_erased(subject_type: Option<DataType>) -> Result<Self, EventError> {
        subject_type.map(Self::new).ok_or(EventError::MissingSubjectType {
            kind: NotificationKind::DataAdded,
        })
    }

    /// The type of data that was added.
    pub const fn subject_type(&self) -> DataType {
        self.subject_type
    }
}

impl Event for DataAdded {}

/// A data instance of [`subject_type`](Self::subject_type) was removed from
/// an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataRemoved {
    subject_type: DataType,
}

impl DataRemoved {
    pub(crate) const fn new(subject_type: DataType) -> Self {
        Self { subject_type }
    }

    pub(crate) fn from_erased(subject_type: Option<DataType>) -> Result<Self, EventError> {
        subject_type.map(Self::new).ok_or(EventError::MissingSubjectType {
            kind: NotificationKind::DataRemoved,
        })
    }

    /// The type of data that was removed.
    pub const fn subject_type(&self) -> DataType {
        self.subject_type
    }
}

impl Event for DataRemoved {}
