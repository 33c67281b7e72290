//! Error types for the `tessera-events` crate.

use crate::event::NotificationKind;

/// Errors raised while building notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// A structural-change event was requested without a subject type.
    #[error("{kind:?} event requires a subject data type")]
    MissingSubjectType {
        /// The kind of event that was being built.
        kind: NotificationKind,
    },
}
