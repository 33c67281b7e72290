//! Process-wide registry of stateless event kinds.
//!
//! A stateless notification (shown, hidden, destroyed) needs no payload, so
//! every occurrence shares one instance per kind instead of allocating. The
//! registry maps each kind's [`TypeId`] to a leaked `OnceLock` cell:
//!
//! - A read lock serves every cell lookup after the first.
//! - A write lock with a second lookup inserts a missing cell, so threads
//!   racing on a new kind share one cell.
//! - The registry lock is released before the cell is initialized, so a
//!   kind's constructor may fetch other kinds.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::event::Event;

type Slot = &'static (dyn Any + Send + Sync);

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, Slot>>> = OnceLock::new();

/// Proof that the registry is building a singleton.
///
/// Only this module can create one, so [`SingletonEvent::construct`] can be
/// implemented anywhere but called only by [`instance_of`].
#[derive(Debug)]
pub struct Construct {
    _private: (),
}

/// A notification kind with exactly one instance per process.
pub trait SingletonEvent: Event + Sized {
    /// Build the one instance of this kind.
    fn construct(token: Construct) -> Self;

    /// The shared instance of this kind. Same as [`instance_of`].
    fn instance() -> &'static Self {
        instance_of::<Self>()
    }
}

/// Return the shared instance of `K`, creating it on first access.
///
/// Every call for the same `K` returns the same reference, including calls
/// that race on first access from different threads. `K::construct` runs at
/// most once.
pub fn instance_of<K: SingletonEvent>() -> &'static K {
    cell_of::<K>().get_or_init(|| {
        tracing::debug!(
            kind = std::any::type_name::<K>(),
            "singleton event instance created"
        );
        K::construct(Construct { _private: () })
    })
}

fn cell_of<K: SingletonEvent>() -> &'static OnceLock<K> {
    let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));

    {
        let slots = registry.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cell) = lookup::<K>(&slots) {
            return cell;
        }
    }

    let mut slots = registry.write().unwrap_or_else(PoisonError::into_inner);
    // Another thread may have inserted the cell between the two locks.
    if let Some(cell) = lookup::<K>(&slots) {
        return cell;
    }
    let cell: &'static OnceLock<K> = Box::leak(Box::new(OnceLock::new()));
    slots.insert(TypeId::of::<K>(), cell);
    cell
}

fn lookup<K: SingletonEvent>(slots: &HashMap<TypeId, Slot>) -> Option<&'static OnceLock<K>> {
    slots
        .get(&TypeId::of::<K>())
        .copied()
        .and_then(|slot| slot.downcast_ref::<OnceLock<K>>())
}

/// Generates a payload-free singleton kind that cannot be built outside
/// this module.
macro_rules! define_singleton_event {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq)]
        pub struct $name {
            _private: (),
        }

        impl Event for $name {}

        impl SingletonEvent for $name {
            fn construct(_token: Construct) -> Self {
                Self { _private: () }
            }
        }
    };
}

define_singleton_event! {
    /// Notifies listeners that the entity should be visible.
    ShowEntity
}

define_singleton_event! {
    /// Notifies listeners that the entity should be hidden.
    HideEntity
}

define_singleton_event! {
    /// Notifies listeners that the entity has been destroyed.
    DestroyedEntity
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Barrier, mpsc};
    use std::thread;
    use std::time::Duration;

    use super::*;

    static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

    /// Sized kind whose construction is observable and slow enough to
    /// widen the first-access race window.
    #[derive(Debug)]
    struct Counted {
        serial: usize,
    }

    impl Event for Counted {}

    impl SingletonEvent for Counted {
        fn construct(_token: Construct) -> Self {
            let serial = COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            Self { serial }
        }
    }

    #[derive(Debug)]
    struct Tally {
        label: &'static str,
    }

    impl Event for Tally {}

    impl SingletonEvent for Tally {
        fn construct(_token: Construct) -> Self {
            Self { label: "tally" }
        }
    }

    /// Kind whose construction fetches another kind.
    #[derive(Debug)]
    struct Envelope {
        inner: &'static Tally,
    }

    impl Event for Envelope {}

    impl SingletonEvent for Envelope {
        fn construct(_token: Construct) -> Self {
            Self {
                inner: instance_of::<Tally>(),
            }
        }
    }

    #[test]
    fn repeated_calls_return_same_instance() {
        let first = instance_of::<Tally>();
        let second = instance_of::<Tally>();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.label, "tally");
    }

    #[test]
    fn trait_accessor_matches_free_function() {
        assert!(std::ptr::eq(HideEntity::instance(), instance_of::<HideEntity>()));
        assert!(std::ptr::eq(ShowEntity::instance(), instance_of::<ShowEntity>()));
        assert!(std::ptr::eq(
            DestroyedEntity::instance(),
            instance_of::<DestroyedEntity>()
        ));
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        const THREADS: usize = 8;
        let barrier = Barrier::new(THREADS);

        let addresses: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        std::ptr::from_ref(instance_of::<Counted>()).addr()
                    })
                })
                .collect();
            handles.into_iter().filter_map(|h| h.join().ok()).collect()
        });

        assert_eq!(addresses.len(), THREADS);
        assert!(addresses.windows(2).all(|pair| pair.first() == pair.last()));
        assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(instance_of::<Counted>().serial, 0);
    }

    #[test]
    fn constructor_may_fetch_other_kinds() {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let envelope = instance_of::<Envelope>();
            let _ = tx.send(std::ptr::from_ref(envelope.inner).addr());
        });

        let inner = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(inner, std::ptr::from_ref(instance_of::<Tally>()).addr());
        assert!(std::ptr::eq(instance_of::<Envelope>(), instance_of::<Envelope>()));
    }
}
