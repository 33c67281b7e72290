//! End-to-end: a structural-change event reaches the serialization layer,
//! which maps the event's data type to a converter through the resolver.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use tessera_events::{EntityAuthority, EntityId, EntityNotifier, EventDispatcher, Notification};
use tessera_reflect::{ConverterRegistry, TypeSchema, TypeSystem};

const CORE_TYPES: &str = include_str!("../../../schemas/core-types.yaml");

/// Rust-side component stored on entities.
type Health = u32;

struct SerializingDispatcher {
    system: TypeSystem,
    converters: ConverterRegistry<&'static str>,
    written: Mutex<Vec<String>>,
}

impl EventDispatcher for SerializingDispatcher {
    fn dispatch(&self, _entity: EntityId, notification: Notification) {
        let Notification::DataAdded(event) = notification else {
            return;
        };
        let Some((interface, converter)) = self
            .converters
            .resolve_bound(&self.system, event.subject_type().id())
        else {
            return;
        };
        if let Ok(mut written) = self.written.lock() {
            written.push(format!("{converter}:{}", self.system.display(&interface)));
        }
    }
}

#[test]
fn data_added_event_selects_converter() {
    let mut system = TypeSystem::from_schema(&TypeSchema::parse(CORE_TYPES).unwrap()).unwrap();
    let health = system.parse_type("Health").unwrap();
    system.bind::<Health>(health).unwrap();

    let mut converters = ConverterRegistry::new();
    converters.register(system.parse_template("IConverter<>").unwrap(), "health-codec");

    let dispatcher = SerializingDispatcher {
        system,
        converters,
        written: Mutex::new(Vec::new()),
    };
    let notifier = EntityNotifier::new(EntityAuthority::take().unwrap(), &dispatcher);
    let entity = EntityId::new();

    notifier.data_added::<Health>(entity);
    // Unbound types and non-structural events are ignored.
    notifier.data_added::<String>(entity);
    notifier.show(entity);

    let written = dispatcher.written.lock().unwrap();
    assert_eq!(*written, vec!["health-codec:IConverter<Health>".to_owned()]);
}
