//! Integration tests for interface resolution over the shipped core schema.

#![allow(clippy::unwrap_used)]

use tessera_reflect::{InterfaceTemplate, TypeSchema, TypeSystem};

const CORE_TYPES: &str = include_str!("../../../schemas/core-types.yaml");

fn core_types() -> TypeSystem {
    let schema = TypeSchema::parse(CORE_TYPES).unwrap();
    TypeSystem::from_schema(&schema).unwrap()
}

fn render(system: &TypeSystem, ty: Option<tessera_reflect::TypeDescriptor>) -> Option<String> {
    ty.map(|t| system.display(&t).to_string())
}

#[test]
fn open_template_matches_through_ancestors() {
    let system = core_types();
    let list = system.parse_type("ConcreteList<int>").unwrap();
    let enumerable = system.parse_template("IEnumerable<>").unwrap();

    assert!(system.implements(&list, &enumerable));
    assert_eq!(
        render(&system, system.find_interface(&list, &enumerable)),
        Some("IEnumerable<int>".to_owned())
    );
}

#[test]
fn implements_ignores_closing_arguments() {
    let system = core_types();
    let enumerable = system.parse_template("IEnumerable<>").unwrap();
    for source in ["ConcreteList<int>", "ConcreteList<string>", "ConcreteList<Object>"] {
        let ty = system.parse_type(source).unwrap();
        assert!(system.implements(&ty, &enumerable), "{source}");
    }
    // A closed generic template is reduced to its definition as well.
    let closed = system.parse_template("IEnumerable<string>").unwrap();
    let ints = system.parse_type("ConcreteList<int>").unwrap();
    assert!(system.implements(&ints, &closed));
    assert_eq!(system.find_interface(&ints, &closed), None);
}

#[test]
fn find_interface_closes_against_each_level() {
    let system = core_types();
    let int_list = system.parse_type("IntList").unwrap();
    let collection = system.parse_template("ICollection<>").unwrap();
    assert_eq!(
        render(&system, system.find_interface(&int_list, &collection)),
        Some("ICollection<int>".to_owned())
    );

    let dictionary = system.parse_type("Dictionary<string, int>").unwrap();
    let enumerable = system.parse_template("IEnumerable<>").unwrap();
    assert_eq!(
        render(&system, system.find_interface(&dictionary, &enumerable)),
        Some("IEnumerable<Pair<string, int>>".to_owned())
    );
}

#[test]
fn closed_template_matches_by_identity() {
    let system = core_types();
    let list = system.parse_type("ConcreteList<string>").unwrap();
    let exact = system.parse_template("IEnumerable<string>").unwrap();
    assert_eq!(
        system.find_interface(&list, &exact),
        Some(system.parse_type("IEnumerable<string>").unwrap())
    );
}

#[test]
fn non_generic_interface_on_class_or_ancestor() {
    let system = core_types();
    let comparable = system.parse_template("IComparable").unwrap();
    assert!(matches!(comparable, InterfaceTemplate::Closed(_)));

    for source in ["PlainClass", "DerivedPlain"] {
        let ty = system.parse_type(source).unwrap();
        assert!(system.implements(&ty, &comparable), "{source}");
        assert_eq!(
            render(&system, system.find_interface(&ty, &comparable)),
            Some("IComparable".to_owned())
        );
    }

    let unrelated = system.parse_type("Unrelated").unwrap();
    assert!(!system.implements(&unrelated, &comparable));
    assert_eq!(system.find_interface(&unrelated, &comparable), None);
}

#[test]
fn root_type_without_interfaces_terminates() {
    let system = core_types();
    let standalone = system.parse_type("Standalone").unwrap();
    for source in ["IEnumerable<>", "IComparable", "IConverter<>"] {
        let template = system.parse_template(source).unwrap();
        assert!(!system.implements(&standalone, &template));
        assert_eq!(system.find_interface(&standalone, &template), None);
    }
    assert_eq!(system.ancestors(&standalone).len(), 1);
}

#[test]
fn resolution_is_shareable_across_threads() {
    let system = core_types();
    let list = system.parse_type("IntList").unwrap();
    let enumerable = system.parse_template("IEnumerable<>").unwrap();
    let expected = system.parse_type("IEnumerable<int>").unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(
                    system.find_interface(&list, &enumerable).as_ref(),
                    Some(&expected)
                );
            });
        }
    });
}
