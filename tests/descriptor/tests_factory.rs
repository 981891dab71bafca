//! Descriptor factory behavior against the sample library.

use crate::helpers::descriptor_helpers::{describe_everything, describe_one};
use crate::helpers::shop_library::{shop_identity, shop_library};
use refdoc::base::{AssemblyIdentity, ConstantValue, Version};
use refdoc::descriptor::{Descriptor, DescriptorFactory, DescriptorKind, GenericArguments};
use refdoc::live::{LiveSymbol, SymbolGraph};
use rstest::rstest;

#[test]
fn test_describes_every_symbol() {
    let lib = shop_library();
    let (arena, pairs) = describe_everything(&lib.graph);
    assert_eq!(pairs.len(), lib.graph.len());
    for (symbol, id) in pairs {
        assert!(arena.contains(id), "{:?} was not published", symbol);
    }
}

#[rstest]
#[case::assembly("assembly", DescriptorKind::Assembly)]
#[case::ty("widget", DescriptorKind::Type)]
#[case::array("int_matrix", DescriptorKind::Array)]
#[case::pointer("int_pointer", DescriptorKind::Pointer)]
#[case::by_ref("int_by_ref", DescriptorKind::ByRef)]
#[case::type_parameter("box_t", DescriptorKind::GenericTypeParameter)]
#[case::method_parameter("convert_t", DescriptorKind::GenericMethodParameter)]
#[case::constant("max_size", DescriptorKind::Constant)]
#[case::field("size", DescriptorKind::Field)]
#[case::event("resized", DescriptorKind::Event)]
#[case::property("item", DescriptorKind::Property)]
#[case::constructor("widget_ctor_int", DescriptorKind::Constructor)]
#[case::method("resize_int", DescriptorKind::Method)]
fn test_descriptor_kind_follows_live_kind(#[case] handle: &str, #[case] expected: DescriptorKind) {
    let lib = shop_library();
    let symbol = match handle {
        "assembly" => lib.assembly,
        "widget" => lib.widget,
        "int_matrix" => lib.int_matrix,
        "int_pointer" => lib.int_pointer,
        "int_by_ref" => lib.int_by_ref,
        "box_t" => lib.box_t,
        "convert_t" => lib.convert_t,
        "max_size" => lib.max_size,
        "size" => lib.size,
        "resized" => lib.resized,
        "item" => lib.item,
        "widget_ctor_int" => lib.widget_ctor_int,
        "resize_int" => lib.resize_int,
        other => panic!("unknown handle {other}"),
    };
    let (arena, id) = describe_one(&lib.graph, symbol);
    assert_eq!(arena[id].kind(), expected);
}

#[test]
fn test_describe_is_cached_per_symbol() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let first = factory.describe(lib.resize_int).unwrap();
    let len = factory.arena().len();
    let again = factory.describe(lib.resize_int).unwrap();
    assert_eq!(first, again);
    assert_eq!(factory.arena().len(), len);
    assert_eq!(factory.cached(lib.resize_int), Some(first));
}

#[test]
fn test_assemblies_are_shared_by_identity() {
    let mut graph = SymbolGraph::new();
    let first = graph.add_assembly(shop_identity());
    let second = graph.add_assembly(AssemblyIdentity::new("SHOP", Version::new(1, 2, 0, 0)));
    let other = graph.add_assembly(AssemblyIdentity::new("Shop", Version::new(2, 0, 0, 0)));
    let a = graph.add_type(first, "Shop", "A");
    let b = graph.add_type(second, "Shop", "B");
    let c = graph.add_type(other, "Shop", "C");

    let mut factory = DescriptorFactory::new(&graph);
    let ids = factory.describe_all([a, b, c]).unwrap();
    let arena = factory.arena();
    let assembly_of = |i: usize| match &arena[ids[i]] {
        Descriptor::Type(t) => t.assembly,
        other => panic!("expected a type, got {:?}", other.kind()),
    };
    assert_eq!(assembly_of(0), assembly_of(1));
    assert_ne!(assembly_of(0), assembly_of(2));
    assert_eq!(factory.assembly_count(), 2);
}

#[test]
fn test_namespaces_are_shared_within_an_assembly() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let widget = factory.describe(lib.widget).unwrap();
    let store = factory.describe(lib.store).unwrap();
    let int = factory.describe(lib.int).unwrap();
    let arena = factory.arena();
    let namespace_of = |id| match &arena[id] {
        Descriptor::Type(t) => t.namespace,
        _ => None,
    };
    assert!(namespace_of(widget).is_some());
    assert_eq!(namespace_of(widget), namespace_of(store));
    assert_ne!(namespace_of(widget), namespace_of(int));
}

#[test]
fn test_nested_type_records_only_own_parameters() {
    let lib = shop_library();
    let (arena, id) = describe_one(&lib.graph, lib.slot);
    let Descriptor::Type(slot) = &arena[id] else {
        panic!("expected a type");
    };
    assert_eq!(slot.namespace, None);
    assert!(matches!(&slot.generic_arguments, GenericArguments::OpenParameters(p) if p.len() == 2));
    let outer = slot.declaring_type.expect("nested type has a declaring type");
    let Descriptor::Type(outer) = &arena[outer] else {
        panic!("expected a type");
    };
    assert_eq!(outer.name, "Box");
    assert!(outer.generic_arguments.is_open());
    assert_eq!(outer.generic_arguments.len(), 1);
}

#[test]
fn test_constructed_nested_type_has_constructed_declaring_type() {
    let lib = shop_library();
    let (arena, id) = describe_one(&lib.graph, lib.slot_closed);
    let Descriptor::Type(slot) = &arena[id] else {
        panic!("expected a type");
    };
    assert!(matches!(&slot.generic_arguments, GenericArguments::Substituted(a) if a.len() == 2));
    let Some(Descriptor::Type(outer)) = slot.declaring_type.map(|o| &arena[o]) else {
        panic!("expected a declaring type");
    };
    assert!(matches!(&outer.generic_arguments, GenericArguments::Substituted(a) if a.len() == 1));
}

#[test]
fn test_method_parameter_points_back_at_its_method() {
    let lib = shop_library();
    let (arena, id) = describe_one(&lib.graph, lib.convert);
    let Descriptor::Method(method) = &arena[id] else {
        panic!("expected a method");
    };
    let [param] = method.parameter_types.as_slice() else {
        panic!("expected one parameter");
    };
    let Descriptor::GenericMethodParameter(t) = &arena[*param] else {
        panic!("expected a method type parameter");
    };
    assert_eq!(t.name, "T");
    assert_eq!(t.position, 0);
    assert_eq!(t.declaring_method, id);
    assert_eq!(method.generic_arguments.ids(), &[*param]);
}

#[test]
fn test_constant_keeps_its_value() {
    let lib = shop_library();
    let (arena, id) = describe_one(&lib.graph, lib.max_size);
    let Descriptor::Constant(constant) = &arena[id] else {
        panic!("expected a constant");
    };
    assert_eq!(constant.value, ConstantValue::Int(100));
}

#[test]
fn test_unknown_symbol_is_rejected() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let err = factory.describe(LiveSymbol::new(10_000)).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(factory.arena().is_empty());
}

#[test]
fn test_rejected_symbol_leaves_arena_untouched() {
    let mut lib = shop_library();
    let broken = lib
        .graph
        .add_method(lib.widget, "Broken", &[LiveSymbol::new(10_000)]);
    let mut factory = DescriptorFactory::new(&lib.graph);
    factory.describe(lib.int).unwrap();
    let len = factory.arena().len();

    let err = factory.describe(broken).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(factory.arena().len(), len);
    assert_eq!(factory.cached(broken), None);
    assert_eq!(factory.cached(lib.widget), None);

    // The factory stays usable.
    let widget = factory.describe(lib.widget).unwrap();
    assert_eq!(factory.arena()[widget].name(), Some("Widget"));
}
