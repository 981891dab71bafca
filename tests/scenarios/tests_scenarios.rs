//! Describe, match, and name small libraries end to end.

use crate::helpers::descriptor_helpers::{assert_matches, describe_one};
use crate::helpers::shop_library::{shop_identity, shop_library};
use refdoc::descriptor::{DescriptorFactory, DescriptorId};
use refdoc::live::{LiveSymbol, SymbolGraph, TypeSystem};
use refdoc::naming::{NameMode, NamingOptions, NamingStrategy, PageLinker, canonical_name};
use refdoc::resolve::equals;
use rstest::rstest;

#[test]
fn test_plain_type_page() {
    let mut graph = SymbolGraph::new();
    let assembly = graph.add_assembly(shop_identity());
    let widget = graph.add_type(assembly, "Shop", "Widget");

    let (arena, id) = describe_one(&graph, widget);
    assert_eq!(canonical_name(&arena, id, NameMode::Base).unwrap(), "Shop.Widget");
    assert_eq!(
        PageLinker::default().file_name(&arena, id).unwrap(),
        "Shop.Widget.html"
    );
}

#[rstest]
#[case(NamingStrategy::Counter)]
#[case(NamingStrategy::Hash)]
fn test_overloaded_method_pages(#[case] strategy: NamingStrategy) {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let one = factory.describe(lib.resize_int).unwrap();
    let two = factory.describe(lib.resize_int_int).unwrap();
    let arena = factory.into_arena();
    let linker = PageLinker::new(NamingOptions::default().with_strategy(strategy));

    let first = linker.file_name(&arena, one).unwrap();
    let second = linker.file_name(&arena, two).unwrap();
    assert!(first.starts_with("Shop.Widget.Resize"), "{first}");
    assert!(second.starts_with("Shop.Widget.Resize"), "{second}");
    assert_ne!(first, second);
}

#[test]
fn test_nested_generic_definition_name() {
    let lib = shop_library();
    let (arena, id) = describe_one(&lib.graph, lib.slot);
    let full = canonical_name(&arena, id, NameMode::Full).unwrap();
    assert!(full.contains("Box`1.Slot`2"), "{full}");

    let (arena, id) = describe_one(&lib.graph, lib.slot_closed);
    let base = canonical_name(&arena, id, NameMode::Base).unwrap();
    assert!(base.contains("Box`1.Slot`2"), "{base}");
}

#[test]
fn test_array_rank_decides_match() {
    let lib = shop_library();
    assert_matches(&lib.graph, lib.int_vector, lib.int_matrix, false);
    assert_matches(&lib.graph, lib.int_vector, lib.int_vector, true);
}

#[test]
fn test_array_rank_across_graphs() {
    let mut graph = SymbolGraph::new();
    let assembly = graph.add_assembly(shop_identity());
    let int = graph.add_type(assembly, "System", "Int32");
    let vector = graph.add_array(int, 1);
    let matrix = graph.add_array(int, 2);
    let (arena, id) = describe_one(&graph, vector);

    let mut other = SymbolGraph::new();
    let other_assembly = other.add_assembly(shop_identity());
    let other_int = other.add_type(other_assembly, "System", "Int32");
    let other_matrix = other.add_array(other_int, 2);
    let other_vector = other.add_array(other_int, 1);

    assert_eq!(equals(&arena, id, &graph, matrix), Ok(false));
    assert_eq!(equals(&arena, id, &other, other_matrix), Ok(false));
    assert_eq!(equals(&arena, id, &other, other_vector), Ok(true));
}

/// `Echo<TMethodParam>(TMethodParam, TMethodParam[])` on `Shop.Widget`.
fn echo_library() -> (SymbolGraph, LiveSymbol, LiveSymbol) {
    let mut graph = SymbolGraph::new();
    let assembly = graph.add_assembly(shop_identity());
    let widget = graph.add_type(assembly, "Shop", "Widget");
    let echo = graph.add_generic_method(widget, "Echo", &["TMethodParam"]);
    let param = graph.generic_parameter(echo, 0).unwrap();
    let param_array = graph.add_array(param, 1);
    graph.set_parameters(echo, &[param, param_array]);
    (graph, echo, param)
}

#[test]
fn test_method_parameter_cycle_terminates() {
    let (graph, echo, param) = echo_library();
    let mut factory = DescriptorFactory::new(&graph);
    let echo_id = factory.describe(echo).unwrap();
    let param_id = factory.describe(param).unwrap();
    let arena = factory.into_arena();

    assert_eq!(equals(&arena, echo_id, &graph, echo), Ok(true));
    assert_eq!(equals(&arena, param_id, &graph, param), Ok(true));
    assert_eq!(
        canonical_name(&arena, echo_id, NameMode::Full).unwrap(),
        "Shop.Widget.Echo`1(TMethodParam,TMethodParam[])"
    );
}

#[test]
fn test_method_parameter_cycle_rejects_other_method() {
    let (mut graph, echo, param) = echo_library();
    let widget = graph.declaring_type(echo).unwrap();
    // Same name and shape, but only one parameter.
    let other = graph.add_generic_method(widget, "Echo", &["TMethodParam"]);
    let other_param = graph.generic_parameter(other, 0).unwrap();
    graph.set_parameters(other, &[other_param]);

    let mut factory = DescriptorFactory::new(&graph);
    let echo_id = factory.describe(echo).unwrap();
    let param_id = factory.describe(param).unwrap();
    let arena = factory.into_arena();

    assert_eq!(equals(&arena, echo_id, &graph, other), Ok(false));
    assert_eq!(equals(&arena, param_id, &graph, other_param), Ok(false));
}

#[test]
fn test_describe_match_and_link_everything() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let members = lib.graph.members(lib.widget);
    let ids: Vec<DescriptorId> = factory.describe_all(members.iter().copied()).unwrap();
    let arena = factory.into_arena();
    let linker = PageLinker::new(
        NamingOptions::default()
            .with_strategy(NamingStrategy::Hash)
            .with_url_prefix("api/"),
    );

    for (&symbol, &id) in members.iter().zip(&ids) {
        assert_eq!(equals(&arena, id, &lib.graph, symbol), Ok(true));
        let url = linker.url(&arena, id).unwrap();
        assert!(url.starts_with("api/Shop.Widget."), "{url}");
    }
}
