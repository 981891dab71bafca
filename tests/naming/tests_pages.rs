//! Page file names and links.

use std::collections::HashSet;

use crate::helpers::descriptor_helpers::{describe_everything, describe_one};
use crate::helpers::shop_library::{ShopLibrary, shop_library};
use refdoc::descriptor::{DescriptorFactory, DescriptorId};
use refdoc::live::LiveSymbol;
use refdoc::naming::{NamingOptions, NamingStrategy, PageLinker, signature_digest};
use rstest::rstest;

fn linker(strategy: NamingStrategy) -> PageLinker {
    PageLinker::new(NamingOptions::default().with_strategy(strategy))
}

#[rstest]
#[case(NamingStrategy::Counter)]
#[case(NamingStrategy::Hash)]
fn test_file_name_is_idempotent(#[case] strategy: NamingStrategy) {
    let lib = shop_library();
    let (arena, pairs) = describe_everything(&lib.graph);
    let linker = linker(strategy);
    let ids: Vec<DescriptorId> = pairs.iter().map(|&(_, id)| id).collect();

    let first = linker.file_names(&arena, &ids).unwrap();
    let second = linker.file_names(&arena, &ids).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case(NamingStrategy::Counter, 1)]
#[case(NamingStrategy::Counter, 25)]
#[case(NamingStrategy::Hash, 1)]
#[case(NamingStrategy::Hash, 25)]
fn test_synthetic_overloads_get_distinct_names(
    #[case] strategy: NamingStrategy,
    #[case] count: usize,
) {
    let mut lib = shop_library();
    let overloads: Vec<_> = (0..count)
        .map(|n| {
            let parameters = vec![lib.int; n];
            lib.graph.add_method(lib.widget, "Overload", &parameters)
        })
        .collect();

    let mut factory = DescriptorFactory::new(&lib.graph);
    let ids = factory.describe_all(overloads).unwrap();
    let arena = factory.into_arena();
    let linker = linker(strategy);

    let names = linker.file_names(&arena, &ids).unwrap();
    let unique: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
    assert_eq!(unique.len(), count);
    assert!(names.iter().all(|n| n.starts_with("Shop.Widget.Overload")));
    assert!(names.iter().all(|n| n.ends_with(".html")));
}

#[test]
fn test_counter_names_follow_request_order() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let ids = factory
        .describe_all([lib.resize_long, lib.resize_int, lib.resize_int_int])
        .unwrap();
    let arena = factory.into_arena();
    let linker = linker(NamingStrategy::Counter);

    assert_eq!(
        linker.file_names(&arena, &ids).unwrap(),
        [
            "Shop.Widget.Resize.html",
            "Shop.Widget.Resize-1.html",
            "Shop.Widget.Resize-2.html",
        ]
    );
}

#[test]
fn test_hash_names_ignore_request_order() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let ids = factory
        .describe_all([lib.resize_int, lib.resize_int_int, lib.resize_long])
        .unwrap();
    let arena = factory.into_arena();

    let forward = linker(NamingStrategy::Hash).file_names(&arena, &ids).unwrap();
    let mut reversed_ids = ids.clone();
    reversed_ids.reverse();
    let mut backward = linker(NamingStrategy::Hash)
        .file_names(&arena, &reversed_ids)
        .unwrap();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_parallel_hash_names_match_sequential() {
    let lib = shop_library();
    let (arena, pairs) = describe_everything(&lib.graph);
    let ids: Vec<DescriptorId> = pairs.iter().map(|&(_, id)| id).collect();
    let linker = linker(NamingStrategy::Hash);

    assert_eq!(
        linker.file_names_parallel(&arena, &ids).unwrap(),
        linker.file_names(&arena, &ids).unwrap()
    );
}

#[test]
fn test_parallel_counter_names_are_distinct() {
    let mut lib = shop_library();
    let overloads: Vec<_> = (0..40)
        .map(|n| {
            let parameters = vec![lib.long; n];
            lib.graph.add_method(lib.store, "Fill", &parameters)
        })
        .collect();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let ids = factory.describe_all(overloads).unwrap();
    let arena = factory.into_arena();
    let linker = linker(NamingStrategy::Counter);

    let names = linker.file_names_parallel(&arena, &ids).unwrap();
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), ids.len());
    // Whatever the scheduling was, later calls see the same assignments.
    assert_eq!(linker.file_names(&arena, &ids).unwrap(), names);
}

#[test]
fn test_url_prepends_prefix() {
    let lib = shop_library();
    let mut factory = DescriptorFactory::new(&lib.graph);
    let widget = factory.describe(lib.widget).unwrap();
    let arena = factory.into_arena();
    let linker = PageLinker::new(NamingOptions::default().with_url_prefix("/api/"));

    assert_eq!(linker.url(&arena, widget).unwrap(), "/api/Shop.Widget.html");
}

/// `Box<int[]>` and a field declared on it, added to the sample library.
fn with_boxed_vector(lib: &mut ShopLibrary) -> (LiveSymbol, LiveSymbol, LiveSymbol) {
    let box_ints = lib.graph.construct(lib.boxed, &[lib.int_vector]);
    let count = lib.graph.add_field(box_ints, "Count");
    let put = lib.graph.add_method(box_ints, "Put", &[lib.int_vector]);
    (box_ints, count, put)
}

#[rstest]
#[case("assembly", "index.html")]
#[case("int_vector", "int[].html")]
#[case("int_matrix", "int[,].html")]
#[case("box_ints", "Shop.Box`1{int[]}.html")]
#[case("count", "Shop.Box`1{int[]}.Count.html")]
#[case("name", "Shop.Widget.Name.html")]
fn test_hash_names_without_parameter_list(#[case] handle: &str, #[case] expected: &str) {
    let mut lib = shop_library();
    let (box_ints, count, _) = with_boxed_vector(&mut lib);
    let symbol = match handle {
        "assembly" => lib.assembly,
        "int_vector" => lib.int_vector,
        "int_matrix" => lib.int_matrix,
        "box_ints" => box_ints,
        "count" => count,
        "name" => lib.name,
        other => panic!("unknown handle {other}"),
    };
    let (arena, id) = describe_one(&lib.graph, symbol);

    assert_eq!(linker(NamingStrategy::Hash).file_name(&arena, id).unwrap(), expected);
}

#[test]
fn test_hash_names_digest_own_parameter_list() {
    let mut lib = shop_library();
    let (_, _, put) = with_boxed_vector(&mut lib);
    let linker = linker(NamingStrategy::Hash);
    let name_of = |symbol| {
        let (arena, id) = describe_one(&lib.graph, symbol);
        linker.file_name(&arena, id).unwrap()
    };

    assert_eq!(
        name_of(put),
        format!("Shop.Box`1{{int[]}}.Put-{}.html", signature_digest("(int[])"))
    );
    assert_eq!(
        name_of(lib.item),
        format!("Shop.Widget.Item-{}.html", signature_digest("[string]"))
    );
    assert_eq!(
        name_of(lib.widget_ctor),
        format!("Shop.Widget.Widget-{}.html", signature_digest("()"))
    );
    assert_eq!(
        name_of(lib.convert_int),
        format!("Shop.Widget.Convert`1{{int}}-{}.html", signature_digest("(int)"))
    );
}
