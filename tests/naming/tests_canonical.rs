//! Canonical names of the sample library.

use std::collections::HashMap;

use crate::helpers::descriptor_helpers::{base_name, describe_everything, full_name};
use crate::helpers::shop_library::{ShopLibrary, shop_library};
use refdoc::live::LiveSymbol;
use refdoc::naming::{NameMode, canonical_name};
use rstest::rstest;

fn pick(lib: &ShopLibrary, handle: &str) -> LiveSymbol {
    match handle {
        "assembly" => lib.assembly,
        "int" => lib.int,
        "string" => lib.string,
        "widget" => lib.widget,
        "widget_ctor" => lib.widget_ctor,
        "widget_ctor_int" => lib.widget_ctor_int,
        "size" => lib.size,
        "max_size" => lib.max_size,
        "resized" => lib.resized,
        "name" => lib.name,
        "item" => lib.item,
        "resize_int_int" => lib.resize_int_int,
        "convert" => lib.convert,
        "convert_t" => lib.convert_t,
        "convert_int" => lib.convert_int,
        "boxed" => lib.boxed,
        "box_t" => lib.box_t,
        "slot" => lib.slot,
        "box_int" => lib.box_int,
        "slot_closed" => lib.slot_closed,
        "store_box_int" => lib.store_box_int,
        "int_vector" => lib.int_vector,
        "int_matrix" => lib.int_matrix,
        "int_pointer" => lib.int_pointer,
        "int_by_ref" => lib.int_by_ref,
        other => panic!("unknown handle {other}"),
    }
}

#[rstest]
#[case("assembly", "index(Shop, Version=1.2.0.0, Culture=neutral, PublicKeyToken=null)", "index")]
#[case("int", "int", "int")]
#[case("string", "string", "string")]
#[case("widget", "Shop.Widget", "Shop.Widget")]
#[case("widget_ctor", "Shop.Widget.Widget()", "Shop.Widget.Widget")]
#[case("widget_ctor_int", "Shop.Widget.Widget(int)", "Shop.Widget.Widget")]
#[case("size", "Shop.Widget.size", "Shop.Widget.size")]
#[case("max_size", "Shop.Widget.MaxSize", "Shop.Widget.MaxSize")]
#[case("resized", "Shop.Widget.Resized", "Shop.Widget.Resized")]
#[case("name", "Shop.Widget.Name", "Shop.Widget.Name")]
#[case("item", "Shop.Widget.Item[string]", "Shop.Widget.Item")]
#[case("resize_int_int", "Shop.Widget.Resize(int,int)", "Shop.Widget.Resize")]
#[case("convert", "Shop.Widget.Convert`1(T)", "Shop.Widget.Convert`1")]
#[case("convert_t", "T", "T")]
#[case("convert_int", "Shop.Widget.Convert`1{int}(int)", "Shop.Widget.Convert`1")]
#[case("boxed", "Shop.Box`1", "Shop.Box`1")]
#[case("box_t", "T", "T")]
#[case("slot", "Shop.Box`1.Slot`2", "Shop.Box`1.Slot`2")]
#[case("box_int", "Shop.Box`1{int}", "Shop.Box`1")]
#[case("slot_closed", "Shop.Box`1{int}.Slot`2{string,long}", "Shop.Box`1.Slot`2")]
#[case("store_box_int", "Shop.Store.Put(Shop.Box`1{int})", "Shop.Store.Put")]
#[case("int_vector", "int[]", "int[]")]
#[case("int_matrix", "int[,]", "int[,]")]
#[case("int_pointer", "int*", "int*")]
#[case("int_by_ref", "int", "int")]
fn test_canonical_names(#[case] handle: &str, #[case] full: &str, #[case] base: &str) {
    let lib = shop_library();
    let symbol = pick(&lib, handle);
    assert_eq!(full_name(&lib.graph, symbol), full);
    assert_eq!(base_name(&lib.graph, symbol), base);
}

#[test]
fn test_full_names_are_injective_on_pages() {
    // Generic parameters render their bare name and by-refs render their
    // referent; neither gets a page of its own.
    let lib = shop_library();
    let (arena, pairs) = describe_everything(&lib.graph);
    let skipped = [lib.box_t, lib.convert_t, lib.int_by_ref];
    let slot_parameters: Vec<LiveSymbol> = (0..2)
        .filter_map(|i| lib.graph.generic_parameter(lib.slot, i))
        .collect();

    let mut seen: HashMap<String, LiveSymbol> = HashMap::new();
    for (symbol, id) in pairs {
        if skipped.contains(&symbol) || slot_parameters.contains(&symbol) {
            continue;
        }
        let name = canonical_name(&arena, id, NameMode::Full).unwrap();
        if let Some(previous) = seen.insert(name.clone(), symbol) {
            panic!("{:?} and {:?} share the Full name {}", previous, symbol, name);
        }
    }
}

#[test]
fn test_overloads_share_a_base_name() {
    let lib = shop_library();
    let names: Vec<String> = [lib.resize_int, lib.resize_int_int, lib.resize_long]
        .into_iter()
        .map(|m| base_name(&lib.graph, m))
        .collect();
    assert!(names.iter().all(|n| n == "Shop.Widget.Resize"));
}
