#![allow(non_snake_case)]

use super::*;
use syn::parse_quote;
use test_case::test_case;

fn shape(source: &str) -> TypeShape {
    TypeShape::of(&syn::parse_str(source).unwrap())
}

#[test_case("bool", TypeShape::Bool)]
#[test_case("u16", TypeShape::Integral)]
#[test_case("isize", TypeShape::Integral)]
#[test_case("f32", TypeShape::Decimal)]
#[test_case("char", TypeShape::Char)]
#[test_case("String", TypeShape::Text)]
#[test_case("&'a str", TypeShape::Text)]
#[test_case("std::collections::HashMap<String, u8>", TypeShape::Map)]
#[test_case("Uuid", TypeShape::Other)]
fn TypeShape___of___classifies_scalars(source: &str, expected: TypeShape) {
    assert_eq!(shape(source), expected);
}

#[test]
fn TypeShape___of___sequences_carry_element_shape() {
    assert_eq!(
        shape("Vec<i32>"),
        TypeShape::Sequence(Box::new(TypeShape::Integral))
    );
    assert_eq!(
        shape("[f64; 3]"),
        TypeShape::Sequence(Box::new(TypeShape::Decimal))
    );
    assert_eq!(
        shape("&[String]"),
        TypeShape::Sequence(Box::new(TypeShape::Text))
    );
}

#[test_case("Box<i32>")]
#[test_case("Arc<String>")]
#[test_case("std::rc::Rc<str>")]
#[test_case("Cow<'a, str>")]
fn TypeShape___of___smart_pointers_are_opaque(source: &str) {
    assert_eq!(shape(source), TypeShape::Other);
}

#[test]
fn TypeShape___of___hash_sets_are_unordered() {
    let set = shape("HashSet<u8>");

    assert_eq!(set, TypeShape::Set(Box::new(TypeShape::Integral)));
    assert!(set.is_sequence());
    assert!(!set.is_ordered_sequence());
    assert!(shape("BTreeSet<u8>").is_ordered_sequence());
    assert!(shape("LinkedList<u8>").is_ordered_sequence());
}

#[test]
fn TypeShape___checked___unwraps_optional() {
    let optional = shape("Option<String>");

    assert_eq!(optional, TypeShape::Optional(Box::new(TypeShape::Text)));
    assert!(optional.checked().is_text());
}

#[test]
fn TypeShape___contains_decimal___looks_inside_containers() {
    assert!(shape("Option<Vec<f32>>").contains_decimal());
    assert!(!shape("Vec<u32>").contains_decimal());
}

#[test]
fn stored_type___str___stored_as_string() {
    let (stored, accessor) = stored_type(&parse_quote!(&str));

    assert_eq!(type_name(&stored), "::std::string::String");
    assert_eq!(accessor, Accessor::Str);
}

#[test]
fn stored_type___slice___stored_as_vec() {
    let (stored, accessor) = stored_type(&parse_quote!(&[u8]));

    assert_eq!(type_name(&stored), "::std::vec::Vec<u8>");
    assert_eq!(accessor, Accessor::Slice);
}

#[test]
fn stored_type___optional_borrow___stored_as_owned_option() {
    let (stored_str, str_accessor) = stored_type(&parse_quote!(Option<&str>));
    let (stored_ref, ref_accessor) = stored_type(&parse_quote!(Option<&Address>));

    assert_eq!(
        type_name(&stored_str),
        "::std::option::Option<::std::string::String>"
    );
    assert_eq!(str_accessor, Accessor::OptionalStr);
    assert_eq!(type_name(&stored_ref), "::std::option::Option<Address>");
    assert_eq!(ref_accessor, Accessor::OptionalBorrowed);
}

#[test]
fn stored_type___owned___unchanged() {
    let (stored, accessor) = stored_type(&parse_quote!(u32));

    assert_eq!(type_name(&stored), "u32");
    assert_eq!(accessor, Accessor::Owned);
}

#[test]
fn same_type___ignores_std_prefixes() {
    assert!(same_type(
        &parse_quote!(String),
        &parse_quote!(::std::string::String)
    ));
    assert!(same_type(
        &parse_quote!(Option<Vec<u8>>),
        &parse_quote!(::std::option::Option<::std::vec::Vec<u8>>)
    ));
    assert!(!same_type(&parse_quote!(u8), &parse_quote!(u16)));
}

#[test]
fn is_result___detects_result_paths() {
    assert!(is_result(&parse_quote!(Result<(), MyError>)));
    assert!(is_result(&parse_quote!(std::result::Result<(), MyError>)));
    assert!(!is_result(&parse_quote!(Option<u8>)));
}
