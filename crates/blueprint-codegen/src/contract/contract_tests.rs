#![allow(non_snake_case)]

use super::*;
use syn::parse_quote;

fn contracts(attr: syn::Attribute, shape: TypeShape) -> darling::Result<Vec<Contract>> {
    ValidateArgs::from_attribute(&attr)?.contracts(&shape)
}

fn keys(contracts: &[Contract]) -> Vec<&str> {
    contracts.iter().map(Contract::key).collect()
}

fn squashed(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn Contract___message___interpolates_name_and_value() {
    let contract = Contract::new("positive", quote!(true), "The # has to be positive but was $.");

    let message = contract.message("age").to_string();

    assert!(message.contains("format !"));
    assert!(message.contains("\"The age has to be positive but was {value:?}.\""));
}

#[test]
fn Contract___message___without_value_uses_plain_string() {
    let contract = Contract::new("non_empty", quote!(true), "The # may not be empty.");

    let message = contract.message("name").to_string();

    assert!(message.contains("String :: from"));
    assert!(message.contains("\"The name may not be empty.\""));
}

#[test]
fn Contract___message___doubled_markers_are_literal() {
    let contract = Contract::new("check", quote!(true), "## and $$ of #");

    let message = contract.message("tag").to_string();

    assert!(message.contains("\"# and $ of tag\""));
}

#[test]
fn Contract___message___escapes_braces_when_formatting() {
    let contract = Contract::new("check", quote!(true), "{#} was $");

    let message = contract.message("id").to_string();

    assert!(message.contains("\"{{id}} was {value:?}\""));
}

// ============================================================================
// Guards
// ============================================================================

#[test]
fn Contract___guard___binds_reference_to_value() {
    let contract = Contract::new("positive", quote!(value.is_positive()), "bad");

    let guard = contract.guard(
        "age",
        &quote!(age),
        false,
        ContractKind::Precondition,
        Violation::Propagate,
    );

    let squashed = squashed(&guard);
    assert!(squashed.contains("letvalue=&age;"));
    assert!(squashed.contains("ContractViolation::precondition"));
    assert!(squashed.contains("return::std::result::Result::Err"));
}

#[test]
fn Contract___guard___nullable_checks_only_present_values() {
    let contract = Contract::new("positive", quote!(true), "bad");

    let guard = contract.guard(
        "age",
        &quote!(self.age),
        true,
        ContractKind::Postcondition,
        Violation::Raise,
    );

    let squashed = squashed(&guard);
    assert!(squashed.contains("iflet::std::option::Option::Some(value)=&self.age"));
    assert!(squashed.contains("ContractViolation::postcondition"));
    assert!(squashed.contains("violation.raise();"));
}

// ============================================================================
// Validator keys
// ============================================================================

#[test]
fn ValidateArgs___flags___become_contracts_in_declaration_order() {
    let found = contracts(parse_quote!(#[validate(positive, even)]), TypeShape::Integral).unwrap();

    assert_eq!(keys(&found), vec!["positive", "even"]);
}

#[test]
fn ValidateArgs___message___overrides_every_template() {
    let found = contracts(
        parse_quote!(#[validate(non_empty, max_size = 8, message = "Bad #.")]),
        TypeShape::Text,
    )
    .unwrap();

    assert!(found.iter().all(|c| c.template() == "Bad #."));
}

#[test]
fn ValidateArgs___size_on_text___counts_characters() {
    let found = contracts(parse_quote!(#[validate(min_size = 3)]), TypeShape::Text).unwrap();

    assert_eq!(
        found[0].template(),
        "The # has to contain at least 3 characters but was $."
    );
}

#[test]
fn ValidateArgs___size_on_sequence___counts_elements() {
    let shape = TypeShape::Sequence(Box::new(TypeShape::Integral));

    let found = contracts(parse_quote!(#[validate(size = 2)]), shape).unwrap();

    assert_eq!(
        found[0].template(),
        "The # has to contain exactly 2 elements but was $."
    );
}

#[test]
fn ValidateArgs___optional_field___is_checked_by_inner_shape() {
    let shape = TypeShape::Optional(Box::new(TypeShape::Integral));

    let found = contracts(parse_quote!(#[validate(negative)]), shape).unwrap();

    assert_eq!(keys(&found), vec!["negative"]);
}

#[test]
fn ValidateArgs___relative_bound___keeps_expression() {
    let found = contracts(
        parse_quote!(#[validate(greater_than_or_equal_to = 18)]),
        TypeShape::Integral,
    )
    .unwrap();

    assert_eq!(
        found[0].template(),
        "The # has to be greater than or equal to 18 but was $."
    );
}

#[test]
fn ValidateArgs___no_empty_elements___needs_optional_elements() {
    let shape = TypeShape::Sequence(Box::new(TypeShape::Optional(Box::new(TypeShape::Text))));

    let found = contracts(parse_quote!(#[validate(no_empty_elements)]), shape).unwrap();

    assert_eq!(keys(&found), vec!["no_empty_elements"]);
}

#[test]
fn ValidateArgs___numeric_key_on_text___is_rejected() {
    let err = contracts(parse_quote!(#[validate(positive)]), TypeShape::Text).unwrap_err();

    assert!(
        err.to_string()
            .contains("`positive` can only be applied to numeric fields")
    );
}

#[test]
fn ValidateArgs___parity_on_decimal___is_rejected() {
    let err = contracts(parse_quote!(#[validate(even)]), TypeShape::Decimal).unwrap_err();

    assert!(
        err.to_string()
            .contains("`even` can only be applied to integral fields")
    );
}

#[test]
fn ValidateArgs___several_misapplied_keys___are_all_reported() {
    let err = contracts(parse_quote!(#[validate(positive, ascending)]), TypeShape::Bool).unwrap_err();

    assert_eq!(err.len(), 2);
}

#[test]
fn ValidateArgs___invalid_pattern___is_rejected() {
    let err = contracts(parse_quote!(#[validate(pattern = "(")]), TypeShape::Text).unwrap_err();

    assert!(err.to_string().contains("invalid regular expression"));
}

#[test]
fn ValidateArgs___pattern___compiles_lazily_in_static() {
    let found = contracts(parse_quote!(#[validate(pattern = "[a-z]+")]), TypeShape::Text).unwrap();

    let guard = found[0].guard(
        "code",
        &quote!(code),
        false,
        ContractKind::Precondition,
        Violation::Propagate,
    );

    let squashed = squashed(&guard);
    assert!(squashed.contains("staticPATTERN"));
    assert!(squashed.contains("Pattern::new(\"[a-z]+\")"));
}

#[test]
fn ValidateArgs___unknown_key___is_rejected() {
    let result = contracts(parse_quote!(#[validate(shiny)]), TypeShape::Text);

    assert!(result.is_err());
}

#[test]
fn ValidateArgs___check___applies_to_any_shape() {
    let found = contracts(
        parse_quote!(#[validate(check = value.is_ascii())]),
        TypeShape::Other,
    )
    .unwrap();

    assert_eq!(keys(&found), vec!["check"]);
}

// ============================================================================
// Ordering
// ============================================================================

fn ordering_guard(shape: TypeShape) -> String {
    let found = contracts(parse_quote!(#[validate(ascending)]), shape).unwrap();
    let guard = found[0].guard(
        "items",
        &quote!(items),
        false,
        ContractKind::Invariant,
        Violation::Propagate,
    );
    squashed(&guard)
}

#[test]
fn ValidateArgs___ascending_on_plain_elements___orders_every_element() {
    let guard = ordering_guard(TypeShape::Sequence(Box::new(TypeShape::Integral)));

    assert!(guard.contains("validation::is_ordered(value.iter(),false,true)"));
}

#[test]
fn ValidateArgs___ascending_on_optional_elements___skips_empty_ones() {
    let shape = TypeShape::Sequence(Box::new(TypeShape::Optional(Box::new(TypeShape::Integral))));

    let guard = ordering_guard(shape);

    assert!(guard.contains("validation::is_ordered_present(value.iter(),false,true)"));
}

#[test]
fn ValidateArgs___ordering_on_hash_set___is_rejected() {
    let shape = TypeShape::Set(Box::new(TypeShape::Integral));

    let err = contracts(parse_quote!(#[validate(strictly_descending)]), shape).unwrap_err();

    assert!(err.to_string().contains(
        "`strictly_descending` can only be applied to ordered sequences, not hash sets"
    ));
}

#[test]
fn ValidateArgs___unique_on_hash_set___is_accepted() {
    let shape = TypeShape::Set(Box::new(TypeShape::Integral));

    let found = contracts(parse_quote!(#[validate(unique, non_empty)]), shape).unwrap();

    assert_eq!(keys(&found), vec!["unique", "non_empty"]);
}

#[test]
fn ValidateArgs___numeric_key_on_smart_pointer___is_rejected() {
    let shape = TypeShape::of(&parse_quote!(Box<i32>));

    let err = contracts(parse_quote!(#[validate(positive)]), shape).unwrap_err();

    assert!(
        err.to_string()
            .contains("`positive` can only be applied to numeric fields")
    );
}
