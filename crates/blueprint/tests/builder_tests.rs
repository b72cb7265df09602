//! Integration tests for generated staged builders.

#![allow(non_snake_case)]

use blueprint::{Builder, ContractKind};

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Person {
    name: String,
    age: u32,
    nickname: Option<String>,
    #[builder(default)]
    tags: Vec<String>,
    #[builder(default = 1)]
    visits: u32,
}

#[derive(Debug, PartialEq, Builder)]
struct Settings {
    #[builder(default = 3)]
    retries: u8,
    proxy: Option<String>,
}

#[derive(Debug, PartialEq, Builder)]
#[builder(constructor = Point::normalized)]
struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn normalized(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(-100, 100),
            y: y.clamp(-100, 100),
        }
    }
}

#[derive(Debug, Builder)]
struct Account {
    #[validate(non_empty, max_size = 8)]
    owner: String,
    #[validate(non_negative)]
    balance: i64,
    #[validate(pattern = "[A-Z]{2}[0-9]{2}")]
    iban_prefix: Option<String>,
}

#[derive(Debug, PartialEq, Builder)]
struct Pair<A, B: Default> {
    left: A,
    #[builder(default)]
    right: B,
}

#[derive(Debug, PartialEq, Builder)]
struct Wrapping {
    outer: u32,
    inner: u32,
    stage: u32,
}

// =============================================================================
// Stages
// =============================================================================

#[test]
fn Builder___field_named_inner___does_not_clash_with_inner_builder() {
    let wrapping = WrappingBuilder::with_outer(1)
        .with_inner(2)
        .with_stage(3)
        .build();

    assert_eq!(
        wrapping,
        Wrapping {
            outer: 1,
            inner: 2,
            stage: 3,
        }
    );
}

#[test]
fn Builder___stage_traits___are_named_after_builder_and_field() {
    fn finish(stage: impl WrappingBuilderStageStage) -> Wrapping {
        stage.with_stage(9).build()
    }

    let wrapping = finish(WrappingBuilder::with_outer(1).with_inner(2));

    assert_eq!(wrapping.stage, 9);
}

#[test]
fn Builder___mandatory_then_optional___builds_all_fields() {
    let person = PersonBuilder::with_name("Ada".to_string())
        .with_age(36)
        .with_nickname(Some("Countess".to_string()))
        .with_tags(vec!["math".to_string()])
        .build();

    assert_eq!(
        person,
        Person {
            name: "Ada".to_string(),
            age: 36,
            nickname: Some("Countess".to_string()),
            tags: vec!["math".to_string()],
            visits: 1,
        }
    );
}

#[test]
fn Builder___optional_fields_left_out___use_defaults() {
    let person = PersonBuilder::with_name("Grace".to_string())
        .with_age(85)
        .build();

    assert_eq!(person.nickname, None);
    assert!(person.tags.is_empty());
    assert_eq!(person.visits, 1);
}

#[test]
fn Builder___mandatory_field___can_be_changed_after_stages() {
    let person = PersonBuilder::with_name("Ada".to_string())
        .with_age(36)
        .with_name("Ada Lovelace".to_string())
        .build();

    assert_eq!(person.name, "Ada Lovelace");
}

#[test]
fn Builder___optional_setter___last_value_wins() {
    let first = PersonBuilder::with_name("A".to_string()).with_age(1).with_visits(7);

    let person = first.with_visits(8).build();

    assert_eq!(person.visits, 8);
}

#[test]
fn Builder___no_mandatory_fields___builds_from_entry() {
    assert_eq!(
        SettingsBuilder::build(),
        Settings {
            retries: 3,
            proxy: None
        }
    );
    assert_eq!(SettingsBuilder::get().with_retries(5).build().retries, 5);
    assert_eq!(
        SettingsBuilder::build_with_proxy(Some("socks".to_string())).proxy,
        Some("socks".to_string())
    );
    assert_eq!(SettingsBuilder::with_retries(9).build().retries, 9);
}

#[test]
fn Builder___constructor_function___receives_fields_in_order() {
    let point = PointBuilder::with_x(500).with_y(-7).build();

    assert_eq!(point, Point { x: 100, y: -7 });
}

#[test]
fn Builder___generic_struct___infers_type_parameters() {
    let pair: Pair<&str, u8> = PairBuilder::with_left("left").build();

    assert_eq!(pair, Pair { left: "left", right: 0 });
}

// =============================================================================
// Contracts
// =============================================================================

#[test]
fn Builder___valid_values___pass_contracts() {
    let account = AccountBuilder::with_owner("Ada".to_string())
        .with_balance(0)
        .with_iban_prefix(Some("DE44".to_string()))
        .build()
        .unwrap();

    assert_eq!(account.owner, "Ada");
    assert_eq!(account.balance, 0);
}

#[test]
fn Builder___empty_owner___violates_precondition() {
    let err = AccountBuilder::with_owner(String::new())
        .with_balance(1)
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), ContractKind::Precondition);
    assert_eq!(err.message(), "The owner may not be empty.");
}

#[test]
fn Builder___too_long_owner___reports_value() {
    let err = AccountBuilder::with_owner("Augusta Ada".to_string())
        .with_balance(1)
        .build()
        .unwrap_err();

    assert_eq!(
        err.message(),
        "The owner has to contain at most 8 characters but was \"Augusta Ada\"."
    );
}

#[test]
fn Builder___negative_balance___violates_precondition() {
    let err = AccountBuilder::with_owner("Ada".to_string())
        .with_balance(-5)
        .build()
        .unwrap_err();

    assert_eq!(err.message(), "The balance may not be negative but was -5.");
}

#[test]
fn Builder___absent_optional_value___skips_its_contracts() {
    let account = AccountBuilder::with_owner("Ada".to_string())
        .with_balance(1)
        .build();

    assert!(account.is_ok());
}

#[test]
fn Builder___present_optional_value___is_checked() {
    let err = AccountBuilder::with_owner("Ada".to_string())
        .with_balance(1)
        .with_iban_prefix(Some("de44".to_string()))
        .build()
        .unwrap_err();

    assert_eq!(
        err.message(),
        "The iban_prefix has to match `[A-Z]{2}[0-9]{2}` but was \"de44\"."
    );
}
