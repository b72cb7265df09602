#![allow(non_snake_case)]

use super::*;
use crate::GeneratorOptions;
use syn::DeriveInput;

fn analyze(input: DeriveInput) -> TypeInformation {
    TypeInformation::from_derive_input(&input, &GeneratorOptions::default()).unwrap()
}

fn squashed(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

#[test]
fn generate___to_value___builds_tuple_of_converted_fields() {
    let info = analyze(parse_quote! {
        struct Person {
            name: String,
            age: u32,
        }
    });

    let generated = squashed(&generate(&info));

    assert!(generated.contains(
        "::blueprint::__private::Value::Tuple(::std::vec![::blueprint::__private::Convertible::to_value(&self.name),::blueprint::__private::Convertible::to_value(&self.age)])"
    ));
}

#[test]
fn generate___from_value___reads_fields_in_declaration_order() {
    let info = analyze(parse_quote! {
        struct Person {
            name: String,
            age: u32,
        }
    });

    let generated = squashed(&generate(&info));

    assert!(generated.contains("letmut__record=value.into_record(\"Person\",2usize)?;"));
    let name = generated.find("letname:String=__record.next(\"name\")?;").unwrap();
    let age = generated.find("letage:u32=__record.next(\"age\")?;").unwrap();
    assert!(name < age);
    assert!(generated.contains("::std::result::Result::Ok(Person{name,age})"));
}

#[test]
fn generate___skipped_field___is_recovered_with_default() {
    let info = analyze(parse_quote! {
        struct Session {
            id: u64,
            #[convert(skip)]
            #[builder(default = 30)]
            timeout: u32,
        }
    });

    let generated = squashed(&generate(&info));

    assert!(generated.contains("into_record(\"Session\",1usize)"));
    assert!(generated.contains("lettimeout:u32=30;"));
    assert!(!generated.contains("to_value(&self.timeout)"));
}

#[test]
fn generate___contracts___are_checked_before_construction() {
    let info = analyze(parse_quote! {
        struct Order {
            #[validate(positive)]
            quantity: i32,
        }
    });

    let generated = squashed(&generate(&info));

    let guard = generated.find("letvalue=&quantity;").unwrap();
    let construct = generated.find("Ok(Order{quantity})").unwrap();
    assert!(guard < construct);
}

#[test]
fn generate___no_converted_fields___checks_empty_record() {
    let info = analyze(parse_quote! {
        struct Unit {
            #[representing(skip)]
            #[builder(default)]
            scratch: Vec<u8>,
        }
    });

    let generated = squashed(&generate(&info));

    assert!(generated.contains("value.into_record(\"Unit\",0)?;"));
    assert!(!generated.contains("__record"));
}

#[test]
fn generate___generic_struct___bounds_converted_types() {
    let info = analyze(parse_quote! {
        struct Wrapper<T> {
            inner: T,
        }
    });

    let generated = squashed(&generate(&info));

    assert!(generated.contains("whereT:::blueprint::__private::Convertible"));
}
