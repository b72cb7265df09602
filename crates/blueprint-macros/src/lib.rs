//! blueprint-macros - Procedural macros for blueprint
//!
//! This crate provides:
//! - `#[derive(Builder)]` - Staged builder enforcing every mandatory field
//! - `#[derive(Representing)]` - Equality, hashing, display and ordering
//! - `#[derive(Validate)]` - `Validated` impl checking field contracts
//! - `#[derive(Convert)]` - Conversion to and from `Value`
//! - `#[generate]` - Struct implementing an accessor trait
//!
//! The analysis and generation live in `blueprint-codegen`. Use the macros
//! through the `blueprint` crate, whose runtime the generated code calls.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, ItemTrait, parse_macro_input};

/// Staged builder for a struct with named fields
///
/// Every field without a default that is not an `Option` is mandatory and
/// requested by its own stage, in declaration order. `build()` returns a
/// `Result` when any field carries a `#[validate(...)]` contract.
///
/// # Example
///
/// ```ignore
/// #[derive(Builder)]
/// struct Person {
///     name: String,
///     #[validate(non_negative)]
///     age: i32,
///     #[builder(default = 1)]
///     visits: u32,
///     nickname: Option<String>,
/// }
///
/// let person = PersonBuilder::with_name("Ada".into())
///     .with_age(36)
///     .with_nickname(Some("Countess".into()))
///     .build()?;
/// ```
#[proc_macro_derive(Builder, attributes(builder, validate))]
pub fn derive_builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit(blueprint_codegen::derive_builder(&input), quote!()).into()
}

/// Equality, hashing, display and optional ordering over the fields
///
/// `#[representing(skip)]` leaves a field out. `#[representing(ordered)]`
/// adds a lexicographic `Ord`; `#[representing(partial)]` restricts the impls
/// to those floating point fields support.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Representing)]
/// #[representing(ordered)]
/// struct Version {
///     major: u16,
///     minor: u16,
/// }
/// ```
#[proc_macro_derive(Representing, attributes(representing))]
pub fn derive_representing(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit(blueprint_codegen::derive_representing(&input), quote!()).into()
}

/// `Validated` impl checking every field contract as an invariant
///
/// # Example
///
/// ```ignore
/// #[derive(Validate)]
/// struct Range {
///     #[validate(non_negative)]
///     start: i64,
///     #[validate(positive, message = "The # must be positive, got $.")]
///     length: i64,
/// }
/// ```
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit(blueprint_codegen::derive_validate(&input), quote!()).into()
}

/// `Convertible` impl mapping the struct to a `Value::Tuple`
///
/// Fields marked `#[convert(skip)]` or `#[representing(skip)]` are left out
/// and recovered with their builder default.
#[proc_macro_derive(Convert, attributes(convert, builder, representing, validate))]
pub fn derive_convert(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit(blueprint_codegen::derive_convert(&input), quote!()).into()
}

/// Generate a struct implementing an accessor trait
///
/// Getters (`&self`, no arguments) become stored fields, setters
/// (`&mut self`, `set_<field>`) write them. Arguments:
///
/// - `name = "Type"` - name of the struct, `<Trait>Subclass` by default
/// - `builder = false` - skip the staged builder
/// - `converter` - also implement `Convertible`
/// - `ordered`, `partial` - as for `Representing`
///
/// Getters accept `#[validate]`, `#[default(expr)]`, `#[derived(expr)]`,
/// `#[normalize(expr)]` and `#[representing(skip)]`; any method accepts
/// `#[logged]`.
///
/// # Example
///
/// ```ignore
/// #[generate(converter)]
/// pub trait Account {
///     #[validate(non_empty)]
///     fn owner(&self) -> &str;
///     fn balance(&self) -> i64;
///     #[logged(level = "info")]
///     fn set_balance(&mut self, balance: i64);
/// }
///
/// let account = AccountSubclass::new("Ada".into(), 10)?;
/// ```
#[proc_macro_attribute]
pub fn generate(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemTrait);
    let fallback = blueprint_codegen::subclass::strip_helpers(&item);
    emit(
        blueprint_codegen::generate_subclass(attr.into(), &item),
        quote!(#fallback),
    )
    .into()
}

/// The generated items, or the accumulated errors followed by `fallback`
fn emit(
    result: darling::Result<proc_macro2::TokenStream>,
    fallback: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    match result {
        Ok(tokens) => tokens,
        Err(err) => {
            let errors = err.write_errors();
            quote! {
                #fallback
                #errors
            }
        }
    }
}
