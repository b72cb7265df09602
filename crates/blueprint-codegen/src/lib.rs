//! blueprint-codegen - Type analysis and item generation for blueprint
//!
//! This crate holds everything between the token streams handed to the
//! procedural macros and the items they emit:
//!
//! - [`info`] analyzes structs and accessor traits into [`TypeInformation`];
//! - [`contract`] parses validators into guard clauses;
//! - [`builder`], [`representing`], [`converter`] and [`subclass`] generate items;
//! - [`scan`] finds annotated items in whole source files for the CLI.
//!
//! It is a plain library so that the same generators serve `blueprint-macros`
//! and the `blueprint` command line tool, and so that they can be unit tested.
//! Generated code refers to the runtime through `::blueprint::__private`.

pub mod attrs;
pub mod builder;
pub mod contract;
pub mod converter;
pub mod info;
pub mod interceptor;
pub mod naming;
pub mod representing;
pub mod scan;
pub mod shape;
pub mod subclass;

pub use info::{FieldInformation, MethodInformation, TypeInformation, TypeSummary};
pub use scan::{Derives, ScannedItem};
pub use subclass::GeneratedSubclass;

use proc_macro2::TokenStream;
use quote::quote;
use serde::{Deserialize, Serialize};
use syn::{DeriveInput, ItemTrait};

/// Path generated code uses to reach the runtime
pub(crate) fn runtime() -> TokenStream {
    quote!(::blueprint::__private)
}

/// Switches and names shared by every generator.
///
/// The macros always use the defaults. The CLI reads them from the
/// `[generator]` table of `blueprint.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Appended to the target name to name its builder
    pub builder_suffix: String,
    /// Appended to an accessor trait name to name its subclass
    pub subclass_suffix: String,
    /// Generate builders for accessor traits unless `builder = false` is given
    pub builders: bool,
    /// Generate representing impls for subclasses
    pub representing: bool,
    /// Generate converters for every subclass, not only those marked `converter`
    pub converters: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            builder_suffix: "Builder".to_string(),
            subclass_suffix: "Subclass".to_string(),
            builders: true,
            representing: true,
            converters: false,
        }
    }
}

/// `#[derive(Builder)]`
pub fn derive_builder(input: &DeriveInput) -> darling::Result<TokenStream> {
    let info = TypeInformation::from_derive_input(input, &GeneratorOptions::default())?;
    Ok(builder::generate(&info))
}

/// `#[derive(Representing)]`
pub fn derive_representing(input: &DeriveInput) -> darling::Result<TokenStream> {
    let info = TypeInformation::from_derive_input(input, &GeneratorOptions::default())?;
    Ok(representing::generate(&info))
}

/// `#[derive(Validate)]`
pub fn derive_validate(input: &DeriveInput) -> darling::Result<TokenStream> {
    let info = TypeInformation::from_derive_input(input, &GeneratorOptions::default())?;
    Ok(contract::expand_validated(&info))
}

/// `#[derive(Convert)]`
pub fn derive_convert(input: &DeriveInput) -> darling::Result<TokenStream> {
    let info = TypeInformation::from_derive_input(input, &GeneratorOptions::default())?;
    Ok(converter::generate(&info))
}

/// `#[generate(...)]` on an accessor trait: the cleaned trait followed by
/// the subclass and its companions.
pub fn generate_subclass(args: TokenStream, item: &ItemTrait) -> darling::Result<TokenStream> {
    let args = attrs::GenerateArgs::from_tokens(args)?;
    let generated = subclass::generate(item, &args, &GeneratorOptions::default())?;
    Ok(generated.into_token_stream())
}
