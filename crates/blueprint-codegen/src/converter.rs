//! Conversion between a type and the generic [`Value`] representation
//!
//! A converted type maps to a `Value::Tuple` of its converted fields in
//! declaration order. Recovering it reads the fields back, fills any
//! unconverted field with its default, and constructs the type through the
//! same path as its builder, so contracts are enforced on the way in.
//!
//! [`Value`]: blueprint_core::Value

use crate::builder::{self, Construction};
use crate::info::{FieldInformation, TypeInformation};
use crate::runtime;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, parse_quote};

/// Generate `impl Convertible` for the analyzed type.
pub fn generate(info: &TypeInformation) -> TokenStream {
    let rt = runtime();
    let target = &info.target;
    let type_name = target.to_string();

    let converted: Vec<&FieldInformation> = info.converted_fields().collect();
    let recovered: Vec<&FieldInformation> = info
        .stored_fields()
        .filter(|f| !converted.iter().any(|c| c.name == f.name))
        .collect();

    let mut generics = info.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for field in &converted {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: #rt::Convertible));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names: Vec<&Ident> = converted.iter().map(|f| &f.name).collect();
    let types: Vec<&syn::Type> = converted.iter().map(|f| &f.ty).collect();
    let labels: Vec<String> = converted.iter().map(|f| f.display_name()).collect();
    let arity = converted.len();

    let recovered_names: Vec<&Ident> = recovered.iter().map(|f| &f.name).collect();
    let recovered_types: Vec<&syn::Type> = recovered.iter().map(|f| &f.ty).collect();
    let recovered_defaults: Vec<TokenStream> = recovered.iter().map(|f| f.default_value()).collect();

    let read = if converted.is_empty() {
        quote!(value.into_record(#type_name, 0)?;)
    } else {
        quote! {
            let mut __record = value.into_record(#type_name, #arity)?;
            #(let #names: #types = __record.next(#labels)?;)*
        }
    };

    let Construction {
        guards,
        expr,
        fallible_expr,
    } = builder::construction(info);
    let constructed = if fallible_expr {
        quote!(#expr?)
    } else {
        expr
    };

    tracing::debug!(target_type = %target, fields = arity, "generated converter");

    quote! {
        #[automatically_derived]
        impl #impl_generics #rt::Convertible for #target #ty_generics #where_clause {
            fn to_value(&self) -> #rt::Value {
                #rt::Value::Tuple(::std::vec![
                    #(#rt::Convertible::to_value(&self.#names)),*
                ])
            }

            fn from_value(value: #rt::Value) -> ::std::result::Result<Self, #rt::ConversionError> {
                #read
                #(let #recovered_names: #recovered_types = #recovered_defaults;)*
                #guards
                ::std::result::Result::Ok(#constructed)
            }
        }
    }
}

#[cfg(test)]
#[path = "converter/converter_tests.rs"]
mod converter_tests;
