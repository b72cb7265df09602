//! Staged builder generation
//!
//! For a type `T` with mandatory fields `f_1..f_n` the generator emits:
//!
//! ```text
//! TBuilder::with_f_1(..)          -> impl F_2TBuilder
//! F_2TBuilder::with_f_2(..)       -> impl F_3TBuilder
//! ...
//! F_nTBuilder::with_f_n(..)       -> InnerTBuilder
//! InnerTBuilder::with_<any>(..)   -> InnerTBuilder
//! InnerTBuilder::build()          -> T
//! ```
//!
//! Every mandatory value is requested by a separate trait, so `build()` is
//! only reachable once all of them were supplied. The stage structs carrying
//! the values in between stay private behind the `impl Trait` returns.

use crate::contract::{self, Violation};
use crate::info::{ConstructorInformation, FieldInformation, TypeInformation};
use crate::runtime;
use blueprint_core::ContractKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;
use syn::ext::IdentExt;

/// How generated code turns field locals into the target type
pub(crate) struct Construction {
    /// Precondition guards over the locals, propagating violations
    pub guards: TokenStream,
    /// Expression building the target
    pub expr: TokenStream,
    /// Whether `expr` itself evaluates to a `Result`
    pub fallible_expr: bool,
}

/// Guards and constructor call over locals named after the stored fields.
pub(crate) fn construction(info: &TypeInformation) -> Construction {
    let target = &info.target;
    let names: Vec<&Ident> = info.stored_fields().map(|f| &f.name).collect();

    match &info.constructor {
        ConstructorInformation::Subclass => Construction {
            guards: TokenStream::new(),
            expr: quote!(#target::new(#(#names),*)),
            fallible_expr: info.has_contracts(),
        },
        constructor => {
            let guards = info.stored_fields().map(|field| {
                let name = &field.name;
                contract::guards(
                    field,
                    &quote!(#name),
                    ContractKind::Precondition,
                    Violation::Propagate,
                )
            });
            let expr = match constructor {
                ConstructorInformation::Function(path) => quote!(#path(#(#names),*)),
                _ => quote!(#target { #(#names),* }),
            };
            Construction {
                guards: quote!(#(#guards)*),
                expr,
                fallible_expr: false,
            }
        }
    }
}

fn with_name(field: &FieldInformation) -> Ident {
    format_ident!("with_{}", field.name.unraw())
}

/// Generate the builder items for the analyzed type.
pub fn generate(info: &TypeInformation) -> TokenStream {
    let rt = runtime();
    let vis = &info.vis;
    let target = &info.target;
    let builder = info.builder_name();
    let inner = info.inner_builder_name();
    let generics = &info.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let marker_ty = quote!(::std::marker::PhantomData<fn() -> #target #ty_generics>);
    let marker = quote!(::std::marker::PhantomData);

    let stored: Vec<&FieldInformation> = info.stored_fields().collect();
    let mandatory: Vec<&FieldInformation> = info.mandatory_fields().collect();
    let optional: Vec<&FieldInformation> = info.optional_fields().collect();

    let names: Vec<&Ident> = stored.iter().map(|f| &f.name).collect();
    let types: Vec<&syn::Type> = stored.iter().map(|f| &f.ty).collect();
    let withs: Vec<Ident> = stored.iter().map(|f| with_name(f)).collect();
    let optional_names: Vec<&Ident> = optional.iter().map(|f| &f.name).collect();
    let optional_types: Vec<&syn::Type> = optional.iter().map(|f| &f.ty).collect();
    let optional_defaults: Vec<TokenStream> = optional.iter().map(|f| f.default_value()).collect();

    let fallible = info.has_contracts();
    let output = if fallible {
        quote!(::std::result::Result<#target #ty_generics, #rt::ContractViolation>)
    } else {
        quote!(#target #ty_generics)
    };

    let Construction {
        guards,
        expr,
        fallible_expr,
    } = construction(info);
    let finish = match (fallible, fallible_expr) {
        (true, false) => quote!(::std::result::Result::Ok(#expr)),
        _ => expr,
    };

    let inner_doc = format!(
        "Builder for [`{target}`] once every mandatory field is set. Any field can still be changed."
    );
    let build_doc = if fallible {
        format!("Check every field contract and create the [`{target}`].")
    } else {
        format!("Create the [`{target}`].")
    };
    let with_docs = stored
        .iter()
        .map(|f| format!("Set `{}`.", f.display_name()));

    let inner_items = quote! {
        #[doc = #inner_doc]
        #[must_use]
        #vis struct #inner #generics #where_clause {
            #(#names: #types,)*
            __marker: #marker_ty,
        }

        impl #impl_generics #inner #ty_generics #where_clause {
            #(
                #[doc = #with_docs]
                pub fn #withs(mut self, #names: #types) -> Self {
                    self.#names = #names;
                    self
                }
            )*

            #[doc = #build_doc]
            pub fn build(self) -> #output {
                let Self { #(#names,)* __marker: _ } = self;
                #guards
                #finish
            }
        }
    };

    let entry_doc = format!("Entry point of the staged builder for [`{target}`].");

    let entry_items = if mandatory.is_empty() {
        let optional_withs: Vec<Ident> = optional.iter().map(|f| with_name(f)).collect();
        let build_withs: Vec<Ident> = optional
            .iter()
            .map(|f| format_ident!("build_with_{}", f.name.unraw()))
            .collect();

        quote! {
            #[doc = #entry_doc]
            #[derive(Debug, Clone, Copy, Default)]
            #vis struct #builder;

            impl #builder {
                /// Builder holding the default of every field.
                pub fn get #impl_generics () -> #inner #ty_generics #where_clause {
                    #inner {
                        #(#optional_names: #optional_defaults,)*
                        __marker: #marker,
                    }
                }

                /// Create the value from defaults only.
                pub fn build #impl_generics () -> #output #where_clause {
                    Self::get().build()
                }

                #(
                    pub fn #optional_withs #impl_generics (#optional_names: #optional_types) -> #inner #ty_generics #where_clause {
                        Self::get().#optional_withs(#optional_names)
                    }

                    pub fn #build_withs #impl_generics (#optional_names: #optional_types) -> #output #where_clause {
                        Self::get().#optional_withs(#optional_names).build()
                    }
                )*
            }
        }
    } else {
        stages(info, &mandatory, &optional, &entry_doc)
    };

    tracing::debug!(
        target_type = %target,
        mandatory = mandatory.len(),
        optional = optional.len(),
        "generated builder"
    );

    quote! {
        #entry_items
        #inner_items
    }
}

/// Entry struct, stage traits and hidden stage structs for `n >= 1` mandatory fields
fn stages(
    info: &TypeInformation,
    mandatory: &[&FieldInformation],
    optional: &[&FieldInformation],
    entry_doc: &str,
) -> TokenStream {
    let vis = &info.vis;
    let target = &info.target;
    let builder = info.builder_name();
    let inner = info.inner_builder_name();
    let generics = &info.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let marker_ty = quote!(::std::marker::PhantomData<fn() -> #target #ty_generics>);
    let marker = quote!(::std::marker::PhantomData);

    let optional_names: Vec<&Ident> = optional.iter().map(|f| &f.name).collect();
    let optional_defaults: Vec<TokenStream> = optional.iter().map(|f| f.default_value()).collect();
    let n = mandatory.len();

    let stage_struct = |i: usize| format_ident!("{}Stage{}", builder, i);

    // Value returned once the i-th mandatory field (0-based) is supplied
    let returned = |i: usize| -> TokenStream {
        if i + 1 == n {
            quote!(#inner #ty_generics)
        } else {
            let next = info.stage_trait_name(mandatory[i + 1]);
            quote!(impl #next #ty_generics)
        }
    };

    // Expression building that value, with mandatory[..=i] in scope
    let advance = |i: usize| -> TokenStream {
        let held: Vec<&Ident> = mandatory[..=i].iter().map(|f| &f.name).collect();
        if i + 1 == n {
            quote! {
                #inner {
                    #(#held,)*
                    #(#optional_names: #optional_defaults,)*
                    __marker: #marker,
                }
            }
        } else {
            let stage = stage_struct(i + 2);
            quote! {
                #stage {
                    #(#held,)*
                    __marker: #marker,
                }
            }
        }
    };

    let first = mandatory[0];
    let first_name = &first.name;
    let first_ty = &first.ty;
    let first_with = with_name(first);
    let first_doc = format!("Set `{}`, the first mandatory field.", first.display_name());
    let first_returned = returned(0);
    let first_advance = advance(0);

    let mut items = quote! {
        #[doc = #entry_doc]
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #builder;

        impl #builder {
            #[doc = #first_doc]
            pub fn #first_with #impl_generics (#first_name: #first_ty) -> #first_returned #where_clause {
                #first_advance
            }
        }
    };

    for i in 1..n {
        let field = mandatory[i];
        let name = &field.name;
        let ty = &field.ty;
        let with = with_name(field);
        let stage_trait = info.stage_trait_name(field);
        let stage = stage_struct(i + 1);
        let held: Vec<&Ident> = mandatory[..i].iter().map(|f| &f.name).collect();
        let held_types: Vec<&syn::Type> = mandatory[..i].iter().map(|f| &f.ty).collect();
        let next = returned(i);
        let body = advance(i);
        let trait_doc = format!(
            "Stage of the [`{target}`] builder that asks for `{}`.",
            field.display_name()
        );
        let with_doc = format!("Set `{}`.", field.display_name());

        items.extend(quote! {
            #[doc = #trait_doc]
            #vis trait #stage_trait #generics #where_clause {
                #[doc = #with_doc]
                fn #with(self, #name: #ty) -> #next;
            }

            #[doc(hidden)]
            struct #stage #generics #where_clause {
                #(#held: #held_types,)*
                __marker: #marker_ty,
            }

            impl #impl_generics #stage_trait #ty_generics for #stage #ty_generics #where_clause {
                fn #with(self, #name: #ty) -> #next {
                    let Self { #(#held,)* __marker: _ } = self;
                    #body
                }
            }
        });
    }

    items
}
