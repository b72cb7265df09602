//! Subclasses of accessor traits
//!
//! `#[generate]` on a trait of getters and setters produces a struct storing
//! one field per getter, a contract-checking `new`, the trait impl, and,
//! depending on the options, a builder, representing impls and a converter.

use crate::attrs::GenerateArgs;
use crate::contract::{self, Violation};
use crate::info::{self, FieldInformation, MethodInformation, MethodKind, TypeInformation};
use crate::interceptor::{self, returns_unit};
use crate::shape::Accessor;
use crate::{GeneratorOptions, builder, converter, representing, runtime};
use blueprint_core::ContractKind;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{FnArg, Ident, ItemTrait, Pat, TraitItem, parse_quote};

/// Output of `#[generate]` for one accessor trait
pub struct GeneratedSubclass {
    /// The trait with every generator attribute removed
    pub item: ItemTrait,
    pub info: TypeInformation,
    /// The subclass and its companions
    pub items: TokenStream,
}

impl GeneratedSubclass {
    pub fn into_token_stream(self) -> TokenStream {
        let item = self.item;
        let items = self.items;
        quote! {
            #item
            #items
        }
    }
}

/// Analyze an accessor trait and generate everything it asks for.
pub fn generate(
    item: &ItemTrait,
    args: &GenerateArgs,
    options: &GeneratorOptions,
) -> darling::Result<GeneratedSubclass> {
    let info = TypeInformation::from_item_trait(item, args, options)?;

    let mut items = subclass(item, &info);
    if args.builder.unwrap_or(options.builders) {
        items.extend(builder::generate(&info));
    }
    if options.representing {
        items.extend(representing::generate(&info));
    }
    if args.converter.is_present() || options.converters {
        items.extend(converter::generate(&info));
    }

    tracing::debug!(
        source_trait = %item.ident,
        target_type = %info.target,
        "generated subclass"
    );

    Ok(GeneratedSubclass {
        item: clean_trait(item, &info),
        info,
        items,
    })
}

/// The trait without generator attributes.
///
/// Used as the fallback output when analysis fails, so that the attributes
/// do not cause follow-up errors.
pub fn strip_helpers(item: &ItemTrait) -> ItemTrait {
    let mut item = item.clone();
    for trait_item in &mut item.items {
        if let TraitItem::Fn(method) = trait_item {
            method.attrs.retain(|attr| !info::is_helper(attr));
        }
    }
    item
}

/// Strip the helper attributes and wrap intercepted provided methods in place.
fn clean_trait(item: &ItemTrait, info: &TypeInformation) -> ItemTrait {
    let mut item = strip_helpers(item);
    for trait_item in &mut item.items {
        let TraitItem::Fn(method) = trait_item else {
            continue;
        };
        let Some(provided) = info
            .methods
            .iter()
            .find(|m| matches!(m.kind, MethodKind::Provided) && m.sig.ident == method.sig.ident)
        else {
            continue;
        };
        if provided.interceptors.is_empty() {
            continue;
        }
        if let Some(block) = &method.default {
            let wrapped = interceptor::intercept(
                &provided.interceptors,
                &provided.name(),
                block.to_token_stream(),
                returns_unit(&method.sig.output),
            );
            method.default = Some(parse_quote!({ #wrapped }));
        }
    }
    item
}

fn subclass(item: &ItemTrait, info: &TypeInformation) -> TokenStream {
    let rt = runtime();
    let trait_ident = &item.ident;
    let target = &info.target;
    let vis = &info.vis;

    let names: Vec<&Ident> = info.fields.iter().map(|f| &f.name).collect();
    let types: Vec<&syn::Type> = info.fields.iter().map(|f| &f.ty).collect();
    let field_docs = info.fields.iter().map(|f| {
        let docs = &f.docs;
        quote!(#(#[doc = #docs])*)
    });
    let docs = if info.docs.is_empty() {
        vec![format!("Generated implementation of [`{trait_ident}`].")]
    } else {
        info.docs.clone()
    };

    let stored: Vec<&FieldInformation> = info.stored_fields().collect();
    let stored_names: Vec<&Ident> = stored.iter().map(|f| &f.name).collect();
    let stored_types: Vec<&syn::Type> = stored.iter().map(|f| &f.ty).collect();

    let normalizations = stored.iter().filter_map(|field| {
        let name = &field.name;
        field.normalize.as_ref().map(|expr| {
            quote! {
                let #name = {
                    let value = #name;
                    #expr
                };
            }
        })
    });
    let preconditions = stored.iter().map(|field| {
        let name = &field.name;
        contract::guards(
            field,
            &quote!(#name),
            ContractKind::Precondition,
            Violation::Propagate,
        )
    });
    let derivations = info.derived_fields().filter_map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        field.derived.as_ref().map(|expr| {
            quote! {
                let #name: #ty = {
                    #(
                        #[allow(unused_variables)]
                        let #stored_names = &#stored_names;
                    )*
                    #expr
                };
            }
        })
    });

    let fallible = info.has_contracts();
    let (output, construct) = if fallible {
        (
            quote!(::std::result::Result<Self, #rt::ContractViolation>),
            quote!(::std::result::Result::Ok(Self { #(#names),* })),
        )
    } else {
        (quote!(Self), quote!(Self { #(#names),* }))
    };
    let new_doc = if fallible {
        format!("Create a [`{target}`], checking every field contract.")
    } else {
        format!("Create a [`{target}`].")
    };

    let mut trait_methods = TokenStream::new();
    let mut bodies = TokenStream::new();
    for method in &info.methods {
        let Some(body) = method_body(info, method) else {
            continue;
        };
        let mut sig = method.sig.clone();
        rename_setter_argument(&mut sig, method);

        match interceptor::body_method(&method.interceptors, &sig.ident) {
            Some(body_ident) => {
                let args = arguments(&sig);
                let call = quote!(self.#body_ident(#(#args),*));
                let wrapped = interceptor::intercept(
                    &method.interceptors,
                    &method.name(),
                    call,
                    returns_unit(&sig.output),
                );
                let mut inner = sig.clone();
                inner.ident = body_ident;
                bodies.extend(quote! {
                    #inner {
                        #body
                    }
                });
                trait_methods.extend(quote! {
                    #sig {
                        #wrapped
                    }
                });
            }
            None => trait_methods.extend(quote! {
                #sig {
                    #body
                }
            }),
        }
    }

    quote! {
        #(#[doc = #docs])*
        #[derive(Debug, Clone)]
        #vis struct #target {
            #(
                #field_docs
                #names: #types,
            )*
        }

        impl #target {
            #[doc = #new_doc]
            #[allow(clippy::too_many_arguments)]
            #vis fn new(#(#stored_names: #stored_types),*) -> #output {
                #(#normalizations)*
                #(#preconditions)*
                #(#derivations)*
                #construct
            }

            #bodies
        }

        impl #trait_ident for #target {
            #trait_methods
        }
    }
}

/// The setter argument takes the name of the field it writes.
fn rename_setter_argument(sig: &mut syn::Signature, method: &MethodInformation) {
    let MethodKind::Setter { field, .. } = &method.kind else {
        return;
    };
    for input in &mut sig.inputs {
        if let FnArg::Typed(typed) = input {
            *typed.pat = Pat::Ident(syn::PatIdent {
                attrs: Vec::new(),
                by_ref: None,
                mutability: None,
                ident: field.clone(),
                subpat: None,
            });
        }
    }
}

/// Identifiers of the typed arguments
fn arguments(sig: &syn::Signature) -> Vec<TokenStream> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => Some(typed.pat.to_token_stream()),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

/// Body of a generated getter or setter, `None` for provided methods
fn method_body(info: &TypeInformation, method: &MethodInformation) -> Option<TokenStream> {
    match &method.kind {
        MethodKind::Provided => None,
        MethodKind::Getter { field, accessor } => {
            let field_info = info.fields.iter().find(|f| &f.name == field)?;
            let postconditions = contract::guards(
                field_info,
                &quote!(self.#field),
                ContractKind::Postcondition,
                Violation::Raise,
            );
            let access = match accessor {
                Accessor::Owned => quote!(::std::clone::Clone::clone(&self.#field)),
                Accessor::Borrowed => quote!(&self.#field),
                Accessor::Str => quote!(self.#field.as_str()),
                Accessor::Slice => quote!(self.#field.as_slice()),
                Accessor::OptionalStr => quote!(self.#field.as_deref()),
                Accessor::OptionalBorrowed => quote!(self.#field.as_ref()),
            };
            Some(quote! {
                #postconditions
                #access
            })
        }
        MethodKind::Setter { field, fallible } => {
            let field_info = info.fields.iter().find(|f| &f.name == field)?;
            let violation = if *fallible {
                Violation::Propagate
            } else {
                Violation::Raise
            };
            let normalization = field_info.normalize.as_ref().map(|expr| {
                quote! {
                    let #field = {
                        let value = #field;
                        #expr
                    };
                }
            });
            let access = quote!(#field);
            let field_guards =
                contract::guards(field_info, &access, ContractKind::Precondition, violation);
            let setter_guards = contract::guards_for(
                field_info,
                &method.contracts,
                &access,
                ContractKind::Precondition,
                violation,
            );
            let finish = fallible.then(|| quote!(::std::result::Result::Ok(())));
            Some(quote! {
                #normalization
                #field_guards
                #setter_guards
                self.#field = #field;
                #finish
            })
        }
    }
}

#[cfg(test)]
#[path = "subclass/subclass_tests.rs"]
mod subclass_tests;
