//! Equality, hashing, display and ordering over the representing fields

use crate::info::{FieldInformation, TypeInformation};
use crate::runtime;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident, parse_quote};

/// Copy of the type's generics requiring `bound` of every representing field type.
///
/// Non-generic types get no extra predicates.
fn bounded(info: &TypeInformation, fields: &[&FieldInformation], bound: TokenStream) -> Generics {
    let mut generics = info.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = &field.ty;
            where_clause.predicates.push(parse_quote!(#ty: #bound));
        }
    }
    generics
}

/// Generate the representing impls for the analyzed type.
///
/// `PartialEq`, `Display` and, when ordered, `PartialOrd` are always
/// generated. Unless the type is `partial`, so are `Eq`, `Hash`,
/// `hash_code()` and `Ord`.
pub fn generate(info: &TypeInformation) -> TokenStream {
    let fields: Vec<&FieldInformation> = info.representing_fields().collect();
    let names: Vec<&Ident> = fields.iter().map(|f| &f.name).collect();

    let mut tokens = TokenStream::new();
    tokens.extend(equality(info, &fields, &names));
    tokens.extend(display(info, &fields, &names));
    if !info.partial {
        tokens.extend(hashing(info, &fields, &names));
    }
    if info.ordered {
        tokens.extend(ordering(info, &fields, &names));
    }

    tracing::debug!(
        target_type = %info.target,
        fields = names.len(),
        ordered = info.ordered,
        partial = info.partial,
        "generated representing impls"
    );

    tokens
}

fn equality(info: &TypeInformation, fields: &[&FieldInformation], names: &[&Ident]) -> TokenStream {
    let target = &info.target;
    let generics = bounded(info, fields, quote!(::std::cmp::PartialEq));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let eq = if info.partial {
        TokenStream::new()
    } else {
        let generics = bounded(info, fields, quote!(::std::cmp::Eq));
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        quote! {
            #[automatically_derived]
            impl #impl_generics ::std::cmp::Eq for #target #ty_generics #where_clause {}
        }
    };

    // NaN is unequal to itself, so partial types compare even on identity
    let identity = (!info.partial).then(|| {
        quote! {
            if ::std::ptr::eq(self, other) {
                return true;
            }
        }
    });
    let unused = names.is_empty().then(|| quote!(let _ = other;));

    quote! {
        #[automatically_derived]
        impl #impl_generics ::std::cmp::PartialEq for #target #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool {
                #identity
                #unused
                #(
                    if self.#names != other.#names {
                        return false;
                    }
                )*
                true
            }
        }

        #eq
    }
}

fn display(info: &TypeInformation, fields: &[&FieldInformation], names: &[&Ident]) -> TokenStream {
    let target = &info.target;
    let generics = bounded(info, fields, quote!(::std::fmt::Debug));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let rendered: Vec<String> = fields
        .iter()
        .map(|f| format!("{}: {{:?}}", f.display_name()))
        .collect();
    let format = format!("{}({})", target, rendered.join(", "));

    quote! {
        #[automatically_derived]
        impl #impl_generics ::std::fmt::Display for #target #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, #format #(, self.#names)*)
            }
        }
    }
}

fn hashing(info: &TypeInformation, fields: &[&FieldInformation], names: &[&Ident]) -> TokenStream {
    let rt = runtime();
    let target = &info.target;
    let generics = bounded(info, fields, quote!(::std::hash::Hash));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let unused = names.is_empty().then(|| quote!(let _ = state;));

    quote! {
        #[automatically_derived]
        impl #impl_generics ::std::hash::Hash for #target #ty_generics #where_clause {
            fn hash<__H: ::std::hash::Hasher>(&self, state: &mut __H) {
                #unused
                #(::std::hash::Hash::hash(&self.#names, state);)*
            }
        }

        impl #impl_generics #target #ty_generics #where_clause {
            /// Hash combining every representing field, stable within one build.
            pub fn hash_code(&self) -> u64 {
                #rt::RepresentingHash::new()
                    #(.field(&self.#names))*
                    .finish()
            }
        }
    }
}

fn ordering(info: &TypeInformation, fields: &[&FieldInformation], names: &[&Ident]) -> TokenStream {
    let target = &info.target;
    let unused = names.is_empty().then(|| quote!(let _ = other;));

    if info.partial {
        let generics = bounded(info, fields, quote!(::std::cmp::PartialOrd));
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        return quote! {
            #[automatically_derived]
            impl #impl_generics ::std::cmp::PartialOrd for #target #ty_generics #where_clause {
                fn partial_cmp(&self, other: &Self) -> ::std::option::Option<::std::cmp::Ordering> {
                    #unused
                    #(
                        match ::std::cmp::PartialOrd::partial_cmp(&self.#names, &other.#names) {
                            ::std::option::Option::Some(::std::cmp::Ordering::Equal) => {}
                            ordering => return ordering,
                        }
                    )*
                    ::std::option::Option::Some(::std::cmp::Ordering::Equal)
                }
            }
        };
    }

    let generics = bounded(info, fields, quote!(::std::cmp::Ord));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        #[automatically_derived]
        impl #impl_generics ::std::cmp::PartialOrd for #target #ty_generics #where_clause {
            fn partial_cmp(&self, other: &Self) -> ::std::option::Option<::std::cmp::Ordering> {
                ::std::option::Option::Some(::std::cmp::Ord::cmp(self, other))
            }
        }

        #[automatically_derived]
        impl #impl_generics ::std::cmp::Ord for #target #ty_generics #where_clause {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                #unused
                #(
                    match ::std::cmp::Ord::cmp(&self.#names, &other.#names) {
                        ::std::cmp::Ordering::Equal => {}
                        ordering => return ordering,
                    }
                )*
                ::std::cmp::Ordering::Equal
            }
        }
    }
}
