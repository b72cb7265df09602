//! Method interceptors
//!
//! An interceptor wraps the call of a generated or provided method. For
//! generated methods the body moves into an inherent `<prefix>_<name>`
//! method and the trait method becomes the wrapped call to it.

use crate::contract::error_at;
use crate::runtime;
use blueprint_core::Level;
use darling::FromMeta;
use darling::util::SpannedValue;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde::Serialize;
use syn::{Attribute, Meta};

/// Scaffolding placed around a method call
pub trait MethodInterceptor {
    /// Prefix of the inherent method holding the original body
    fn prefix(&self) -> &'static str;

    /// Wrap `call`, an expression invoking the original body of `method`.
    fn wrap(&self, method: &str, call: TokenStream, returns_unit: bool) -> TokenStream;
}

/// Entry and exit logging through `LoggedCall`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Logged {
    pub level: Level,
}

#[derive(Debug, Default, FromMeta)]
struct LoggedArgs {
    level: Option<SpannedValue<String>>,
}

impl Logged {
    pub const PREFIX: &'static str = "logged";

    /// Parse `#[logged]` or `#[logged(level = "...")]`.
    pub fn from_attribute(attr: &Attribute) -> darling::Result<Self> {
        let args = match &attr.meta {
            Meta::Path(_) => LoggedArgs::default(),
            meta => LoggedArgs::from_meta(meta)?,
        };
        let level = match args.level {
            Some(name) => name
                .parse::<Level>()
                .map_err(|message| error_at(name.span(), message))?,
            None => Level::default(),
        };
        Ok(Self { level })
    }
}

impl MethodInterceptor for Logged {
    fn prefix(&self) -> &'static str {
        Self::PREFIX
    }

    fn wrap(&self, method: &str, call: TokenStream, returns_unit: bool) -> TokenStream {
        let rt = runtime();
        let level = format_ident!("{}", self.level.to_string());
        if returns_unit {
            quote!(#rt::LoggedCall::run_unit(#rt::Level::#level, #method, || #call))
        } else {
            quote!(#rt::LoggedCall::run(#rt::Level::#level, #method, || #call))
        }
    }
}

/// Interceptors known to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "interceptor", rename_all = "snake_case")]
pub enum Interceptor {
    Logged(Logged),
}

impl MethodInterceptor for Interceptor {
    fn prefix(&self) -> &'static str {
        match self {
            Interceptor::Logged(logged) => logged.prefix(),
        }
    }

    fn wrap(&self, method: &str, call: TokenStream, returns_unit: bool) -> TokenStream {
        match self {
            Interceptor::Logged(logged) => logged.wrap(method, call, returns_unit),
        }
    }
}

impl Interceptor {
    /// Whether the attribute names an interceptor
    pub fn is_interceptor(attr: &Attribute) -> bool {
        attr.path().is_ident(Logged::PREFIX)
    }

    /// Collect the interceptors attached to a method, outermost first.
    pub fn collect(attrs: &[Attribute]) -> darling::Result<Vec<Interceptor>> {
        let mut errors = darling::Error::accumulator();
        let interceptors = attrs
            .iter()
            .filter(|attr| Self::is_interceptor(attr))
            .filter_map(|attr| errors.handle(Logged::from_attribute(attr).map(Interceptor::Logged)))
            .collect();
        errors.finish_with(interceptors)
    }
}

/// Name of the inherent method that holds the original body
pub fn body_method(interceptors: &[Interceptor], method: &syn::Ident) -> Option<syn::Ident> {
    interceptors
        .first()
        .map(|interceptor| format_ident!("{}_{}", interceptor.prefix(), method))
}

/// Apply every interceptor to `call`, the first one outermost.
pub fn intercept(
    interceptors: &[Interceptor],
    method: &str,
    call: TokenStream,
    returns_unit: bool,
) -> TokenStream {
    interceptors
        .iter()
        .rev()
        .fold(call, |call, interceptor| interceptor.wrap(method, call, returns_unit))
}

/// Whether a signature returns `()`
pub fn returns_unit(output: &syn::ReturnType) -> bool {
    match output {
        syn::ReturnType::Default => true,
        syn::ReturnType::Type(_, ty) => matches!(&**ty, syn::Type::Tuple(tuple) if tuple.elems.is_empty()),
    }
}
