//! Validators and the guard clauses they expand into
//!
//! A `#[validate(...)]` attribute is parsed into [`ValidateArgs`], checked
//! against the shape of the field it is attached to, and turned into one
//! [`Contract`] per key. Generators then place the contracts as
//! preconditions, postconditions or invariants.

use crate::info::{FieldInformation, TypeInformation};
use crate::runtime;
use crate::shape::TypeShape;
use blueprint_core::ContractKind;
use darling::FromMeta;
use darling::util::{Flag, SpannedValue};
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, format_ident, quote};

/// What a generated guard does with a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `return Err(From::from(violation))`
    Propagate,
    /// `violation.raise()`
    Raise,
}

impl Violation {
    fn tokens(self) -> TokenStream {
        match self {
            Violation::Propagate => quote! {
                return ::std::result::Result::Err(::std::convert::From::from(violation));
            },
            Violation::Raise => quote! {
                violation.raise();
            },
        }
    }
}

/// A guard condition over the bound element `value` and its failure message.
///
/// In the message template `#` stands for the element name and `$` for the
/// debug rendering of the value; `##` and `$$` produce the literal characters.
#[derive(Debug, Clone)]
pub struct Contract {
    key: String,
    condition: TokenStream,
    template: String,
}

impl Contract {
    pub fn new(key: impl Into<String>, condition: TokenStream, template: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            condition,
            template: template.into(),
        }
    }

    /// The validator key this contract came from
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn with_template(mut self, template: Option<&str>) -> Self {
        if let Some(template) = template {
            self.template = template.to_string();
        }
        self
    }

    /// Expression building the interpolated message for `subject`
    pub fn message(&self, subject: &str) -> TokenStream {
        let mut format = String::new();
        let mut plain = String::new();
        let mut uses_value = false;
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '#' | '$' if chars.peek() == Some(&c) => {
                    chars.next();
                    format.push(c);
                    plain.push(c);
                }
                '#' => {
                    format.push_str(subject);
                    plain.push_str(subject);
                }
                '$' => {
                    format.push_str("{value:?}");
                    uses_value = true;
                }
                '{' => {
                    format.push_str("{{");
                    plain.push('{');
                }
                '}' => {
                    format.push_str("}}");
                    plain.push('}');
                }
                other => {
                    format.push(other);
                    plain.push(other);
                }
            }
        }

        if uses_value {
            quote!(::std::format!(#format, value = value))
        } else {
            quote!(::std::string::String::from(#plain))
        }
    }

    /// Guard clause checking this contract against `access`.
    ///
    /// `access` must be a place expression. Nullable elements are only
    /// checked when present.
    pub fn guard(
        &self,
        subject: &str,
        access: &TokenStream,
        nullable: bool,
        kind: ContractKind,
        violation: Violation,
    ) -> TokenStream {
        let rt = runtime();
        let condition = &self.condition;
        let message = self.message(subject);
        let constructor = format_ident!("{}", kind.to_string());
        let fail = violation.tokens();

        let check = quote! {
            if !(#condition) {
                let violation = #rt::ContractViolation::#constructor(#message);
                #fail
            }
        };

        if nullable {
            quote! {
                if let ::std::option::Option::Some(value) = &#access {
                    #check
                }
            }
        } else {
            quote! {
                {
                    let value = &#access;
                    #check
                }
            }
        }
    }
}

/// Every guard of a field, in attribute order
pub fn guards(
    field: &FieldInformation,
    access: &TokenStream,
    kind: ContractKind,
    violation: Violation,
) -> TokenStream {
    guards_for(field, &field.contracts, access, kind, violation)
}

/// Guards for an explicit list of contracts on `field`
pub fn guards_for(
    field: &FieldInformation,
    contracts: &[Contract],
    access: &TokenStream,
    kind: ContractKind,
    violation: Violation,
) -> TokenStream {
    let subject = field.display_name();
    let guards = contracts
        .iter()
        .map(|contract| contract.guard(&subject, access, field.nullable, kind, violation));
    quote!(#(#guards)*)
}

/// Where a validator may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Numerical,
    Integral,
    Countable,
    Sequence,
    OrderedSequence,
    OptionalElements,
    Text,
    Any,
}

impl Requirement {
    fn accepts(self, shape: &TypeShape) -> bool {
        match self {
            Requirement::Numerical => shape.is_numerical(),
            Requirement::Integral => shape.is_integral(),
            Requirement::Countable => shape.is_countable(),
            Requirement::Sequence => shape.is_sequence(),
            Requirement::OrderedSequence => shape.is_ordered_sequence(),
            Requirement::OptionalElements => {
                matches!(shape.element(), Some(TypeShape::Optional(_)))
            }
            Requirement::Text => shape.is_text(),
            Requirement::Any => true,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Requirement::Numerical => "numeric fields",
            Requirement::Integral => "integral fields",
            Requirement::Countable => "strings, collections and maps",
            Requirement::Sequence => "sequences",
            Requirement::OrderedSequence => "ordered sequences, not hash sets",
            Requirement::OptionalElements => "sequences of `Option`",
            Requirement::Text => "string fields",
            Requirement::Any => "any field",
        }
    }
}

/// Keys accepted by `#[validate(...)]`
#[derive(Debug, Default, FromMeta)]
pub struct ValidateArgs {
    positive: Flag,
    non_negative: Flag,
    negative: Flag,
    non_positive: Flag,

    even: Flag,
    uneven: Flag,
    multiple_of: Option<syn::Expr>,

    greater_than: Option<syn::Expr>,
    greater_than_or_equal_to: Option<syn::Expr>,
    less_than: Option<syn::Expr>,
    less_than_or_equal_to: Option<syn::Expr>,

    empty: Flag,
    non_empty: Flag,
    single: Flag,
    non_single: Flag,
    empty_or_single: Flag,
    non_empty_or_single: Flag,
    size: Option<SpannedValue<usize>>,
    min_size: Option<SpannedValue<usize>>,
    max_size: Option<SpannedValue<usize>>,

    ascending: Flag,
    descending: Flag,
    strictly_ascending: Flag,
    strictly_descending: Flag,

    unique: Flag,
    no_empty_elements: Flag,

    pattern: Option<SpannedValue<String>>,
    code_identifier: Flag,

    check: Option<syn::Expr>,
    message: Option<String>,
}

impl ValidateArgs {
    /// Parse the keys of one `#[validate(...)]` attribute.
    pub fn from_attribute(attr: &syn::Attribute) -> darling::Result<Self> {
        Self::from_meta(&attr.meta)
    }

    /// Turn the keys into contracts for a field of the given shape.
    ///
    /// Keys applied to an incompatible shape are reported, spanned at the key.
    pub fn contracts(&self, shape: &TypeShape) -> darling::Result<Vec<Contract>> {
        let rt = runtime();
        let validation = quote!(#rt::validation);
        let shape = shape.checked();
        let unit = if shape.is_text() {
            "characters"
        } else {
            "elements"
        };
        let count = quote!(#validation::Countable::count(value));
        // Empty elements take no part in ordering
        let ordered = if matches!(shape.element(), Some(TypeShape::Optional(_))) {
            quote!(#validation::is_ordered_present)
        } else {
            quote!(#validation::is_ordered)
        };

        let mut errors = darling::Error::accumulator();
        let mut candidates: Vec<(Requirement, Span, Contract)> = Vec::new();

        let flags: Vec<(&Flag, &str, Requirement, TokenStream, String)> = vec![
            (
                &self.positive,
                "positive",
                Requirement::Numerical,
                quote!(#validation::is_positive(value)),
                "The # has to be positive but was $.".into(),
            ),
            (
                &self.non_negative,
                "non_negative",
                Requirement::Numerical,
                quote!(#validation::is_non_negative(value)),
                "The # may not be negative but was $.".into(),
            ),
            (
                &self.negative,
                "negative",
                Requirement::Numerical,
                quote!(#validation::is_negative(value)),
                "The # has to be negative but was $.".into(),
            ),
            (
                &self.non_positive,
                "non_positive",
                Requirement::Numerical,
                quote!(#validation::is_non_positive(value)),
                "The # may not be positive but was $.".into(),
            ),
            (
                &self.even,
                "even",
                Requirement::Integral,
                quote!(#validation::is_even(value)),
                "The # has to be even but was $.".into(),
            ),
            (
                &self.uneven,
                "uneven",
                Requirement::Integral,
                quote!(#validation::is_uneven(value)),
                "The # has to be uneven but was $.".into(),
            ),
            (
                &self.empty,
                "empty",
                Requirement::Countable,
                quote!(#count == 0),
                "The # has to be empty but was $.".into(),
            ),
            (
                &self.non_empty,
                "non_empty",
                Requirement::Countable,
                quote!(#count != 0),
                "The # may not be empty.".into(),
            ),
            (
                &self.single,
                "single",
                Requirement::Countable,
                quote!(#count == 1),
                format!("The # has to contain exactly one of its {unit} but was $."),
            ),
            (
                &self.non_single,
                "non_single",
                Requirement::Countable,
                quote!(#count != 1),
                format!("The # may not contain exactly one of its {unit} but was $."),
            ),
            (
                &self.empty_or_single,
                "empty_or_single",
                Requirement::Countable,
                quote!(#count <= 1),
                format!("The # has to contain at most one of its {unit} but was $."),
            ),
            (
                &self.non_empty_or_single,
                "non_empty_or_single",
                Requirement::Countable,
                quote!(#count > 1),
                format!("The # has to contain more than one of its {unit} but was $."),
            ),
            (
                &self.ascending,
                "ascending",
                Requirement::OrderedSequence,
                quote!(#ordered(value.iter(), false, true)),
                "The # has to be in ascending order but was $.".into(),
            ),
            (
                &self.descending,
                "descending",
                Requirement::OrderedSequence,
                quote!(#ordered(value.iter(), false, false)),
                "The # has to be in descending order but was $.".into(),
            ),
            (
                &self.strictly_ascending,
                "strictly_ascending",
                Requirement::OrderedSequence,
                quote!(#ordered(value.iter(), true, true)),
                "The # has to be in strictly ascending order but was $.".into(),
            ),
            (
                &self.strictly_descending,
                "strictly_descending",
                Requirement::OrderedSequence,
                quote!(#ordered(value.iter(), true, false)),
                "The # has to be in strictly descending order but was $.".into(),
            ),
            (
                &self.unique,
                "unique",
                Requirement::Sequence,
                quote!(#validation::has_unique_elements(value.iter())),
                "The # has to contain unique elements but was $.".into(),
            ),
            (
                &self.no_empty_elements,
                "no_empty_elements",
                Requirement::OptionalElements,
                quote!(#validation::has_no_empty_elements(value.iter())),
                "The # may not contain empty elements but was $.".into(),
            ),
            (
                &self.code_identifier,
                "code_identifier",
                Requirement::Text,
                quote!(#validation::is_code_identifier(value)),
                "The # has to be a code identifier but was $.".into(),
            ),
        ];
        for (flag, key, requirement, condition, template) in flags {
            if flag.is_present() {
                candidates.push((requirement, flag.span(), Contract::new(key, condition, template)));
            }
        }

        if let Some(divisor) = &self.multiple_of {
            candidates.push((
                Requirement::Integral,
                spanned(divisor),
                Contract::new(
                    "multiple_of",
                    quote!(#validation::is_multiple_of(value, #divisor)),
                    format!("The # has to be a multiple of {} but was $.", literal(divisor)),
                ),
            ));
        }

        let relative = [
            (&self.greater_than, "greater_than", quote!(>), "greater than"),
            (
                &self.greater_than_or_equal_to,
                "greater_than_or_equal_to",
                quote!(>=),
                "greater than or equal to",
            ),
            (&self.less_than, "less_than", quote!(<), "less than"),
            (
                &self.less_than_or_equal_to,
                "less_than_or_equal_to",
                quote!(<=),
                "less than or equal to",
            ),
        ];
        for (bound, key, operator, phrase) in relative {
            if let Some(bound) = bound {
                candidates.push((
                    Requirement::Numerical,
                    spanned(bound),
                    Contract::new(
                        key,
                        quote!(value #operator &(#bound)),
                        format!("The # has to be {phrase} {} but was $.", literal(bound)),
                    ),
                ));
            }
        }

        let sizes = [
            (&self.size, "size", quote!(==), "exactly"),
            (&self.min_size, "min_size", quote!(>=), "at least"),
            (&self.max_size, "max_size", quote!(<=), "at most"),
        ];
        for (size, key, operator, phrase) in sizes {
            if let Some(size) = size {
                let amount = **size;
                candidates.push((
                    Requirement::Countable,
                    size.span(),
                    Contract::new(
                        key,
                        quote!(#count #operator #amount),
                        format!("The # has to contain {phrase} {amount} {unit} but was $."),
                    ),
                ));
            }
        }

        if let Some(pattern) = &self.pattern {
            match regex::Regex::new(&format!("^(?:{})$", pattern.as_str())) {
                Ok(_) => {
                    let source = pattern.as_str();
                    candidates.push((
                        Requirement::Text,
                        pattern.span(),
                        Contract::new(
                            "pattern",
                            quote! {{
                                static PATTERN: #validation::Pattern = #validation::Pattern::new(#source);
                                PATTERN.is_match(value)
                            }},
                            format!("The # has to match `{}` but was $.", escape(source)),
                        ),
                    ));
                }
                Err(err) => errors.push(error_at(
                    pattern.span(),
                    format!("invalid regular expression: {err}"),
                )),
            }
        }

        if let Some(check) = &self.check {
            candidates.push((
                Requirement::Any,
                spanned(check),
                Contract::new(
                    "check",
                    quote!(#check),
                    format!("The # has to satisfy `{}` but was $.", literal(check)),
                ),
            ));
        }

        let mut contracts = Vec::with_capacity(candidates.len());
        for (requirement, span, contract) in candidates {
            if requirement.accepts(shape) {
                contracts.push(contract.with_template(self.message.as_deref()));
            } else {
                errors.push(error_at(
                    span,
                    format!(
                        "`{}` can only be applied to {}",
                        contract.key(),
                        requirement.describe()
                    ),
                ));
            }
        }

        errors.finish_with(contracts)
    }
}

fn spanned(node: &impl syn::spanned::Spanned) -> Span {
    node.span()
}

pub(crate) fn error_at(span: Span, message: impl std::fmt::Display) -> darling::Error {
    darling::Error::from(syn::Error::new(span, message))
}

/// Template-safe text of an expression
fn literal(expr: &impl ToTokens) -> String {
    escape(&expr.to_token_stream().to_string())
}

fn escape(text: &str) -> String {
    text.replace('#', "##").replace('$', "$$")
}

/// `impl Validated` checking every field contract as an invariant
pub fn expand_validated(info: &TypeInformation) -> TokenStream {
    let rt = runtime();
    let target = &info.target;
    let (impl_generics, ty_generics, where_clause) = info.generics.split_for_impl();

    let checks = info.fields.iter().map(|field| {
        let name = &field.name;
        guards(
            field,
            &quote!(self.#name),
            ContractKind::Invariant,
            Violation::Propagate,
        )
    });

    quote! {
        impl #impl_generics #rt::Validated for #target #ty_generics #where_clause {
            fn validate(&self) -> #rt::ContractResult<()> {
                #(#checks)*
                ::std::result::Result::Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "contract/contract_tests.rs"]
mod contract_tests;
