//! Type information extracted from annotated items.
//!
//! Two kinds of input are analyzed into a [`TypeInformation`]:
//!
//! - structs with named fields, for the derive macros;
//! - accessor traits, for `#[generate]`, whose abstract methods are
//!   classified as getters and setters of the fields a subclass stores.
//!
//! Analysis never stops at the first problem. Every diagnostic is accumulated
//! and reported together, spanned at the offending source.

use crate::GeneratorOptions;
use crate::attrs::{
    BuilderFieldArgs, BuilderTypeArgs, ConvertFieldArgs, GenerateArgs, RepresentingFieldArgs,
    RepresentingTypeArgs,
};
use crate::contract::{Contract, ValidateArgs};
use crate::interceptor::Interceptor;
use crate::naming;
use crate::shape::{self, Accessor, TypeShape};
use darling::util::Override;
use darling::{Error, FromMeta};
use quote::{ToTokens, format_ident};
use serde::Serialize;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, FnArg, Generics, Ident, ItemTrait, Meta, Pat,
    ReturnType, Signature, TraitItem, TraitItemFn, Type, Visibility,
};

/// Attributes consumed by the generators on accessor trait methods
pub const TRAIT_HELPER_ATTRIBUTES: &[&str] = &[
    "validate",
    "default",
    "derived",
    "normalize",
    "representing",
    "logged",
];

/// A field of the analyzed type
#[derive(Debug, Clone)]
pub struct FieldInformation {
    pub name: Ident,
    /// The owned type stored in the field
    pub ty: Type,
    pub shape: TypeShape,
    /// Whether a setter writes the field
    pub mutable: bool,
    /// `Option<T>` fields default to `None`
    pub nullable: bool,
    pub default: Option<Expr>,
    /// Computed from the other fields at construction
    pub derived: Option<Expr>,
    /// Rewrites an incoming `value` before it is validated
    pub normalize: Option<Expr>,
    pub representing: bool,
    /// Cleared by `#[convert(skip)]`
    pub converted: bool,
    pub contracts: Vec<Contract>,
    pub docs: Vec<String>,
}

impl FieldInformation {
    fn new(name: Ident, ty: Type) -> Self {
        let shape = TypeShape::of(&ty);
        let nullable = matches!(shape, TypeShape::Optional(_));
        Self {
            name,
            ty,
            shape,
            mutable: false,
            nullable,
            default: None,
            derived: None,
            normalize: None,
            representing: true,
            converted: true,
            contracts: Vec::new(),
            docs: Vec::new(),
        }
    }

    fn from_struct_field(field: &syn::Field) -> darling::Result<Self> {
        let name = field
            .ident
            .clone()
            .ok_or_else(|| Error::custom("expected a named field").with_span(field))?;
        let mut info = Self::new(name, field.ty.clone());
        info.mutable = true;
        info.docs = extract_docs(&field.attrs);

        let mut errors = Error::accumulator();
        for attr in &field.attrs {
            let path = attr.path();
            if path.is_ident("builder") {
                if let Some(args) = errors.handle(BuilderFieldArgs::from_meta(&attr.meta)) {
                    info.default = args.default.map(|default| match default {
                        Override::Inherit => syn::parse_quote!(::std::default::Default::default()),
                        Override::Explicit(expr) => expr,
                    });
                }
            } else if path.is_ident("representing") {
                if let Some(args) = errors.handle(RepresentingFieldArgs::from_meta(&attr.meta)) {
                    info.representing &= !args.skip.is_present();
                }
            } else if path.is_ident("convert") {
                if let Some(args) = errors.handle(ConvertFieldArgs::from_meta(&attr.meta)) {
                    info.converted &= !args.skip.is_present();
                }
            } else if path.is_ident("validate") {
                let contracts = ValidateArgs::from_attribute(attr)
                    .and_then(|args| args.contracts(&info.shape))
                    .map_err(|e| e.at(info.display_name()));
                if let Some(contracts) = errors.handle(contracts) {
                    info.contracts.extend(contracts);
                }
            }
        }

        errors.finish_with(info)
    }

    /// A mandatory field has no default, is not nullable and is not derived.
    pub fn is_mandatory(&self) -> bool {
        self.default.is_none() && !self.nullable && self.derived.is_none()
    }

    pub fn is_derived(&self) -> bool {
        self.derived.is_some()
    }

    /// Expression producing the value of an unset field
    pub fn default_value(&self) -> proc_macro2::TokenStream {
        match &self.default {
            Some(expr) => expr.to_token_stream(),
            None if self.nullable => quote::quote!(::std::option::Option::None),
            None => quote::quote!(::std::default::Default::default()),
        }
    }

    /// Field name without any raw identifier prefix
    pub fn display_name(&self) -> String {
        self.name.unraw().to_string()
    }
}

/// How an accessor trait method is implemented
#[derive(Debug, Clone)]
pub enum MethodKind {
    Getter { field: Ident, accessor: Accessor },
    Setter { field: Ident, fallible: bool },
    /// Has a default body and is kept as is
    Provided,
}

/// A method of an accessor trait
#[derive(Debug, Clone)]
pub struct MethodInformation {
    pub sig: Signature,
    pub kind: MethodKind,
    pub interceptors: Vec<Interceptor>,
    /// Preconditions attached to a setter itself
    pub contracts: Vec<Contract>,
}

impl MethodInformation {
    pub fn name(&self) -> String {
        self.sig.ident.unraw().to_string()
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            MethodKind::Getter { .. } => "getter",
            MethodKind::Setter { .. } => "setter",
            MethodKind::Provided => "provided",
        }
    }
}

/// The single designated way to instantiate the target type
#[derive(Debug, Clone)]
pub enum ConstructorInformation {
    /// `Target { field, ... }`
    Literal,
    /// A function taking every field in declaration order
    Function(syn::Path),
    /// The generated `Target::new`, which checks its own contracts
    Subclass,
}

impl ConstructorInformation {
    fn describe(&self, target: &Ident) -> String {
        match self {
            ConstructorInformation::Literal => format!("{target} {{ .. }}"),
            ConstructorInformation::Function(path) => {
                format!("{}(..)", path.to_token_stream().to_string().replace(' ', ""))
            }
            ConstructorInformation::Subclass => format!("{target}::new(..)"),
        }
    }
}

/// Where the analyzed type came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Struct,
    /// An accessor trait; the target is its generated subclass
    Trait(Ident),
}

/// Everything the generators need to know about one type
#[derive(Debug, Clone)]
pub struct TypeInformation {
    pub origin: Origin,
    /// The type generated code constructs
    pub target: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub docs: Vec<String>,
    pub fields: Vec<FieldInformation>,
    pub methods: Vec<MethodInformation>,
    pub constructor: ConstructorInformation,
    pub ordered: bool,
    pub partial: bool,
    pub builder_suffix: String,
}

impl TypeInformation {
    /// Analyze a struct with named fields.
    pub fn from_derive_input(
        input: &DeriveInput,
        options: &GeneratorOptions,
    ) -> darling::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => &named.named,
                _ => {
                    return Err(Error::custom(
                        "expected a struct with named fields: tuple and unit structs have no usable constructor",
                    )
                    .with_span(&input.ident));
                }
            },
            _ => {
                return Err(Error::custom(
                    "expected a struct with named fields: enums and unions have no single constructor",
                )
                .with_span(&input.ident));
            }
        };

        let mut errors = Error::accumulator();
        let mut constructor = ConstructorInformation::Literal;
        let mut ordered = false;
        let mut partial = false;

        for attr in &input.attrs {
            if attr.path().is_ident("builder") {
                let Some(args) = errors.handle(BuilderTypeArgs::from_meta(&attr.meta)) else {
                    continue;
                };
                if let Some(path) = args.constructor {
                    if matches!(constructor, ConstructorInformation::Function(_)) {
                        errors.push(
                            Error::custom("multiple constructors designated, keep exactly one")
                                .with_span(attr),
                        );
                    } else {
                        constructor = ConstructorInformation::Function(path);
                    }
                }
            } else if attr.path().is_ident("representing") {
                if let Some(args) = errors.handle(RepresentingTypeArgs::from_meta(&attr.meta)) {
                    ordered |= args.ordered.is_present();
                    partial |= args.partial.is_present();
                }
            }
        }

        let fields: Vec<FieldInformation> = named
            .iter()
            .filter_map(|field| errors.handle(FieldInformation::from_struct_field(field)))
            .collect();

        tracing::debug!(
            target_type = %input.ident,
            fields = fields.len(),
            "analyzed struct"
        );

        errors.finish_with(Self {
            origin: Origin::Struct,
            target: input.ident.clone(),
            vis: input.vis.clone(),
            generics: input.generics.clone(),
            docs: extract_docs(&input.attrs),
            fields,
            methods: Vec::new(),
            constructor,
            ordered,
            partial,
            builder_suffix: options.builder_suffix.clone(),
        })
    }

    /// Analyze an accessor trait.
    pub fn from_item_trait(
        item: &ItemTrait,
        args: &GenerateArgs,
        options: &GeneratorOptions,
    ) -> darling::Result<Self> {
        let mut errors = Error::accumulator();

        if !item.generics.params.is_empty() {
            errors.push(
                Error::custom("generic accessor traits are not supported").with_span(&item.generics),
            );
        }

        let mut fields: Vec<FieldInformation> = Vec::new();
        let mut methods = Vec::new();
        let mut setters = Vec::new();

        for trait_item in &item.items {
            match trait_item {
                TraitItem::Fn(method) => match errors.handle(classify(method)) {
                    Some(Classified::Getter(field, info)) => {
                        if fields.iter().any(|f| f.name == field.name) {
                            errors.push(
                                Error::custom(format!(
                                    "more than one getter reads `{}`",
                                    field.display_name()
                                ))
                                .with_span(&method.sig.ident),
                            );
                        } else {
                            fields.push(field);
                        }
                        methods.push(info);
                    }
                    Some(Classified::Setter(info, ty)) => {
                        setters.push((methods.len(), ty));
                        methods.push(info);
                    }
                    Some(Classified::Provided(info)) => methods.push(info),
                    None => {}
                },
                TraitItem::Type(ty) if ty.default.is_none() => errors.push(
                    Error::custom("abstract associated types cannot be generated")
                        .with_span(&ty.ident),
                ),
                TraitItem::Const(constant) if constant.default.is_none() => errors.push(
                    Error::custom("abstract associated constants cannot be generated")
                        .with_span(&constant.ident),
                ),
                _ => {}
            }
        }

        for (index, param_ty) in setters {
            let method = &methods[index];
            let MethodKind::Setter { field: name, .. } = &method.kind else {
                continue;
            };
            let setter = &method.sig.ident;
            match fields.iter_mut().find(|f| &f.name == name) {
                None => errors.push(
                    Error::custom(format!("setter `{setter}` has no matching getter `{name}`"))
                        .with_span(setter),
                ),
                Some(field) if field.is_derived() => errors.push(
                    Error::custom(format!("`{name}` is derived and cannot have a setter"))
                        .with_span(setter),
                ),
                Some(field) if !shape::same_type(&param_ty, &field.ty) => errors.push(
                    Error::custom(format!(
                        "setter `{setter}` takes `{}` but `{name}` stores `{}`",
                        shape::type_name(&param_ty),
                        shape::type_name(&field.ty)
                    ))
                    .with_span(&param_ty),
                ),
                Some(field) => field.mutable = true,
            }
        }

        let target = args
            .name
            .clone()
            .unwrap_or_else(|| format_ident!("{}{}", item.ident, options.subclass_suffix));

        tracing::debug!(
            source_trait = %item.ident,
            target_type = %target,
            fields = fields.len(),
            methods = methods.len(),
            "analyzed accessor trait"
        );

        errors.finish_with(Self {
            origin: Origin::Trait(item.ident.clone()),
            target,
            vis: item.vis.clone(),
            generics: Generics::default(),
            docs: extract_docs(&item.attrs),
            fields,
            methods,
            constructor: ConstructorInformation::Subclass,
            ordered: args.ordered.is_present(),
            partial: args.partial.is_present(),
            builder_suffix: options.builder_suffix.clone(),
        })
    }

    /// Fields supplied from outside, in declaration order
    pub fn stored_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.fields.iter().filter(|f| !f.is_derived())
    }

    pub fn mandatory_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.fields.iter().filter(|f| f.is_mandatory())
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.stored_fields().filter(|f| !f.is_mandatory())
    }

    pub fn derived_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.fields.iter().filter(|f| f.is_derived())
    }

    pub fn representing_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.stored_fields().filter(|f| f.representing)
    }

    pub fn converted_fields(&self) -> impl Iterator<Item = &FieldInformation> {
        self.representing_fields().filter(|f| f.converted)
    }

    /// Whether constructing the type can fail a contract
    pub fn has_contracts(&self) -> bool {
        self.stored_fields().any(|f| !f.contracts.is_empty())
    }

    pub fn builder_name(&self) -> Ident {
        format_ident!("{}{}", self.target, self.builder_suffix)
    }

    pub fn inner_builder_name(&self) -> Ident {
        format_ident!("Inner{}{}", self.target, self.builder_suffix)
    }

    /// Name of the builder stage that asks for `field`.
    ///
    /// Starts with the builder name and ends in `Stage`, so it cannot meet
    /// the inner builder or the hidden `{builder}Stage{i}` structs.
    pub fn stage_trait_name(&self, field: &FieldInformation) -> Ident {
        format_ident!(
            "{}{}{}Stage",
            self.target,
            self.builder_suffix,
            naming::to_pascal_case(&field.display_name())
        )
    }

    /// Serializable description of the analysis result
    pub fn summary(&self) -> TypeSummary {
        TypeSummary {
            name: self.target.to_string(),
            origin: match &self.origin {
                Origin::Struct => "struct".to_string(),
                Origin::Trait(name) => format!("trait {name}"),
            },
            constructor: self.constructor.describe(&self.target),
            builder: self.builder_name().to_string(),
            ordered: self.ordered,
            partial: self.partial,
            docs: self.docs.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldSummary {
                    name: f.display_name(),
                    ty: shape::type_name(&f.ty),
                    shape: f.shape.clone(),
                    mandatory: f.is_mandatory(),
                    nullable: f.nullable,
                    mutable: f.mutable,
                    representing: f.representing,
                    converted: f.converted && f.representing,
                    default: f.default.as_ref().map(expression),
                    derived: f.derived.as_ref().map(expression),
                    validators: f.contracts.iter().map(|c| c.key().to_string()).collect(),
                    docs: f.docs.clone(),
                })
                .collect(),
            methods: self
                .methods
                .iter()
                .map(|m| MethodSummary {
                    name: m.name(),
                    kind: m.kind_name(),
                    field: match &m.kind {
                        MethodKind::Getter { field, .. } | MethodKind::Setter { field, .. } => {
                            Some(field.unraw().to_string())
                        }
                        MethodKind::Provided => None,
                    },
                    interceptors: m.interceptors.clone(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly view of a [`TypeInformation`]
#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub origin: String,
    pub constructor: String,
    pub builder: String,
    pub ordered: bool,
    pub partial: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    pub fields: Vec<FieldSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub shape: TypeShape,
    pub mandatory: bool,
    pub nullable: bool,
    pub mutable: bool,
    pub representing: bool,
    pub converted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodSummary {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interceptors: Vec<Interceptor>,
}

fn expression(expr: &Expr) -> String {
    expr.to_token_stream().to_string()
}

enum Classified {
    Getter(FieldInformation, MethodInformation),
    /// The setter and its parameter type
    Setter(MethodInformation, Type),
    Provided(MethodInformation),
}

fn unmappable(sig: &Signature) -> Error {
    Error::custom(format!(
        "cannot generate `{}`: abstract methods must be getters (`&self`, no arguments, a return value) \
         or setters (`&mut self`, named `set_<field>`, one argument)",
        sig.ident
    ))
    .with_span(&sig.ident)
}

fn classify(method: &TraitItemFn) -> darling::Result<Classified> {
    let sig = &method.sig;
    let mut errors = Error::accumulator();
    let interceptors = errors.handle(Interceptor::collect(&method.attrs)).unwrap_or_default();

    if method.default.is_some() {
        for attr in &method.attrs {
            if is_helper(attr) && !Interceptor::is_interceptor(attr) {
                errors.push(
                    Error::custom("only interceptors apply to provided methods").with_span(attr),
                );
            }
        }
        return errors.finish_with(Classified::Provided(MethodInformation {
            sig: sig.clone(),
            kind: MethodKind::Provided,
            interceptors,
            contracts: Vec::new(),
        }));
    }

    if sig.asyncness.is_some()
        || sig.constness.is_some()
        || sig.variadic.is_some()
        || !sig.generics.params.is_empty()
    {
        errors.push(
            Error::custom(format!(
                "cannot generate `{}`: const, async, variadic and generic methods are not supported",
                sig.ident
            ))
            .with_span(&sig.ident),
        );
        return fail(errors, sig);
    }

    let receiver = sig.receiver().filter(|r| r.colon_token.is_none());
    let arguments: Vec<&syn::PatType> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => Some(typed),
            FnArg::Receiver(_) => None,
        })
        .collect();

    let by_ref = receiver.is_some_and(|r| r.reference.is_some() && r.mutability.is_none());
    let by_mut = receiver.is_some_and(|r| r.reference.is_some() && r.mutability.is_some());

    match (&sig.output, by_ref, by_mut, arguments.as_slice()) {
        (ReturnType::Type(_, ret), true, _, []) if !crate::interceptor::returns_unit(&sig.output) => {
            let classified = errors.handle(getter(method, ret, interceptors));
            errors.finish()?;
            classified.ok_or_else(|| unmappable(sig))
        }
        (output, _, true, [argument]) => {
            let name = sig.ident.unraw().to_string();
            let Some(field) = naming::field_of_setter(&name) else {
                return fail(errors, sig);
            };
            let fallible = match output {
                ReturnType::Type(_, ty) if shape::is_result(ty) => true,
                output if crate::interceptor::returns_unit(output) => false,
                _ => {
                    errors.push(
                        Error::custom(format!(
                            "setter `{}` has to return `()` or a `Result`",
                            sig.ident
                        ))
                        .with_span(&sig.output),
                    );
                    false
                }
            };
            if !matches!(&*argument.pat, Pat::Ident(_) | Pat::Wild(_)) {
                errors.push(
                    Error::custom("setter arguments have to be plain identifiers")
                        .with_span(&argument.pat),
                );
            }

            let param_ty = (*argument.ty).clone();
            let shape = TypeShape::of(&param_ty);
            let mut contracts = Vec::new();
            for attr in &method.attrs {
                if attr.path().is_ident("validate") {
                    if let Some(found) = errors
                        .handle(ValidateArgs::from_attribute(attr).and_then(|a| a.contracts(&shape)))
                    {
                        contracts.extend(found);
                    }
                } else if is_helper(attr) && !Interceptor::is_interceptor(attr) {
                    errors.push(
                        Error::custom("setters only accept `validate` and interceptors")
                            .with_span(attr),
                    );
                }
            }

            errors.finish_with(Classified::Setter(
                MethodInformation {
                    sig: sig.clone(),
                    kind: MethodKind::Setter {
                        field: format_ident!("{}", field),
                        fallible,
                    },
                    interceptors,
                    contracts,
                },
                param_ty,
            ))
        }
        _ => fail(errors, sig),
    }
}

/// Report the accumulated errors, or that the method cannot be mapped.
fn fail(errors: darling::error::Accumulator, sig: &Signature) -> darling::Result<Classified> {
    errors.finish()?;
    Err(unmappable(sig))
}

fn getter(
    method: &TraitItemFn,
    ret: &Type,
    interceptors: Vec<Interceptor>,
) -> darling::Result<Classified> {
    let sig = &method.sig;
    let (ty, accessor) = shape::stored_type(ret);
    let name = sig.ident.unraw().to_string();
    let mut field = FieldInformation::new(format_ident!("{}", naming::field_of_getter(&name)), ty);
    field.docs = extract_docs(&method.attrs);

    let mut errors = Error::accumulator();
    for attr in &method.attrs {
        let path = attr.path();
        if path.is_ident("default") {
            field.default = errors.handle(attr.parse_args::<Expr>().map_err(Error::from));
        } else if path.is_ident("derived") {
            field.derived = errors.handle(attr.parse_args::<Expr>().map_err(Error::from));
        } else if path.is_ident("normalize") {
            field.normalize = errors.handle(attr.parse_args::<Expr>().map_err(Error::from));
        } else if path.is_ident("representing") {
            if let Some(args) = errors.handle(RepresentingFieldArgs::from_meta(&attr.meta)) {
                field.representing &= !args.skip.is_present();
            }
        } else if path.is_ident("validate") {
            let contracts = ValidateArgs::from_attribute(attr).and_then(|a| a.contracts(&field.shape));
            if let Some(contracts) = errors.handle(contracts) {
                field.contracts.extend(contracts);
            }
        }
    }

    if field.is_derived() {
        if field.default.is_some() || field.normalize.is_some() {
            errors.push(
                Error::custom(format!(
                    "`{}` is derived and cannot also have a default or a normalization",
                    field.display_name()
                ))
                .with_span(&sig.ident),
            );
        }
        field.representing = false;
        field.converted = false;
    }

    let info = MethodInformation {
        sig: sig.clone(),
        kind: MethodKind::Getter {
            field: field.name.clone(),
            accessor,
        },
        interceptors,
        contracts: Vec::new(),
    };
    errors.finish_with(Classified::Getter(field, info))
}

/// Whether the attribute is consumed by the trait generator
pub fn is_helper(attr: &Attribute) -> bool {
    TRAIT_HELPER_ATTRIBUTES
        .iter()
        .any(|name| attr.path().is_ident(name))
}

/// Extract documentation comments from attributes.
pub fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let Expr::Lit(expr_lit) = &meta.value {
                if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                    let doc = lit_str.value();
                    let doc = doc.trim();
                    if !doc.is_empty() {
                        docs.push(doc.to_string());
                    }
                }
            }
        }
    }

    docs
}
