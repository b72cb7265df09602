//! Classification of field types
//!
//! Contracts are only valid for some kinds of types, and accessor traits
//! expose borrowed views of the values a subclass stores. Both questions are
//! answered syntactically from the declared type.

use quote::ToTokens;
use serde::Serialize;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Coarse kind of a field type as far as contracts are concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "element", rename_all = "snake_case")]
pub enum TypeShape {
    Bool,
    Integral,
    Decimal,
    Char,
    Text,
    /// Vectors, deques, lists, slices, arrays and ordered sets, with their element shape
    Sequence(Box<TypeShape>),
    /// Hash sets, whose iteration order is unspecified
    Set(Box<TypeShape>),
    Map,
    Optional(Box<TypeShape>),
    Other,
}

impl TypeShape {
    pub fn of(ty: &Type) -> Self {
        match ty {
            Type::Reference(reference) => Self::of(&reference.elem),
            Type::Paren(paren) => Self::of(&paren.elem),
            Type::Group(group) => Self::of(&group.elem),
            Type::Slice(slice) => TypeShape::Sequence(Box::new(Self::of(&slice.elem))),
            Type::Array(array) => TypeShape::Sequence(Box::new(Self::of(&array.elem))),
            Type::Path(path) => Self::of_path(path),
            _ => TypeShape::Other,
        }
    }

    fn of_path(path: &TypePath) -> Self {
        if path.qself.is_some() {
            return TypeShape::Other;
        }
        let Some(segment) = path.path.segments.last() else {
            return TypeShape::Other;
        };
        let first_argument = || generic_arguments(&segment.arguments).into_iter().next();

        match segment.ident.to_string().as_str() {
            "bool" => TypeShape::Bool,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => TypeShape::Integral,
            "f32" | "f64" => TypeShape::Decimal,
            "char" => TypeShape::Char,
            "str" | "String" => TypeShape::Text,
            "Option" => TypeShape::Optional(Box::new(
                first_argument().map_or(TypeShape::Other, Self::of),
            )),
            "Vec" | "VecDeque" | "BTreeSet" | "LinkedList" => TypeShape::Sequence(Box::new(
                first_argument().map_or(TypeShape::Other, Self::of),
            )),
            "HashSet" => TypeShape::Set(Box::new(
                first_argument().map_or(TypeShape::Other, Self::of),
            )),
            "HashMap" | "BTreeMap" => TypeShape::Map,
            _ => TypeShape::Other,
        }
    }

    /// The shape contracts see: nullable values are checked only when present.
    pub fn checked(&self) -> &TypeShape {
        match self {
            TypeShape::Optional(inner) => inner,
            other => other,
        }
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, TypeShape::Integral | TypeShape::Decimal)
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, TypeShape::Integral)
    }

    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            TypeShape::Text | TypeShape::Sequence(_) | TypeShape::Set(_) | TypeShape::Map
        )
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeShape::Sequence(_) | TypeShape::Set(_))
    }

    /// Whether iteration visits the elements in a meaningful order
    pub fn is_ordered_sequence(&self) -> bool {
        matches!(self, TypeShape::Sequence(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, TypeShape::Text)
    }

    pub fn element(&self) -> Option<&TypeShape> {
        match self {
            TypeShape::Sequence(element) | TypeShape::Set(element) => Some(element),
            _ => None,
        }
    }

    /// Whether a floating point value appears anywhere inside the type
    pub fn contains_decimal(&self) -> bool {
        match self {
            TypeShape::Decimal => true,
            TypeShape::Sequence(inner) | TypeShape::Set(inner) | TypeShape::Optional(inner) => {
                inner.contains_decimal()
            }
            _ => false,
        }
    }
}

/// How a getter's return type relates to the value a subclass stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    /// `T`, returned as a clone
    Owned,
    /// `&T`, stored as `T`
    Borrowed,
    /// `&str`, stored as `String`
    Str,
    /// `&[T]`, stored as `Vec<T>`
    Slice,
    /// `Option<&str>`, stored as `Option<String>`
    OptionalStr,
    /// `Option<&T>`, stored as `Option<T>`
    OptionalBorrowed,
}

/// Map a getter return type to the owned type stored behind it.
pub fn stored_type(ret: &Type) -> (Type, Accessor) {
    if let Type::Reference(reference) = ret {
        return match &*reference.elem {
            Type::Path(path) if path.path.is_ident("str") => {
                (syn::parse_quote!(::std::string::String), Accessor::Str)
            }
            Type::Slice(slice) => {
                let element = &slice.elem;
                (syn::parse_quote!(::std::vec::Vec<#element>), Accessor::Slice)
            }
            elem => ((*elem).clone(), Accessor::Borrowed),
        };
    }
    if let Some(Type::Reference(reference)) = option_inner(ret) {
        return match &*reference.elem {
            Type::Path(path) if path.path.is_ident("str") => (
                syn::parse_quote!(::std::option::Option<::std::string::String>),
                Accessor::OptionalStr,
            ),
            elem => (
                syn::parse_quote!(::std::option::Option<#elem>),
                Accessor::OptionalBorrowed,
            ),
        };
    }
    (ret.clone(), Accessor::Owned)
}

/// The `T` of an `Option<T>`
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    generic_arguments(&segment.arguments).into_iter().next()
}

/// Whether a type is spelled `Result<..>`
pub fn is_result(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.segments.last().is_some_and(|s| s.ident == "Result"))
}

/// Whether two types are spelled the same, ignoring leading `::std::...` paths
/// on the standard types the accessor mapping introduces.
pub fn same_type(left: &Type, right: &Type) -> bool {
    normalized(left) == normalized(right)
}

fn normalized(ty: &Type) -> String {
    type_name(ty)
        .replace("::std::string::", "")
        .replace("::std::vec::", "")
        .replace("::std::option::", "")
        .replace("std::string::", "")
        .replace("std::vec::", "")
        .replace("std::option::", "")
}

/// Compact textual rendering of a type
pub fn type_name(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace(" ;", ";")
}

fn generic_arguments(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "shape/shape_tests.rs"]
mod shape_tests;
