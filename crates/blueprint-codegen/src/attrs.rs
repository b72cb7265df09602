//! Options carried by the helper attributes

use darling::FromMeta;
use darling::util::{Flag, Override};

/// `#[builder(...)]` on a struct
#[derive(Debug, Default, FromMeta)]
pub struct BuilderTypeArgs {
    /// Function taking every field in declaration order
    pub constructor: Option<syn::Path>,
}

/// `#[builder(...)]` on a field
#[derive(Debug, Default, FromMeta)]
pub struct BuilderFieldArgs {
    /// `default` uses `Default::default()`, `default = expr` uses `expr`
    pub default: Option<Override<syn::Expr>>,
}

/// `#[representing(...)]` on a struct
#[derive(Debug, Default, FromMeta)]
pub struct RepresentingTypeArgs {
    /// Also generate `PartialOrd` and `Ord`
    pub ordered: Flag,
    /// Only generate the impls that do not need `Eq` (for float fields)
    pub partial: Flag,
}

/// `#[representing(...)]` on a field
#[derive(Debug, Default, FromMeta)]
pub struct RepresentingFieldArgs {
    pub skip: Flag,
}

/// `#[convert(...)]` on a field
#[derive(Debug, Default, FromMeta)]
pub struct ConvertFieldArgs {
    /// Leave the field out of the record and recover it with its default
    pub skip: Flag,
}

/// Arguments of `#[generate(...)]` on an accessor trait
#[derive(Debug, Default, FromMeta)]
pub struct GenerateArgs {
    /// Name of the generated struct, `<Trait><subclass suffix>` by default
    pub name: Option<syn::Ident>,
    /// Whether to generate a builder, taken from the generator options by default
    pub builder: Option<bool>,
    /// Also generate a converter
    pub converter: Flag,
    pub ordered: Flag,
    pub partial: Flag,
}

impl GenerateArgs {
    /// Parse the argument tokens of the attribute
    pub fn from_tokens(tokens: proc_macro2::TokenStream) -> darling::Result<Self> {
        let items = darling::ast::NestedMeta::parse_meta_list(tokens)?;
        Self::from_list(&items)
    }
}
