//! Finding annotated items in source files
//!
//! The CLI generates from whole files instead of from macro input. Structs
//! are picked up by the blueprint derives they list, traits by a `generate`
//! attribute. Inline modules are searched too; out-of-line modules are
//! separate files and are scanned on their own.

use crate::attrs::GenerateArgs;
use crate::info::TypeInformation;
use crate::{GeneratorOptions, builder, contract, converter, representing, subclass};
use proc_macro2::TokenStream;
use serde::Serialize;
use syn::punctuated::Punctuated;
use syn::{Attribute, DeriveInput, Ident, Item, ItemStruct, ItemTrait, Meta, Token};

/// The blueprint derives listed on a struct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Derives {
    pub builder: bool,
    pub representing: bool,
    pub validate: bool,
    pub convert: bool,
}

impl Derives {
    fn from_attributes(attrs: &[Attribute]) -> Self {
        let mut derives = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
            let Ok(paths) =
                attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            else {
                continue;
            };
            for path in paths {
                let Some(segment) = path.segments.last() else {
                    continue;
                };
                match segment.ident.to_string().as_str() {
                    "Builder" => derives.builder = true,
                    "Representing" => derives.representing = true,
                    "Validate" => derives.validate = true,
                    "Convert" => derives.convert = true,
                    _ => {}
                }
            }
        }
        derives
    }

    pub fn any(&self) -> bool {
        self.builder || self.representing || self.validate || self.convert
    }
}

/// An item the generators apply to
#[derive(Debug, Clone)]
pub enum ScannedItem {
    Struct {
        input: DeriveInput,
        derives: Derives,
    },
    Trait {
        item: ItemTrait,
        /// Tokens inside `#[generate(...)]`
        args: TokenStream,
    },
}

impl ScannedItem {
    /// Name of the annotated item
    pub fn ident(&self) -> &Ident {
        match self {
            ScannedItem::Struct { input, .. } => &input.ident,
            ScannedItem::Trait { item, .. } => &item.ident,
        }
    }

    pub fn analyze(&self, options: &GeneratorOptions) -> darling::Result<TypeInformation> {
        match self {
            ScannedItem::Struct { input, .. } => TypeInformation::from_derive_input(input, options),
            ScannedItem::Trait { item, args } => {
                let args = GenerateArgs::from_tokens(args.clone())?;
                TypeInformation::from_item_trait(item, &args, options)
            }
        }
    }

    /// The items the macros would add next to this one
    pub fn expand(&self, options: &GeneratorOptions) -> darling::Result<TokenStream> {
        match self {
            ScannedItem::Struct { input, derives } => {
                let info = TypeInformation::from_derive_input(input, options)?;
                let mut tokens = TokenStream::new();
                if derives.builder {
                    tokens.extend(builder::generate(&info));
                }
                if derives.representing {
                    tokens.extend(representing::generate(&info));
                }
                if derives.validate {
                    tokens.extend(contract::expand_validated(&info));
                }
                if derives.convert {
                    tokens.extend(converter::generate(&info));
                }
                Ok(tokens)
            }
            ScannedItem::Trait { item, args } => {
                let args = GenerateArgs::from_tokens(args.clone())?;
                Ok(subclass::generate(item, &args, options)?.items)
            }
        }
    }
}

fn generate_args(attrs: &[Attribute]) -> Option<TokenStream> {
    attrs.iter().find_map(|attr| {
        let is_generate = attr
            .path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "generate");
        if !is_generate {
            return None;
        }
        match &attr.meta {
            Meta::Path(_) => Some(TokenStream::new()),
            Meta::List(list) => Some(list.tokens.clone()),
            Meta::NameValue(_) => None,
        }
    })
}

fn scan_items(items: &[Item], found: &mut Vec<ScannedItem>) {
    for item in items {
        match item {
            Item::Struct(item) => {
                let derives = Derives::from_attributes(&item.attrs);
                if derives.any() {
                    found.push(ScannedItem::Struct {
                        input: DeriveInput::from(ItemStruct::clone(item)),
                        derives,
                    });
                }
            }
            Item::Trait(item) => {
                if let Some(args) = generate_args(&item.attrs) {
                    found.push(ScannedItem::Trait {
                        item: item.clone(),
                        args,
                    });
                }
            }
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    scan_items(items, found);
                }
            }
            _ => {}
        }
    }
}

/// Annotated items of a parsed file, in source order
pub fn scan_file(file: &syn::File) -> Vec<ScannedItem> {
    let mut found = Vec::new();
    scan_items(&file.items, &mut found);
    tracing::debug!(items = found.len(), "scanned file");
    found
}

pub fn scan_source(source: &str) -> syn::Result<Vec<ScannedItem>> {
    let file = syn::parse_file(source)?;
    Ok(scan_file(&file))
}
