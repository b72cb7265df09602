//! Rendering generated items as source text

use anyhow::{Context, Result};
use proc_macro2::TokenStream;

/// Format generated items as a source file, headed by a `@generated` marker.
pub fn render(items: TokenStream, origin: &str) -> Result<String> {
    let file: syn::File =
        syn::parse2(items).context("Generated items do not form a valid source file")?;

    Ok(format!(
        "// @generated by blueprint from {origin}. Do not edit.\n\n{}",
        prettyplease::unparse(&file)
    ))
}
