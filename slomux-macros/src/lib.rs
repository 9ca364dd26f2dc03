//! Procedural macros for slomux

use darling::{FromDeriveInput, FromMeta, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Casing applied to variant names to form action type tags
#[derive(Debug, Clone, Copy, Default)]
enum RenameRule {
    /// Variant name as written (`UpdateCounter`)
    #[default]
    None,
    /// `update_counter`
    SnakeCase,
    /// `UPDATE_COUNTER`
    ScreamingSnakeCase,
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "PascalCase" => Ok(RenameRule::None),
            "snake_case" => Ok(RenameRule::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnakeCase),
            other => Err(darling::Error::unknown_value(other)),
        }
    }
}

impl RenameRule {
    fn apply(self, variant: &str) -> String {
        match self {
            RenameRule::None => variant.to_string(),
            RenameRule::SnakeCase => to_snake_case(variant),
            RenameRule::ScreamingSnakeCase => to_snake_case(variant).to_uppercase(),
        }
    }
}

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Casing rule for every variant's tag
    #[darling(default)]
    rename_all: RenameRule,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Explicit tag, overrides `rename_all`
    #[darling(default)]
    rename: Option<String>,
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// `Enum::Variant { .. } => "TAG"`
fn name_arm(enum_name: &syn::Ident, variant: &syn::Ident, tag: &str) -> TokenStream2 {
    quote! { #enum_name::#variant { .. } => #tag }
}

/// Derive macro for the Action trait
///
/// Generates `name()`, returning each variant's type tag, and an inherent
/// `TAGS` constant listing every tag in declaration order.
///
/// Tags default to the variant name. `#[action(rename_all = "...")]` on the
/// enum applies `"snake_case"`, `"SCREAMING_SNAKE_CASE"` or `"PascalCase"`;
/// `#[action(rename = "...")]` on a variant sets its tag explicitly.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum CounterAction {
///     UpdateCounter(i64),
///     ChangeStepSize(StepInput),
///     #[action(rename = "reset")]
///     Reset,
/// }
///
/// assert_eq!(CounterAction::UpdateCounter(1).name(), "UPDATE_COUNTER");
/// assert_eq!(CounterAction::Reset.name(), "reset");
/// assert_eq!(CounterAction::TAGS, &["UPDATE_COUNTER", "CHANGE_STEP_SIZE", "reset"]);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let tags: Vec<String> = variants
        .iter()
        .map(|v| {
            v.rename
                .clone()
                .unwrap_or_else(|| opts.rename_all.apply(&v.ident.to_string()))
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    for (variant, tag) in variants.iter().zip(&tags) {
        if !seen.insert(tag.as_str()) {
            return syn::Error::new_spanned(
                &variant.ident,
                format!("duplicate action tag `{}`", tag),
            )
            .to_compile_error()
            .into();
        }
    }

    // Wildcard struct pattern matches unit, tuple and struct variants alike
    let name_arms: Vec<TokenStream2> = variants
        .iter()
        .zip(&tags)
        .map(|(v, tag)| name_arm(name, &v.ident, tag))
        .collect();

    let expanded = quote! {
        impl #impl_generics ::slomux::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Every action type tag, in declaration order
            pub const TAGS: &'static [&'static str] = &[#(#tags),*];
        }
    };

    expanded.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("UpdateCounter"), "update_counter");
        assert_eq!(to_snake_case("Tick"), "tick");
    }

    #[test]
    fn test_rename_rules() {
        assert_eq!(RenameRule::None.apply("ChangeStepSize"), "ChangeStepSize");
        assert_eq!(RenameRule::SnakeCase.apply("ChangeStepSize"), "change_step_size");
        assert_eq!(
            RenameRule::ScreamingSnakeCase.apply("ChangeStepSize"),
            "CHANGE_STEP_SIZE"
        );
    }

    #[test]
    fn test_name_arm_matches_any_variant_shape() {
        let arm = name_arm(
            &syn::parse_quote!(CounterAction),
            &syn::parse_quote!(UpdateCounter),
            "UPDATE_COUNTER",
        );
        assert_eq!(
            arm.to_string(),
            quote! { CounterAction::UpdateCounter { .. } => "UPDATE_COUNTER" }.to_string()
        );
    }

    #[test]
    fn test_rename_rule_from_meta() {
        assert!(matches!(
            RenameRule::from_string("SCREAMING_SNAKE_CASE"),
            Ok(RenameRule::ScreamingSnakeCase)
        ));
        assert!(RenameRule::from_string("kebab-case").is_err());
    }
}
