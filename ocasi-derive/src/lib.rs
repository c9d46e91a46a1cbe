// Adapted from `validator_derive` (https://github.com/Keats/validator).
//
// See LICENSE for details.

#![recursion_limit = "128"]

use inflections::Inflect;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derives `ocasi_json::validation::Validate` for a struct by recursing into
/// each of its fields.
///
/// Every field name is re-cased to `camelCase` to match the JSON key it was
/// deserialized from, so validation error paths line up with the source
/// document rather than the Rust identifier.
///
/// A struct may additionally carry `#[gltf(validate_hook = "some_fn")]`,
/// naming a free function with the signature of `Validate::validate_minimally`
/// (taking `&Self` as its first argument) that runs after the per-field
/// validation, for invariants that span more than one field.
#[proc_macro_derive(Validate, attributes(gltf))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand(&ast).into()
}

fn validate_hook(ast: &DeriveInput) -> Option<syn::Ident> {
    for attr in &ast.attrs {
        if !attr.path().is_ident("gltf") {
            continue;
        }
        let mut hook = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("validate_hook") {
                let value = meta.value()?;
                let lit: syn::LitStr = value.parse()?;
                hook = Some(syn::Ident::new(&lit.value(), lit.span()));
            }
            Ok(())
        });
        if hook.is_some() {
            return hook;
        }
    }
    None
}

fn expand(ast: &DeriveInput) -> proc_macro2::TokenStream {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("#[derive(Validate)] only works on structs with named fields"),
        },
        _ => panic!("#[derive(Validate)] only works on `struct`s"),
    };
    let ident = &ast.ident;
    let hook_call = validate_hook(ast).map(|hook| {
        quote! {
            #hook(self, _root, _path, _report);
        }
    });

    let minimal_validations = fields.iter().map(|f| {
        let field_ident = f.ident.as_ref().unwrap();
        let field_name = field_ident.to_string().to_camel_case();
        quote! {
            self.#field_ident.validate_minimally(
                _root,
                || _path().field(#field_name),
                _report,
            );
        }
    });
    let complete_validations = fields.iter().map(|f| {
        let field_ident = f.ident.as_ref().unwrap();
        let field_name = field_ident.to_string().to_camel_case();
        quote! {
            self.#field_ident.validate_completely(
                _root,
                || _path().field(#field_name),
                _report,
            );
        }
    });

    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    quote! {
        impl #impl_generics crate::validation::Validate for #ident #ty_generics #where_clause {
            fn validate_minimally<P, R>(&self, _root: &crate::Root, _path: P, _report: &mut R)
            where
                P: Fn() -> crate::Path,
                R: FnMut(&dyn Fn() -> crate::Path, crate::validation::Error),
            {
                #(#minimal_validations)*
                #hook_call
            }

            fn validate_completely<P, R>(&self, _root: &crate::Root, _path: P, _report: &mut R)
            where
                P: Fn() -> crate::Path,
                R: FnMut(&dyn Fn() -> crate::Path, crate::validation::Error),
            {
                #(#complete_validations)*
            }
        }
    }
}
