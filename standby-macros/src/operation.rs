//! `#[derive(Operation)]`.
//!
//! Maps a request struct onto the proxy's dispatch entry point by
//! implementing `standby::Operation` for it.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    DeriveInput, Ident, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of the `#[operation(...)]` helper attribute.
#[derive(Default)]
pub(crate) struct OperationArgs {
    pub name: Option<LitStr>,
    pub output: Option<Type>,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = OperationArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "operation name cannot be empty",
                        ));
                    }
                    args.name = Some(lit);
                }
                "output" => {
                    args.output = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// Implementation of `#[derive(Operation)]`.
pub fn derive_operation_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut args = OperationArgs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("operation")) {
        match attr.parse_args::<OperationArgs>() {
            Ok(parsed) => {
                if parsed.name.is_some() {
                    args.name = parsed.name;
                }
                if parsed.output.is_some() {
                    args.output = parsed.output;
                }
            }
            Err(e) => return e.to_compile_error().into(),
        }
    }

    let op_name = args
        .name
        .unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));
    let output: proc_macro2::TokenStream = args.output.map_or_else(|| quote! { () }, |ty| quote! { #ty });

    let expanded = quote! {
        impl #impl_generics ::standby::Operation for #name #ty_generics #where_clause {
            const NAME: &'static str = #op_name;
            type Output = #output;
        }
    };

    TokenStream::from(expanded)
}
