//! 令牌派生宏实现

use crate::utils::reject_generics;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Type};

/// 实现 #[derive(Token)] 宏
pub fn derive_token_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    reject_generics(&input.generics, "#[derive(Token)]")?;

    let ident = &input.ident;
    let mut service: Option<Type> = None;

    for attr in &input.attrs {
        if attr.path().is_ident("token") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("service") {
                    service = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("未知的 token 参数，仅支持 service = <类型>"))
                }
            })?;
        }
    }

    let service = service.ok_or_else(|| {
        syn::Error::new_spanned(ident, "#[derive(Token)] 需要 #[token(service = <类型>)]")
    })?;

    Ok(quote! {
        impl ::infrastructure_common::Token for #ident {
            type Service = #service;
        }
    })
}
