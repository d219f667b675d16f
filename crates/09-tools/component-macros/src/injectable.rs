//! 可注入实现类型宏实现

use crate::utils::{registration_fn_name, reject_generics};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, DeriveInput, Path, Result};

/// 宏参数：可选的令牌路径
#[derive(Debug, Clone, Default)]
pub struct InjectableArgs {
    /// 显式令牌，缺省时以实现类型自身为令牌
    pub token: Option<Path>,
}

impl Parse for InjectableArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let token: Path = input.parse()?;
        if !input.is_empty() {
            return Err(input.error("#[injectable] 最多接受一个令牌"));
        }
        Ok(Self { token: Some(token) })
    }
}

/// 实现 #[injectable] 宏
pub fn injectable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = match syn::parse::<InjectableArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let item = match syn::parse::<DeriveInput>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    if let Err(e) = reject_generics(&item.generics, "#[injectable]") {
        return e.to_compile_error().into();
    }

    let expanded = expand(&item, &args);
    TokenStream::from(quote! {
        #item

        #expanded
    })
}

fn expand(item: &DeriveInput, args: &InjectableArgs) -> proc_macro2::TokenStream {
    let ident = &item.ident;
    let register_fn = registration_fn_name(ident);

    let (token_impl, token, registration) = match &args.token {
        Some(token) => (
            quote! {},
            quote! { #token },
            quote! { ::di_impl::register::<#ident, #token>() },
        ),
        None => (
            quote! {
                impl ::infrastructure_common::Token for #ident {
                    type Service = #ident;
                }
            },
            quote! { #ident },
            quote! { ::di_impl::register_self::<#ident>() },
        ),
    };

    quote! {
        #token_impl

        impl ::infrastructure_common::Implements<#token> for #ident {
            fn upcast(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<<#token as ::infrastructure_common::Token>::Service> {
                self
            }
        }

        // 使用 ctor 在程序启动时自动注册实现类型
        #[doc(hidden)]
        #[ctor::ctor]
        fn #register_fn() {
            let _ = #registration;
        }
    }
}
