//! 宏工具函数

use proc_macro2::Span;
use syn::{Generics, Ident};

/// 生成注册函数名
pub fn registration_fn_name(ident: &Ident) -> Ident {
    Ident::new(
        &format!("__register_injectable_{}", to_snake_case(&ident.to_string())),
        Span::call_site(),
    )
}

/// 驼峰转蛇形
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
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

/// 拒绝泛型类型：注册表需要具体类型身份
pub fn reject_generics(generics: &Generics, what: &str) -> syn::Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            generics,
            format!("{what} 不支持泛型类型"),
        ))
    }
}
