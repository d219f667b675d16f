//! 令牌与实现类型的基础接口定义
//!
//! 令牌标识一个抽象契约，实现类型通过 [`Implements`] 声明自己满足该契约。

use crate::metadata::TokenKey;
use std::sync::Arc;

/// 令牌 trait
///
/// 令牌按类型身份比较。令牌可以是独立的抽象标记类型，也可以是实现类型自身。
pub trait Token: 'static {
    /// 通过该令牌解析得到的服务类型，通常是 `dyn Trait`
    type Service: ?Sized + Send + Sync + 'static;

    /// 令牌键
    fn key() -> TokenKey {
        TokenKey::of::<Self>()
    }
}

/// 实现类型 trait
///
/// 将具体实例上转为令牌的服务类型。
pub trait Implements<T: Token>: Send + Sync + 'static {
    /// 上转为服务类型
    fn upcast(self: Arc<Self>) -> Arc<T::Service>;
}

/// 声明抽象令牌
///
/// ```rust
/// use infrastructure_common::{token, Token};
///
/// pub trait Log: Send + Sync {
///     fn log(&self, message: &str);
/// }
///
/// token!(pub ILogger => dyn Log);
///
/// assert!(ILogger::key().name().ends_with("ILogger"));
/// ```
#[macro_export]
macro_rules! token {
    ($($(#[$meta:meta])* $vis:vis $name:ident => $service:ty);+ $(;)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            $vis struct $name;

            impl $crate::Token for $name {
                type Service = $service;
            }
        )+
    };
}

/// 声明实现类型满足的令牌
///
/// `implements!(Logger => ILogger)` 声明 `Logger` 满足 `ILogger`，
/// `implements!(Counter)` 将 `Counter` 声明为自身的令牌。
#[macro_export]
macro_rules! implements {
    ($implementation:ty => $token:ty) => {
        impl $crate::Implements<$token> for $implementation {
            fn upcast(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<<$token as $crate::Token>::Service> {
                self
            }
        }
    };
    ($implementation:ty) => {
        impl $crate::Token for $implementation {
            type Service = $implementation;
        }

        $crate::implements!($implementation => $implementation);
    };
}
