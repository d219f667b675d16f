//! # Component Macros
//!
//! 这个 crate 提供了用于实现类型自动注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`injectable`] - 声明实现类型满足的令牌，并在进程启动时注册
//! - [`Token`] - 为抽象标记类型派生 `Token`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{injectable, Token};
//!
//! pub trait Report: Send + Sync {
//!     fn report(&self, message: &str);
//! }
//!
//! #[derive(Token)]
//! #[token(service = dyn Report)]
//! pub struct ErrorReporter;
//!
//! #[derive(Default)]
//! #[injectable(ErrorReporter)]
//! pub struct ConsoleErrorReporter;
//!
//! impl Report for ConsoleErrorReporter {
//!     fn report(&self, message: &str) {
//!         eprintln!("{message}");
//!     }
//! }
//! ```
//!
//! 使用这些宏的 crate 需要依赖 `infrastructure-common`、`di-impl` 与 `ctor`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod token;
mod utils;

/// 可注入实现类型宏
///
/// 不带参数时实现类型以自身为令牌；带一个令牌路径时声明实现类型满足该令牌。
/// 两种情况都会生成 `Implements` 实现，并用 `ctor` 在进程启动时注册到进程级注册表。
///
/// 实现类型必须实现 `Default`（零参数构造）以及令牌服务 trait。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default)]
/// #[injectable]
/// pub struct Counter;
///
/// #[derive(Default)]
/// #[injectable(ILogger)]
/// pub struct Logger;
/// ```
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(args, input)
}

/// 令牌派生宏
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Token)]
/// #[token(service = dyn Log)]
/// pub struct ILogger;
/// ```
#[proc_macro_derive(Token, attributes(token))]
pub fn derive_token(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    token::derive_token_impl(input)
}
