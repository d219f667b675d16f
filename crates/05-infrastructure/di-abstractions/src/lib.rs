//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义令牌注册、作用域定位与依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`TokenRegistry`] - 实现类型到令牌的进程级映射
//! - [`Provider`] - 可提供项（延迟构造器或现成实例）
//! - [`Resolver`] - 沿作用域链解析令牌
//! - [`ScopeStack`] - 宿主提供的“当前作用域”定位
//! - [`TeardownRegistry`] - 子树退出时的拆卸回调登记

pub mod provider;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use provider::*;
pub use registry::*;
pub use resolver::*;
pub use scope::*;
