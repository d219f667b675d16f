//! # 依赖注入具体实现
//!
//! 提供令牌注册表、分层作用域节点、作用域游标与容器门面的具体实现。
//!
//! ## 数据流
//!
//! 注册（进程启动时）填充令牌注册表 → 提供（进入作用域时）创建子作用域节点并
//! 按注册表填充绑定 → 解析（作用域内任意时刻）沿节点链向根行走，惰性实例化并缓存。
//!
//! ```rust
//! use di_abstractions::{providers, Resolver, TokenRegistryExt};
//! use di_impl::{Container, InMemoryTokenRegistry};
//! use infrastructure_common::{implements, token};
//! use std::sync::Arc;
//!
//! pub trait Log: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! token!(pub ILogger => dyn Log);
//!
//! #[derive(Default)]
//! struct Logger;
//!
//! impl Log for Logger {
//!     fn log(&self, message: &str) -> String {
//!         format!("[app] {message}")
//!     }
//! }
//!
//! implements!(Logger => ILogger);
//!
//! let registry = InMemoryTokenRegistry::new();
//! registry.register_as::<Logger, ILogger>();
//!
//! let container = Container::with_registry(Arc::new(registry));
//! container.provide(providers![Logger]).unwrap();
//! let logger = container.inject::<ILogger>().unwrap();
//! assert_eq!(logger.log("hi"), "[app] hi");
//! ```

pub mod ambient;
pub mod container;
pub mod cursor;
pub mod node;
pub mod registry;

pub use container::Container;
pub use cursor::{ScopeCursor, SubtreeGuard};
pub use node::Scope;
pub use registry::{global_registry, register, register_self, InMemoryTokenRegistry};
