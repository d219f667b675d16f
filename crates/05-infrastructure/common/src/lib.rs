//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn DI 依赖注入设施的公共类型。
//!
//! ## 核心组件
//!
//! - [`Token`] - 抽象契约的令牌 trait
//! - [`Implements`] - 实现类型到令牌服务的上转
//! - [`DependencyError`] - 注册、提供与解析的错误分类
//! - [`TeardownHooks`] - 子树退出时的拆卸回调
//! - [`ContainerConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 令牌按类型身份比较，不做结构比较
//! - 缺失的依赖必须立即报错，不返回空值
//! - 拆卸回调中的失败只记录日志，不向宿主传播

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;
pub mod token;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
pub use token::*;
