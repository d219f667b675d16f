//! # Reactive Store
//!
//! 状态存储基础设施：带析构回调的 [`Store`]、可观察的 [`State`] 字段，
//! 以及记录调用过程的 [`inspect`] 与吞掉失败的 [`guard`]。
//!
//! 存储通过 [`attach_store`] 挂到当前子树上，子树退出时执行析构回调。

pub mod calls;
pub mod state;
pub mod store;

pub use calls::{guard, inspect};
pub use state::State;
pub use store::{attach_store, Store};
