//! 作用域定位抽象接口
//!
//! 宿主环境通过这两个 trait 告诉容器“当前位置”并在子树退出时执行回调，
//! 容器本身不关心作用域与宿主子树如何对应。

use infrastructure_common::TeardownHook;

/// 作用域栈适配器 trait
pub trait ScopeStack: Send + Sync {
    /// 作用域句柄
    type Node: Clone;

    /// 当前作用域，首次使用时惰性创建根作用域
    fn current(&self) -> Self::Node;

    /// 将作用域设为当前活动分支的当前作用域
    fn publish(&self, node: Self::Node);
}

/// 拆卸回调登记 trait
pub trait TeardownRegistry {
    /// 登记当前子树退出时执行的回调
    fn on_teardown(&self, hook: TeardownHook);
}
