//! 容器门面
//!
//! 组合令牌注册表与作用域栈，对外提供 `provide` / `inject` / `inject_new`。

use crate::cursor::{ScopeCursor, SubtreeGuard};
use crate::node::Scope;
use crate::registry::global_registry;
use di_abstractions::{ErasedService, Provider, Resolver, ScopeStack, TeardownRegistry, TokenRegistry};
use infrastructure_common::{ContainerConfig, DependencyResult, TeardownHook, TokenKey};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 依赖注入容器
pub struct Container<S = ScopeCursor>
where
    S: ScopeStack<Node = Scope>,
{
    registry: Arc<dyn TokenRegistry>,
    stack: S,
    config: ContainerConfig,
}

impl Container<ScopeCursor> {
    /// 基于进程级注册表创建容器
    pub fn new() -> Self {
        Self::with_registry(global_registry())
    }

    /// 基于指定注册表创建容器
    pub fn with_registry(registry: Arc<dyn TokenRegistry>) -> Self {
        Self::with_config(registry, ContainerConfig::default())
    }

    /// 基于指定注册表和配置创建容器
    pub fn with_config(registry: Arc<dyn TokenRegistry>, config: ContainerConfig) -> Self {
        let stack = ScopeCursor::new(config.root_scope_name.clone());
        Self::with_stack(registry, stack, config)
    }

    /// 进入子树，守卫释放时恢复外层作用域并执行拆卸回调
    pub fn enter(&self, name: impl Into<String>) -> SubtreeGuard<'_> {
        self.stack.enter(name)
    }
}

impl Default for Container<ScopeCursor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Container<S>
where
    S: ScopeStack<Node = Scope>,
{
    /// 使用宿主提供的作用域栈创建容器
    pub fn with_stack(registry: Arc<dyn TokenRegistry>, stack: S, config: ContainerConfig) -> Self {
        Self {
            registry,
            stack,
            config,
        }
    }

    /// 在当前位置创建子作用域并将其发布为当前作用域
    ///
    /// 任何一项未注册时返回错误，当前作用域保持不变。
    pub fn provide(&self, providers: impl IntoIterator<Item = Provider>) -> DependencyResult<Scope> {
        let parent = self.stack.current();
        let child = match parent.provide(self.registry.as_ref(), providers) {
            Ok(child) => child,
            Err(e) => {
                warn!("提供绑定失败 @ {}: {}", parent.name(), e);
                return Err(e);
            }
        };
        self.stack.publish(child.clone());
        debug!("发布作用域: {} (父 {})", child.name(), parent.name());
        Ok(child)
    }

    /// 当前作用域
    pub fn current(&self) -> Scope {
        self.stack.current()
    }

    /// 令牌注册表
    pub fn registry(&self) -> &Arc<dyn TokenRegistry> {
        &self.registry
    }

    /// 作用域栈
    pub fn stack(&self) -> &S {
        &self.stack
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    fn log_resolution(&self, operation: &str, token: TokenKey, scope: &Scope) {
        if self.config.trace_resolution {
            debug!("{}: {} @ {}", operation, token, scope.name());
        } else {
            trace!("{}: {} @ {}", operation, token, scope.name());
        }
    }
}

impl<S> Resolver for Container<S>
where
    S: ScopeStack<Node = Scope>,
{
    fn resolve_key(&self, token: TokenKey) -> DependencyResult<ErasedService> {
        let scope = self.stack.current();
        self.log_resolution("inject", token, &scope);
        scope.resolve_key(token)
    }

    fn construct_key(&self, token: TokenKey) -> DependencyResult<ErasedService> {
        let scope = self.stack.current();
        self.log_resolution("inject_new", token, &scope);
        scope.construct_key(token)
    }
}

impl<S> TeardownRegistry for Container<S>
where
    S: ScopeStack<Node = Scope> + TeardownRegistry,
{
    fn on_teardown(&self, hook: TeardownHook) {
        self.stack.on_teardown(hook);
    }
}

impl<S> fmt::Debug for Container<S>
where
    S: ScopeStack<Node = Scope> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.registry.registrations().len())
            .field("stack", &self.stack)
            .field("config", &self.config)
            .finish()
    }
}
