//! 作用域节点与解析算法
//!
//! 作用域节点组成一棵树，每个节点保存本地的令牌绑定：已解析的值和延迟构造器。
//! 解析从某个节点出发向根行走，只读取祖先，从不读取兄弟或后代。

use chrono::{DateTime, Utc};
use di_abstractions::{
    Constructor, ErasedService, Provider, Resolver, TokenRegistry,
};
use infrastructure_common::{DependencyError, DependencyResult, TokenKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// 作用域节点
///
/// 发布后只有缓存填充会修改节点：构造器解析出的实例写入该节点自身的 `values`。
pub struct ScopeNode {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    parent: Option<Scope>,
    values: RwLock<HashMap<TokenKey, ErasedService>>,
    constructors: HashMap<TokenKey, Constructor>,
}

/// 作用域句柄
///
/// 克隆句柄共享同一节点。节点在没有句柄和后代引用它时释放。
#[derive(Clone)]
pub struct Scope(Arc<ScopeNode>);

impl Scope {
    /// 创建根作用域
    pub fn root(name: impl Into<String>) -> Self {
        Self::with_bindings(name.into(), None, HashMap::new(), HashMap::new())
    }

    fn with_bindings(
        name: String,
        parent: Option<Scope>,
        values: HashMap<TokenKey, ErasedService>,
        constructors: HashMap<TokenKey, Constructor>,
    ) -> Self {
        Self(Arc::new(ScopeNode {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            parent,
            values: RwLock::new(values),
            constructors,
        }))
    }

    /// 以本作用域为父节点，用可提供项创建子作用域
    ///
    /// 任何一项的实现类型未注册时返回 [`DependencyError::UnregisteredImplementation`]，
    /// 此时不会创建子作用域。同一次调用中同一令牌后写者胜出。
    pub fn provide(
        &self,
        registry: &dyn TokenRegistry,
        providers: impl IntoIterator<Item = Provider>,
    ) -> DependencyResult<Scope> {
        let mut values = HashMap::new();
        let mut constructors = HashMap::new();

        for provider in providers {
            let implementation = provider.implementation().clone();
            let registration = registry
                .lookup(implementation.id)
                .ok_or_else(|| DependencyError::unregistered(implementation.module_path.clone()))?;

            match provider {
                Provider::Constructor(_) => {
                    constructors.insert(registration.token, registration.constructor());
                }
                Provider::Instance { value, .. } => {
                    let service = registration.upcast(value).ok_or_else(|| {
                        DependencyError::TokenTypeMismatch {
                            token: registration.token.name().to_string(),
                        }
                    })?;
                    values.insert(registration.token, service);
                }
            }
        }

        let name = format!("{}.{}", self.name(), self.depth() + 1);
        debug!(
            "创建子作用域: {} (值 {} 个, 构造器 {} 个)",
            name,
            values.len(),
            constructors.len()
        );
        Ok(Self::with_bindings(
            name,
            Some(self.clone()),
            values,
            constructors,
        ))
    }

    /// 作用域ID
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    /// 作用域名称
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 创建时间
    pub fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// 父作用域
    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// 从本作用域到根的节点链（含自身）
    pub fn ancestors(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self), |scope| scope.parent())
    }

    /// 到根作用域的距离，根为 0
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// 是否为同一节点
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// 本节点是否已缓存该令牌的值
    pub fn has_local_value(&self, token: TokenKey) -> bool {
        self.0.values.read().contains_key(&token)
    }

    /// 本节点是否提供该令牌的构造器
    pub fn has_local_constructor(&self, token: TokenKey) -> bool {
        self.0.constructors.contains_key(&token)
    }
}

impl Resolver for Scope {
    fn resolve_key(&self, token: TokenKey) -> DependencyResult<ErasedService> {
        for scope in self.ancestors() {
            let node = &scope.0;

            if let Some(value) = node.values.read().get(&token) {
                trace!("命中缓存: {} @ {}", token, node.name);
                return Ok(value.clone());
            }

            if let Some(constructor) = node.constructors.get(&token) {
                // 构造期间不持有锁，构造器内部可以继续注入
                let produced = constructor.construct();
                let mut values = node.values.write();
                let cached = values.entry(token).or_insert(produced).clone();
                trace!(
                    "实例化并缓存: {} ({}) @ {}",
                    token,
                    constructor.implementation(),
                    node.name
                );
                return Ok(cached);
            }
        }

        Err(DependencyError::unresolved(token.name()))
    }

    fn construct_key(&self, token: TokenKey) -> DependencyResult<ErasedService> {
        let constructor = self
            .ancestors()
            .find_map(|scope| scope.0.constructors.get(&token))
            .ok_or_else(|| DependencyError::no_constructor(token.name()))?;

        trace!("构造新实例: {} ({})", token, constructor.implementation());
        Ok(constructor.construct())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("depth", &self.depth())
            .field("values", &self.0.values.read().len())
            .field("constructors", &self.0.constructors.len())
            .finish()
    }
}
