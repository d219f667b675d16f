//! 令牌注册表实现

use dashmap::DashMap;
use di_abstractions::{RegisterOutcome, Registration, TokenRegistry, TokenRegistryExt};
use infrastructure_common::{Implements, Token};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use tracing::{info, trace, warn};

/// 进程级令牌注册表
static GLOBAL_TOKEN_REGISTRY: Lazy<Arc<InMemoryTokenRegistry>> =
    Lazy::new(|| Arc::new(InMemoryTokenRegistry::new()));

/// 获取进程级令牌注册表
///
/// `#[injectable]` 在进程启动时向这里注册。
pub fn global_registry() -> Arc<InMemoryTokenRegistry> {
    GLOBAL_TOKEN_REGISTRY.clone()
}

/// 向进程级注册表以显式令牌注册实现类型
pub fn register<I, T>() -> RegisterOutcome
where
    T: Token,
    I: Implements<T> + Default,
{
    GLOBAL_TOKEN_REGISTRY.register_as::<I, T>()
}

/// 向进程级注册表以自身为令牌注册实现类型
pub fn register_self<I>() -> RegisterOutcome
where
    I: Token + Implements<I> + Default,
{
    GLOBAL_TOKEN_REGISTRY.register_self::<I>()
}

/// 基于内存的令牌注册表
///
/// 以实现类型为键，每个实现类型只保存一个令牌。
#[derive(Debug, Default)]
pub struct InMemoryTokenRegistry {
    registrations: DashMap<TypeId, Registration>,
}

impl InMemoryTokenRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 已注册的实现类型数量
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl TokenRegistry for InMemoryTokenRegistry {
    fn register(&self, registration: Registration) -> RegisterOutcome {
        let implementation = registration.implementation_id();
        let outcome = match self.registrations.get(&implementation) {
            Some(existing) if existing.same_binding(&registration) => RegisterOutcome::Unchanged,
            Some(existing) => RegisterOutcome::Replaced {
                previous: existing.token,
            },
            None => RegisterOutcome::Inserted,
        };

        match outcome {
            RegisterOutcome::Unchanged => {
                trace!("重复注册，忽略: {}", registration.implementation);
                return outcome;
            }
            RegisterOutcome::Replaced { previous } => {
                warn!(
                    "覆盖实现类型的令牌: {} ({} -> {})",
                    registration.implementation, previous, registration.token
                );
            }
            RegisterOutcome::Inserted => {
                info!(
                    "注册实现类型: {} -> {}",
                    registration.implementation, registration.token
                );
            }
        }

        self.registrations.insert(implementation, registration);
        outcome
    }

    fn lookup(&self, implementation: TypeId) -> Option<Registration> {
        self.registrations
            .get(&implementation)
            .map(|entry| entry.value().clone())
    }

    fn registrations(&self) -> Vec<Registration> {
        self.registrations
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
