//! 依赖解析抽象接口
//!
//! 提供沿作用域链解析令牌的能力

use crate::registry::ErasedService;
use infrastructure_common::{DependencyError, DependencyResult, Token, TokenKey};
use std::sync::Arc;

/// 依赖解析器 trait
///
/// 类型擦除的两个必需方法由具体作用域实现，泛型方法在其上提供类型安全的入口。
pub trait Resolver {
    /// 解析令牌：先查缓存值，再查构造器并缓存结果
    fn resolve_key(&self, token: TokenKey) -> DependencyResult<ErasedService>;

    /// 只查构造器，构造一个不缓存的新实例
    fn construct_key(&self, token: TokenKey) -> DependencyResult<ErasedService>;

    /// 注入令牌对应的服务
    fn inject<T: Token>(&self) -> DependencyResult<Arc<T::Service>>
    where
        Self: Sized,
    {
        downcast_service::<T>(self.resolve_key(T::key())?)
    }

    /// 注入令牌对应服务的全新实例
    fn inject_new<T: Token>(&self) -> DependencyResult<Arc<T::Service>>
    where
        Self: Sized,
    {
        downcast_service::<T>(self.construct_key(T::key())?)
    }

    /// 注入令牌对应的服务，祖先链上没有绑定时返回 `None`
    ///
    /// 其他错误（例如类型不匹配）照常返回。
    fn try_inject<T: Token>(&self) -> DependencyResult<Option<Arc<T::Service>>>
    where
        Self: Sized,
    {
        match self.inject::<T>() {
            Ok(service) => Ok(Some(service)),
            Err(DependencyError::UnresolvedToken { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// 将类型擦除的服务还原为令牌的服务类型
pub fn downcast_service<T: Token>(erased: ErasedService) -> DependencyResult<Arc<T::Service>> {
    erased
        .downcast_ref::<Arc<T::Service>>()
        .cloned()
        .ok_or_else(|| DependencyError::TokenTypeMismatch {
            token: T::key().name().to_string(),
        })
}
