//! 令牌注册表抽象接口

use infrastructure_common::{Implements, Token, TokenKey, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的服务实例，内部为 `Arc<T::Service>`
pub type ErasedService = Arc<dyn Any + Send + Sync>;

/// 类型擦除后的具体实例，内部为实现类型本身
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// 延迟构造器
///
/// 零参数构造实现类型，并上转为其令牌的服务类型。
#[derive(Clone)]
pub struct Constructor {
    implementation: TypeInfo,
    construct: fn() -> ErasedService,
}

impl Constructor {
    /// 实现类型信息
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 构造新实例
    ///
    /// 实现类型自身构造过程中的 panic 原样传播给调用方。
    pub fn construct(&self) -> ErasedService {
        (self.construct)()
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("implementation", &self.implementation.module_path)
            .field("construct", &"<function>")
            .finish()
    }
}

/// 组件注册信息
///
/// 一个实现类型最多对应一个令牌。
#[derive(Clone)]
pub struct Registration {
    /// 实现类型
    pub implementation: TypeInfo,
    /// 满足的令牌
    pub token: TokenKey,
    construct: fn() -> ErasedService,
    upcast: fn(ErasedInstance) -> Option<ErasedService>,
}

impl Registration {
    /// 以显式令牌注册实现类型
    pub fn new<I, T>() -> Self
    where
        T: Token,
        I: Implements<T> + Default,
    {
        Self {
            implementation: TypeInfo::of::<I>(),
            token: T::key(),
            construct: construct_erased::<I, T>,
            upcast: upcast_erased::<I, T>,
        }
    }

    /// 以自身为令牌注册实现类型
    pub fn of_self<I>() -> Self
    where
        I: Token + Implements<I> + Default,
    {
        Self::new::<I, I>()
    }

    /// 实现类型ID
    pub fn implementation_id(&self) -> TypeId {
        self.implementation.id
    }

    /// 该注册对应的延迟构造器
    pub fn constructor(&self) -> Constructor {
        Constructor {
            implementation: self.implementation.clone(),
            construct: self.construct,
        }
    }

    /// 将具体实例上转为令牌服务
    ///
    /// 实例类型与注册的实现类型不一致时返回 `None`。
    pub fn upcast(&self, instance: ErasedInstance) -> Option<ErasedService> {
        (self.upcast)(instance)
    }

    /// 是否与另一注册描述同一对（实现类型，令牌）
    pub fn same_binding(&self, other: &Self) -> bool {
        self.implementation.id == other.implementation.id && self.token == other.token
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("implementation", &self.implementation.module_path)
            .field("token", &self.token)
            .finish()
    }
}

fn construct_erased<I, T>() -> ErasedService
where
    T: Token,
    I: Implements<T> + Default,
{
    let service = <I as Implements<T>>::upcast(Arc::new(I::default()));
    Arc::new(service)
}

fn upcast_erased<I, T>(instance: ErasedInstance) -> Option<ErasedService>
where
    T: Token,
    I: Implements<T>,
{
    let concrete = instance.downcast::<I>().ok()?;
    let service = <I as Implements<T>>::upcast(concrete);
    Some(Arc::new(service))
}

/// 注册结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// 新注册
    Inserted,
    /// 相同的（实现类型，令牌）已存在，无变化
    Unchanged,
    /// 覆盖了该实现类型之前的令牌
    Replaced {
        /// 被覆盖的令牌
        previous: TokenKey,
    },
}

/// 令牌注册表 trait
///
/// 只追加或覆盖，不提供删除，也不感知作用域。
pub trait TokenRegistry: Send + Sync {
    /// 注册实现类型
    fn register(&self, registration: Registration) -> RegisterOutcome;

    /// 按实现类型查找注册信息
    fn lookup(&self, implementation: TypeId) -> Option<Registration>;

    /// 获取所有注册信息
    fn registrations(&self) -> Vec<Registration>;

    /// 检查实现类型是否已注册
    fn is_registered(&self, implementation: TypeId) -> bool {
        self.lookup(implementation).is_some()
    }

    /// 查询实现类型对应的令牌
    fn token_of(&self, implementation: TypeId) -> Option<TokenKey> {
        self.lookup(implementation).map(|registration| registration.token)
    }
}

/// 令牌注册表的泛型便捷方法
pub trait TokenRegistryExt: TokenRegistry {
    /// 以显式令牌注册实现类型
    fn register_as<I, T>(&self) -> RegisterOutcome
    where
        T: Token,
        I: Implements<T> + Default,
    {
        self.register(Registration::new::<I, T>())
    }

    /// 以自身为令牌注册实现类型
    fn register_self<I>(&self) -> RegisterOutcome
    where
        I: Token + Implements<I> + Default,
    {
        self.register(Registration::of_self::<I>())
    }

    /// 检查实现类型是否已注册
    fn is_type_registered<I: 'static>(&self) -> bool {
        self.is_registered(TypeId::of::<I>())
    }
}

impl<R: TokenRegistry + ?Sized> TokenRegistryExt for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::{implements, token};

    trait Sound: Send + Sync {
        fn sound(&self) -> &'static str;
    }

    token!(ISound => dyn Sound);

    #[derive(Default)]
    struct Bell;

    impl Sound for Bell {
        fn sound(&self) -> &'static str {
            "ding"
        }
    }

    implements!(Bell => ISound);

    #[test]
    fn test_constructor_produces_service() {
        let registration = Registration::new::<Bell, ISound>();
        let erased = registration.constructor().construct();
        let service = erased.downcast_ref::<Arc<dyn Sound>>().unwrap();
        assert_eq!(service.sound(), "ding");
    }

    #[test]
    fn test_upcast_checks_instance_type() {
        let registration = Registration::new::<Bell, ISound>();
        assert!(registration.upcast(Arc::new(Bell)).is_some());
        assert!(registration.upcast(Arc::new(42_u32)).is_none());
    }

    #[test]
    fn test_same_binding() {
        let a = Registration::new::<Bell, ISound>();
        let b = Registration::new::<Bell, ISound>();
        assert!(a.same_binding(&b));
        assert_eq!(a.token, ISound::key());
        assert_eq!(a.implementation_id(), TypeId::of::<Bell>());
    }
}
