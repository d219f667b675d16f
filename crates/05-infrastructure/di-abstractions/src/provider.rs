//! 可提供项

use crate::registry::ErasedInstance;
use infrastructure_common::TypeInfo;
use std::fmt;
use std::sync::Arc;

/// 可提供项
///
/// 传给 `provide` 的单个项：延迟构造的实现类型，或调用方给出的现成实例。
#[derive(Clone)]
pub enum Provider {
    /// 首次解析时才构造的实现类型
    Constructor(TypeInfo),
    /// 现成实例
    Instance {
        /// 实例的实现类型
        implementation: TypeInfo,
        /// 实例本身
        value: ErasedInstance,
    },
}

impl Provider {
    /// 提供实现类型的构造器
    pub fn constructor<I: Send + Sync + 'static>() -> Self {
        Self::Constructor(TypeInfo::of::<I>())
    }

    /// 提供现成实例
    pub fn instance<I: Send + Sync + 'static>(value: I) -> Self {
        Self::shared(Arc::new(value))
    }

    /// 提供调用方持有的共享实例，解析结果与其指向同一对象
    pub fn shared<I: Send + Sync + 'static>(value: Arc<I>) -> Self {
        Self::Instance {
            implementation: TypeInfo::of::<I>(),
            value,
        }
    }

    /// 实现类型信息
    pub fn implementation(&self) -> &TypeInfo {
        match self {
            Self::Constructor(implementation) => implementation,
            Self::Instance { implementation, .. } => implementation,
        }
    }

    /// 是否为延迟构造器
    pub fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor(_))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor(implementation) => f
                .debug_tuple("Constructor")
                .field(&implementation.module_path)
                .finish(),
            Self::Instance { implementation, .. } => f
                .debug_struct("Instance")
                .field("implementation", &implementation.module_path)
                .finish_non_exhaustive(),
        }
    }
}

/// 构造可提供项列表
///
/// 类型名表示构造器，`instance(expr)` / `shared(expr)` 表示实例：
///
/// ```rust
/// use di_abstractions::{providers, Provider};
///
/// #[derive(Default)]
/// struct Clock;
///
/// let items: Vec<Provider> = providers![Clock, instance(Clock)];
/// assert!(items[0].is_constructor());
/// assert!(!items[1].is_constructor());
/// ```
#[macro_export]
macro_rules! providers {
    (@item instance($value:expr)) => {
        $crate::Provider::instance($value)
    };
    (@item shared($value:expr)) => {
        $crate::Provider::shared($value)
    };
    (@item $implementation:ty) => {
        $crate::Provider::constructor::<$implementation>()
    };
    ($($head:tt $(($($args:tt)*))?),* $(,)?) => {
        ::std::vec![$($crate::providers!(@item $head $(($($args)*))?)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Widget;

    #[test]
    fn test_provider_kinds() {
        let constructor = Provider::constructor::<Widget>();
        assert!(constructor.is_constructor());
        assert_eq!(constructor.implementation().short_name(), "Widget");

        let instance = Provider::instance(Widget);
        assert!(!instance.is_constructor());
        assert_eq!(instance.implementation(), constructor.implementation());
    }

    #[test]
    fn test_shared_keeps_identity() {
        let widget = Arc::new(Widget);
        let Provider::Instance { value, .. } = Provider::shared(widget.clone()) else {
            panic!("expected instance provider");
        };
        let concrete = value.downcast::<Widget>().unwrap();
        assert!(Arc::ptr_eq(&concrete, &widget));
    }

    #[test]
    fn test_providers_macro() {
        let items = providers![Widget, instance(Widget), shared(Arc::new(Widget))];
        assert_eq!(items.len(), 3);
        assert!(items[0].is_constructor());
        assert!(!items[1].is_constructor());
        assert!(!items[2].is_constructor());
    }
}
