//! 线程局部的隐式作用域
//!
//! 每个线程持有一个基于进程级注册表的 [`Container`]，提供
//! `provide` / `inject` / `inject_new` 的隐式版本。能显式传递 [`Scope`] 时优先显式传递。
//! 线程退出时容器释放，尚未退出的子树依次拆卸。

use crate::container::Container;
use crate::node::Scope;
use crate::registry::global_registry;
use di_abstractions::{Provider, Resolver, TeardownRegistry};
use infrastructure_common::{ContainerConfig, DependencyResult, TeardownHook, Token};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

thread_local! {
    static CONTAINER: Container = Container::with_config(
        global_registry(),
        ContainerConfig::default().with_root_scope_name("ambient"),
    );
}

/// 在当前线程的当前位置提供绑定，新的子作用域成为当前作用域
pub fn provide(providers: impl IntoIterator<Item = Provider>) -> DependencyResult<Scope> {
    CONTAINER.with(|container| container.provide(providers))
}

/// 从当前作用域注入令牌对应的服务
pub fn inject<T: Token>() -> DependencyResult<Arc<T::Service>> {
    CONTAINER.with(|container| container.inject::<T>())
}

/// 从当前作用域注入令牌对应服务的全新实例
pub fn inject_new<T: Token>() -> DependencyResult<Arc<T::Service>> {
    CONTAINER.with(|container| container.inject_new::<T>())
}

/// 当前线程的当前作用域
pub fn current() -> Scope {
    CONTAINER.with(|container| container.current())
}

/// 登记当前子树退出时执行的回调
pub fn on_teardown(hook: TeardownHook) {
    CONTAINER.with(|container| container.on_teardown(hook));
}

/// 进入子树
pub fn enter(name: impl Into<String>) -> AmbientGuard {
    let name = name.into();
    let frame = CONTAINER.with(|container| container.stack().enter_frame(name.clone()));
    AmbientGuard {
        frame,
        name,
        _not_send: PhantomData,
    }
}

/// 在子树中执行闭包
pub fn within<R>(name: impl Into<String>, f: impl FnOnce() -> R) -> R {
    let _guard = enter(name);
    f()
}

/// 线程局部子树守卫
///
/// 只能在创建它的线程上释放。
#[must_use = "守卫释放时立即退出子树"]
pub struct AmbientGuard {
    frame: Uuid,
    name: String,
    _not_send: PhantomData<*const ()>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let result = CONTAINER.try_with(|container| container.stack().exit_frame(self.frame));
        if let Ok(Err(e)) = result {
            warn!("退出子树失败 [{}]: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::register_self;
    use di_abstractions::providers;
    use infrastructure_common::{implements, BoxError, DependencyError};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct Session;

    implements!(Session);

    #[test]
    fn test_provide_is_scoped_to_subtree() {
        register_self::<Session>();

        within("outer", || {
            assert!(matches!(
                inject::<Session>(),
                Err(DependencyError::UnresolvedToken { .. })
            ));

            within("inner", || {
                provide(providers![instance(Session)]).unwrap();
                let first = inject::<Session>().unwrap();
                let second = inject::<Session>().unwrap();
                assert!(Arc::ptr_eq(&first, &second));
            });

            assert!(inject::<Session>().is_err());
        });
    }

    #[test]
    fn test_teardown_on_subtree_exit() {
        static TORN_DOWN: AtomicBool = AtomicBool::new(false);

        {
            let _guard = enter("component");
            on_teardown(Box::new(|| -> Result<(), BoxError> {
                TORN_DOWN.store(true, Ordering::SeqCst);
                Ok(())
            }));
            assert!(!TORN_DOWN.load(Ordering::SeqCst));
        }
        assert!(TORN_DOWN.load(Ordering::SeqCst));
    }

    #[test]
    fn test_failed_provide_keeps_position() {
        #[derive(Default)]
        struct Unlisted;

        within("form", || {
            let before = current();
            let err = provide(providers![Unlisted]).unwrap_err();
            assert!(matches!(err, DependencyError::UnregisteredImplementation { .. }));
            assert!(current().ptr_eq(&before));
        });
    }

    #[test]
    fn test_thread_exit_runs_pending_teardown() {
        static THREAD_TORN_DOWN: AtomicBool = AtomicBool::new(false);

        std::thread::spawn(|| {
            on_teardown(Box::new(|| -> Result<(), BoxError> {
                THREAD_TORN_DOWN.store(true, Ordering::SeqCst);
                Ok(())
            }));
        })
        .join()
        .unwrap();
        assert!(THREAD_TORN_DOWN.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stale_guard_does_not_exit_newer_subtree() {
        static NEWER_TORN_DOWN: AtomicBool = AtomicBool::new(false);

        let outer = enter("outer");
        let inner = enter("inner");
        drop(outer);

        let newer = enter("newer");
        on_teardown(Box::new(|| -> Result<(), BoxError> {
            NEWER_TORN_DOWN.store(true, Ordering::SeqCst);
            Ok(())
        }));
        drop(inner);
        assert!(!NEWER_TORN_DOWN.load(Ordering::SeqCst));

        drop(newer);
        assert!(NEWER_TORN_DOWN.load(Ordering::SeqCst));
    }

    #[test]
    fn test_threads_do_not_share_position() {
        register_self::<Session>();
        let _guard = enter("main");
        provide(providers![Session]).unwrap();
        assert!(inject::<Session>().is_ok());

        let other = std::thread::spawn(|| inject::<Session>().is_ok())
            .join()
            .unwrap();
        assert!(!other);
    }
}
