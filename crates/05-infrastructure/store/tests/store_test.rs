//! 存储与容器子树拆卸的集成测试

use di_abstractions::{providers, Resolver, TokenRegistryExt};
use di_impl::{Container, InMemoryTokenRegistry};
use infrastructure_common::{implements, BoxError};
use reactive_store::{attach_store, guard, inspect, State, Store};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

static DISPOSED: AtomicBool = AtomicBool::new(false);

/// 计数器存储
struct Counter {
    count: State<i64>,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            count: State::inspected("Counter", "count", 0),
        }
    }
}

impl Counter {
    fn increment(&self) -> Result<i64, BoxError> {
        inspect(self, "increment", || -> Result<i64, BoxError> {
            Ok(self.count.update(|count| {
                *count += 1;
                *count
            }))
        })
    }

    fn decrement_below_zero(&self) -> Option<i64> {
        guard(self, "decrement", || -> Result<i64, BoxError> {
            if self.count.get() == 0 {
                return Err("count is already zero".into());
            }
            Ok(self.count.update(|count| {
                *count -= 1;
                *count
            }))
        })
    }
}

impl Store for Counter {
    fn destructor(&self) -> Result<(), BoxError> {
        DISPOSED.store(true, Ordering::SeqCst);
        Ok(())
    }
}

implements!(Counter);

#[test]
fn test_store_lives_for_subtree() {
    let registry = InMemoryTokenRegistry::new();
    registry.register_self::<Counter>();
    let container = Container::with_registry(Arc::new(registry));

    {
        let _guard = container.enter("counter-view");
        container.provide(providers![Counter]).unwrap();

        let counter = container.inject::<Counter>().unwrap();
        attach_store(&container, counter.clone());

        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment().unwrap(), 2);
        assert_eq!(counter.decrement_below_zero(), Some(1));
        assert_eq!(counter.decrement_below_zero(), Some(0));
        assert_eq!(counter.decrement_below_zero(), None);
        assert!(!DISPOSED.load(Ordering::SeqCst));
    }

    assert!(DISPOSED.load(Ordering::SeqCst));
}
