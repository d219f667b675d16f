//! 可注入宏与进程级注册表的集成测试

use component_macros::{injectable, Token};
use di_abstractions::{providers, Resolver, TokenRegistry, TokenRegistryExt};
use di_impl::{global_registry, Container};
use infrastructure_common::Token;
use std::any::TypeId;
use std::sync::Arc;

pub trait Notify: Send + Sync {
    fn channel(&self) -> &'static str;
}

#[derive(Token)]
#[token(service = dyn Notify)]
pub struct INotifier;

#[derive(Default)]
#[injectable(INotifier)]
pub struct EmailNotifier;

impl Notify for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }
}

#[derive(Default)]
#[injectable(INotifier)]
pub struct SmsNotifier;

impl Notify for SmsNotifier {
    fn channel(&self) -> &'static str {
        "sms"
    }
}

#[derive(Default)]
#[injectable]
pub struct Outbox;

#[test]
fn test_every_injectable_is_registered_once() {
    let registry = global_registry();
    for id in [
        TypeId::of::<EmailNotifier>(),
        TypeId::of::<SmsNotifier>(),
    ] {
        assert_eq!(registry.token_of(id), Some(INotifier::key()));
    }
    assert_eq!(registry.token_of(TypeId::of::<Outbox>()), Some(Outbox::key()));
    assert!(registry.is_type_registered::<Outbox>());
}

#[test]
fn test_nested_provide_overrides_token() {
    let container = Container::new();
    container.provide(providers![EmailNotifier, Outbox]).unwrap();
    assert_eq!(container.inject::<INotifier>().unwrap().channel(), "email");

    {
        let _guard = container.enter("sms-only");
        container.provide(providers![SmsNotifier]).unwrap();
        assert_eq!(container.inject::<INotifier>().unwrap().channel(), "sms");

        let outer = container.inject::<Outbox>().unwrap();
        let again = container.inject::<Outbox>().unwrap();
        assert!(Arc::ptr_eq(&outer, &again));
    }

    assert_eq!(container.inject::<INotifier>().unwrap().channel(), "email");
}
