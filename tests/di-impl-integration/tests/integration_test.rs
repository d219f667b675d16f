//! 分层容器端到端测试

use di_abstractions::{providers, Resolver, TokenRegistryExt};
use di_impl::{ambient, Container, InMemoryTokenRegistry, Scope};
use infrastructure_common::{implements, token, BoxError, DependencyError};
use reactive_store::{attach_store, State, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub trait Log: Send + Sync {
    fn log(&self, message: &str) -> String;
}

token!(pub ILogger => dyn Log);

#[derive(Default)]
struct Logger;

impl Log for Logger {
    fn log(&self, message: &str) -> String {
        format!("[app] {message}")
    }
}

implements!(Logger => ILogger);

struct TestLogger {
    lines: State<Vec<String>>,
}

impl Default for TestLogger {
    fn default() -> Self {
        Self {
            lines: State::new("lines", Vec::new()),
        }
    }
}

impl Log for TestLogger {
    fn log(&self, message: &str) -> String {
        self.lines.update(|lines| lines.push(message.to_string()));
        format!("[test] {message}")
    }
}

implements!(TestLogger => ILogger);

fn registry() -> Arc<InMemoryTokenRegistry> {
    let registry = InMemoryTokenRegistry::new();
    registry.register_as::<Logger, ILogger>();
    registry.register_as::<TestLogger, ILogger>();
    Arc::new(registry)
}

#[test]
fn test_child_override_and_sibling_fallback() -> anyhow::Result<()> {
    let container = Container::with_registry(registry());
    container.provide(providers![instance(Logger)])?;
    let root_logger = container.inject::<ILogger>()?;

    {
        let _child = container.enter("child");
        container.provide(providers![instance(TestLogger::default())])?;
        let logger = container.inject::<ILogger>()?;
        assert_eq!(logger.log("hello"), "[test] hello");
        assert!(!Arc::ptr_eq(&logger, &root_logger));
    }

    {
        let _sibling = container.enter("sibling");
        let logger = container.inject::<ILogger>()?;
        assert_eq!(logger.log("hello"), "[app] hello");
        assert!(Arc::ptr_eq(&logger, &root_logger));
    }
    Ok(())
}

#[test]
fn test_explicit_scope_handles() -> anyhow::Result<()> {
    let registry = registry();
    let root = Scope::root("root").provide(registry.as_ref(), providers![Logger])?;
    let child = root.provide(registry.as_ref(), providers![TestLogger])?;
    let sibling = root.provide(registry.as_ref(), Vec::new())?;

    assert_eq!(child.inject::<ILogger>()?.log("x"), "[test] x");
    assert_eq!(sibling.inject::<ILogger>()?.log("x"), "[app] x");
    assert!(Arc::ptr_eq(
        &sibling.inject::<ILogger>()?,
        &root.inject::<ILogger>()?
    ));
    Ok(())
}

#[test]
fn test_error_messages_name_the_type() {
    #[derive(Default)]
    struct Orphan;

    let container = Container::with_registry(registry());
    let err = container.provide(providers![Orphan]).unwrap_err();
    assert!(matches!(err, DependencyError::UnregisteredImplementation { .. }));
    assert!(err.to_string().contains("Orphan"));

    let err = container.inject::<ILogger>().err().unwrap();
    assert!(err.to_string().contains("ILogger"));
}

#[test]
fn test_ambient_scopes_follow_subtrees() {
    #[derive(Default)]
    struct Theme;

    implements!(Theme);

    di_impl::register_self::<Theme>();

    ambient::within("app", || {
        ambient::provide(providers![Theme]).unwrap();
        let app_theme = ambient::inject::<Theme>().unwrap();

        ambient::within("page", || {
            let page_theme = ambient::inject::<Theme>().unwrap();
            assert!(Arc::ptr_eq(&app_theme, &page_theme));

            let fresh = ambient::inject_new::<Theme>().unwrap();
            assert!(!Arc::ptr_eq(&app_theme, &fresh));
        });
    });

    assert!(matches!(
        ambient::inject::<Theme>(),
        Err(DependencyError::UnresolvedToken { .. })
    ));
}

static CLOSED: AtomicUsize = AtomicUsize::new(0);

#[derive(Default)]
struct Connection;

impl Store for Connection {
    fn destructor(&self) -> Result<(), BoxError> {
        CLOSED.fetch_add(1, Ordering::SeqCst);
        Err("already closed".into())
    }
}

implements!(Connection);

#[test]
fn test_store_destructor_failure_does_not_escape_teardown() {
    let registry = InMemoryTokenRegistry::new();
    registry.register_self::<Connection>();
    let container = Container::with_registry(Arc::new(registry));

    {
        let _outer = container.enter("outer");
        container.provide(providers![Connection]).unwrap();
        {
            let _inner = container.enter("inner");
            let connection = container.inject::<Connection>().unwrap();
            attach_store(&container, connection);
        }
        assert_eq!(CLOSED.load(Ordering::SeqCst), 1);
        assert!(container.inject::<Connection>().is_ok());
    }
    assert_eq!(CLOSED.load(Ordering::SeqCst), 1);
}
