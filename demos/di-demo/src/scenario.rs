//! 演示场景

use crate::services::{ConsoleErrorReporter, Counter, IErrorReporter, ILogger, Logger, TestLogger};
use anyhow::ensure;
use di_abstractions::{providers, Resolver};
use di_impl::Container;
use reactive_store::attach_store;
use tracing::info;

/// 根作用域提供 `Logger`，子作用域以 `TestLogger` 覆盖，兄弟作用域仍看到根实例
pub fn run_logger_override(container: &Container) -> anyhow::Result<()> {
    info!("== 子作用域覆盖 ==");
    container.provide(providers![instance(Logger::default())])?;
    let root_logger = container.inject::<ILogger>()?;
    root_logger.log("根作用域已提供 Logger");

    {
        let _child = container.enter("child");
        container.provide(providers![TestLogger])?;
        let logger = container.inject::<ILogger>()?;
        logger.log("来自子作用域");
        ensure!(logger.kind() == "TestLogger", "子作用域应当解析到 TestLogger");
        info!("child 解析到 {}#{}", logger.kind(), logger.instance());
    }

    {
        let _sibling = container.enter("sibling");
        let logger = container.inject::<ILogger>()?;
        ensure!(logger.kind() == "Logger", "兄弟作用域应当解析到根作用域的 Logger");
        ensure!(
            logger.instance() == root_logger.instance(),
            "兄弟作用域应当共享根作用域的实例"
        );
        info!("sibling 解析到 {}#{}", logger.kind(), logger.instance());
    }
    Ok(())
}

/// 存储挂在子树上，子树退出时执行析构
pub fn run_counter_store(container: &Container) -> anyhow::Result<()> {
    info!("== 存储生命周期 ==");
    let _view = container.enter("counter-view");
    container.provide(providers![Counter])?;

    let counter = container.inject::<Counter>()?;
    attach_store(container, counter.clone());

    counter.increment().map_err(|e| anyhow::anyhow!(e))?;
    counter.increment().map_err(|e| anyhow::anyhow!(e))?;
    counter.decrement();
    counter.decrement();
    if counter.decrement().is_none() {
        let reporter = container.inject::<IErrorReporter>();
        match reporter {
            Ok(reporter) => reporter.report(&"计数器已为零"),
            Err(e) => info!("未提供错误上报: {}", e),
        }
    }
    ensure!(counter.count() == 0, "计数应当回到零");
    Ok(())
}

/// `inject` 共享实例，`inject_new` 每次构造新实例
pub fn run_fresh_instances(container: &Container) -> anyhow::Result<()> {
    info!("== 独立实例 ==");
    let _scope = container.enter("reporters");
    container.provide(providers![ConsoleErrorReporter])?;

    let shared_a = container.inject::<IErrorReporter>()?;
    let shared_b = container.inject::<IErrorReporter>()?;
    let fresh = container.inject_new::<IErrorReporter>()?;
    ensure!(shared_a.instance() == shared_b.instance(), "inject 应当返回缓存实例");
    ensure!(fresh.instance() != shared_a.instance(), "inject_new 应当返回新实例");

    shared_a.report(&format!(
        "共享实例 #{}，新实例 #{}",
        shared_a.instance(),
        fresh.instance()
    ));
    Ok(())
}
