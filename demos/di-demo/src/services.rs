//! 演示用令牌与实现类型

use component_macros::{injectable, Token};
use infrastructure_common::BoxError;
use reactive_store::{guard, inspect, State, Store};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{error, info};

static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(1);

fn next_instance() -> usize {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// 日志服务契约
pub trait Log: Send + Sync {
    /// 输出一条日志
    fn log(&self, message: &str);

    /// 实现名称
    fn kind(&self) -> &'static str;

    /// 实例编号，用于观察实例是否共享
    fn instance(&self) -> usize;
}

/// 日志令牌
#[derive(Token)]
#[token(service = dyn Log)]
pub struct ILogger;

/// 应用日志
#[derive(Debug)]
#[injectable(ILogger)]
pub struct Logger {
    instance: usize,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            instance: next_instance(),
        }
    }
}

impl Log for Logger {
    fn log(&self, message: &str) {
        info!("[Logger#{}] {}", self.instance, message);
    }

    fn kind(&self) -> &'static str {
        "Logger"
    }

    fn instance(&self) -> usize {
        self.instance
    }
}

/// 测试替身日志，记录在内存中
#[derive(Debug)]
#[injectable(ILogger)]
pub struct TestLogger {
    instance: usize,
    lines: State<Vec<String>>,
}

impl Default for TestLogger {
    fn default() -> Self {
        Self {
            instance: next_instance(),
            lines: State::new("lines", Vec::new()),
        }
    }
}

impl Log for TestLogger {
    fn log(&self, message: &str) {
        self.lines.update(|lines| lines.push(message.to_string()));
    }

    fn kind(&self) -> &'static str {
        "TestLogger"
    }

    fn instance(&self) -> usize {
        self.instance
    }
}

/// 错误上报契约
pub trait Report: Send + Sync {
    /// 上报一个错误
    fn report(&self, error: &dyn fmt::Display);

    /// 实例编号
    fn instance(&self) -> usize;
}

/// 错误上报令牌
#[derive(Token)]
#[token(service = dyn Report)]
pub struct IErrorReporter;

/// 输出到日志的错误上报
#[derive(Debug)]
#[injectable(IErrorReporter)]
pub struct ConsoleErrorReporter {
    instance: usize,
}

impl Default for ConsoleErrorReporter {
    fn default() -> Self {
        Self {
            instance: next_instance(),
        }
    }
}

impl Report for ConsoleErrorReporter {
    fn report(&self, error: &dyn fmt::Display) {
        error!("[ErrorReporter#{}] {}", self.instance, error);
    }

    fn instance(&self) -> usize {
        self.instance
    }
}

/// 计数器存储
#[derive(Debug)]
#[injectable]
pub struct Counter {
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
    /// 当前计数
    pub fn count(&self) -> i64 {
        self.count.get()
    }

    /// 计数加一
    pub fn increment(&self) -> Result<i64, BoxError> {
        inspect(self, "increment", || -> Result<i64, BoxError> {
            Ok(self.count.update(|count| {
                *count += 1;
                *count
            }))
        })
    }

    /// 计数为零时失败，失败被记录后吞掉
    pub fn decrement(&self) -> Option<i64> {
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
        info!("Counter 析构，最终计数 {}", self.count());
        Ok(())
    }
}
