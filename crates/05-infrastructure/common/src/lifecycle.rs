//! 组件生命周期管理
//!
//! 子树退出时执行的拆卸回调。回调中的错误和 panic 只记录日志，
//! 不会中断宿主的拆卸流程。

use crate::errors::{BoxError, LifecycleError};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// 拆卸回调
pub type TeardownHook = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

/// 拆卸回调执行结果
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// 成功执行的回调数量
    pub completed: usize,
    /// 返回错误或 panic 的回调
    pub failures: Vec<LifecycleError>,
}

impl TeardownReport {
    /// 失败的回调数量
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 合并另一个子树的结果
    pub fn merge(&mut self, other: TeardownReport) {
        self.completed += other.completed;
        self.failures.extend(other.failures);
    }
}

/// 一个子树上登记的拆卸回调
#[derive(Default)]
pub struct TeardownHooks {
    hooks: Vec<TeardownHook>,
}

impl TeardownHooks {
    /// 创建空的回调列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记回调
    pub fn push(&mut self, hook: TeardownHook) {
        self.hooks.push(hook);
    }

    /// 已登记回调数量
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// 是否没有回调
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// 按登记的逆序执行全部回调
    pub fn run(self, scope: &str) -> TeardownReport {
        let mut report = TeardownReport::default();
        if self.hooks.is_empty() {
            return report;
        }

        debug!("执行子树拆卸回调: {} ({} 个)", scope, self.hooks.len());
        for hook in self.hooks.into_iter().rev() {
            let message = match panic::catch_unwind(AssertUnwindSafe(hook)) {
                Ok(Ok(())) => {
                    report.completed += 1;
                    continue;
                }
                Ok(Err(e)) => e.to_string(),
                Err(payload) => format!("panic: {}", panic_message(&payload)),
            };

            let failure = LifecycleError::TeardownFailed {
                scope: scope.to_string(),
                message,
            };
            warn!("{}", failure);
            report.failures.push(failure);
        }
        report
    }
}

impl fmt::Debug for TeardownHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeardownHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// 从 panic 负载中提取可读信息
pub fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
