//! 存储方法调用的记录与保护

use crate::store::Store;
use infrastructure_common::panic_message;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// 记录一次存储方法调用
///
/// 调用前记录方法名，成功时记录结果。失败（错误或 panic）记录后原样向上传递。
pub fn inspect<S, R, E, F>(owner: &S, name: &str, f: F) -> Result<R, E>
where
    S: Store + ?Sized,
    R: fmt::Debug,
    E: fmt::Display,
    F: FnOnce() -> Result<R, E>,
{
    let store = owner.name();
    debug!(store = %store, "calling {}()", name);

    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => {
            debug!(store = %store, "result of {}(): {:?}", name, value);
            Ok(value)
        }
        Ok(Err(e)) => {
            error!(store = %store, "Uncaught exception in {}(): {}", name, e);
            Err(e)
        }
        Err(payload) => {
            error!(
                store = %store,
                "Uncaught exception in {}(): {}",
                name,
                panic_message(&payload)
            );
            panic::resume_unwind(payload)
        }
    }
}

/// 保护一次存储方法调用
///
/// 失败（错误或 panic）只记录日志并返回 `None`。
pub fn guard<S, R, E, F>(owner: &S, name: &str, f: F) -> Option<R>
where
    S: Store + ?Sized,
    E: fmt::Display,
    F: FnOnce() -> Result<R, E>,
{
    let failure = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(&payload),
    };

    error!(
        store = %owner.name(),
        "(guard) Uncaught exception in {}(): {}",
        name,
        failure
    );
    None
}
