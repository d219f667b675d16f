//! 存储基础 trait

use di_abstractions::TeardownRegistry;
use infrastructure_common::{panic_message, short_type_name, BoxError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// 状态存储
///
/// 名称用作日志中的存储标识，默认取类型短名。
pub trait Store: Send + Sync + 'static {
    /// 存储名称
    fn name(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }

    /// 子树退出时执行的析构回调
    fn destructor(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// 将存储的析构回调登记到当前子树
///
/// 析构失败（返回错误或 panic）只记录警告，不影响其他回调。
pub fn attach_store<S, R>(registry: &R, store: Arc<S>)
where
    S: Store,
    R: TeardownRegistry + ?Sized,
{
    debug!(store = %store.name(), "登记存储析构回调");
    registry.on_teardown(Box::new(move || -> Result<(), BoxError> {
        run_destructor(store.as_ref());
        Ok(())
    }));
}

fn run_destructor<S: Store + ?Sized>(store: &S) {
    let name = store.name();
    match panic::catch_unwind(AssertUnwindSafe(|| store.destructor())) {
        Ok(Ok(())) => debug!(store = %name, "析构完成"),
        Ok(Err(e)) => warn!(store = %name, "UNCAUGHT ERROR IN DESTRUCTOR: {}", e),
        Err(payload) => warn!(
            store = %name,
            "UNCAUGHT ERROR IN DESTRUCTOR: {}",
            panic_message(&payload)
        ),
    }
}
