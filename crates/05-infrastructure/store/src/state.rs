//! 可观察的状态字段

use parking_lot::RwLock;
use std::fmt;
use tracing::debug;

type Render<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

struct Inspector<T> {
    owner: String,
    render: Render<T>,
}

/// 状态字段
///
/// 被观察的字段在创建时记录 `(init)`，此后每次写入记录 `(update)`。
pub struct State<T> {
    field: &'static str,
    value: RwLock<T>,
    inspector: Option<Inspector<T>>,
}

impl<T> State<T> {
    /// 创建不记录日志的状态字段
    pub fn new(field: &'static str, initial: T) -> Self {
        Self {
            field,
            value: RwLock::new(initial),
            inspector: None,
        }
    }

    /// 字段名
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// 是否记录读写日志
    pub fn is_inspected(&self) -> bool {
        self.inspector.is_some()
    }

    /// 以只读引用访问当前值
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    /// 替换当前值，返回旧值
    pub fn set(&self, value: T) -> T {
        let old = std::mem::replace(&mut *self.value.write(), value);
        self.observe("update");
        old
    }

    /// 原地修改当前值
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.write());
        self.observe("update");
        result
    }

    fn observe(&self, phase: &str) {
        if let Some(inspector) = &self.inspector {
            let rendered = (inspector.render)(&self.value.read());
            debug!(store = %inspector.owner, "{} ({}): {}", self.field, phase, rendered);
        }
    }
}

impl<T: fmt::Debug + 'static> State<T> {
    /// 创建被观察的状态字段，立即记录初始值
    pub fn inspected(owner: impl Into<String>, field: &'static str, initial: T) -> Self {
        let state = Self {
            field,
            value: RwLock::new(initial),
            inspector: Some(Inspector {
                owner: owner.into(),
                render: Box::new(|value: &T| format!("{:?}", value)),
            }),
        };
        state.observe("init");
        state
    }
}

impl<T: Clone> State<T> {
    /// 当前值的副本
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("field", &self.field)
            .field("value", &*self.value.read())
            .field("inspected", &self.is_inspected())
            .finish()
    }
}
