//! 作用域游标
//!
//! 以帧栈模拟宿主的子树：进入子树压入一帧并继承外层的当前作用域，
//! `provide` 只替换栈顶帧的作用域，退出子树时弹出该帧并执行其拆卸回调。

use crate::node::Scope;
use di_abstractions::{ScopeStack, TeardownRegistry};
use infrastructure_common::{LifecycleError, TeardownHook, TeardownHooks, TeardownReport};
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

struct Frame {
    id: Uuid,
    name: String,
    scope: Scope,
    hooks: TeardownHooks,
}

/// 作用域游标
///
/// 表示一个执行分支上的“当前位置”。多线程宿主应当为每个分支使用独立的游标，
/// 或直接传递 [`Scope`] 句柄。
pub struct ScopeCursor {
    root_name: String,
    frames: Mutex<Vec<Frame>>,
}

impl ScopeCursor {
    /// 创建游标，根作用域在首次使用时创建
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            frames: Mutex::new(Vec::new()),
        }
    }

    /// 以给定作用域为起点创建游标
    pub fn starting_at(scope: Scope) -> Self {
        let cursor = Self::new(scope.name().to_string());
        cursor.frames.lock().push(Frame {
            id: Uuid::new_v4(),
            name: scope.name().to_string(),
            scope,
            hooks: TeardownHooks::new(),
        });
        cursor
    }

    /// 进入子树，返回的守卫在释放时退出子树
    pub fn enter(&self, name: impl Into<String>) -> SubtreeGuard<'_> {
        let name = name.into();
        let frame = self.enter_frame(name.clone());
        SubtreeGuard {
            cursor: self,
            frame,
            name,
        }
    }

    /// 当前子树嵌套深度，根帧为 1
    pub fn depth(&self) -> usize {
        self.frames.lock().len()
    }

    /// 压入新帧，返回帧标识
    pub(crate) fn enter_frame(&self, name: String) -> Uuid {
        let mut frames = self.frames.lock();
        let scope = self.top_scope(&mut frames);
        debug!("进入子树: {} (作用域 {})", name, scope.name());
        let id = Uuid::new_v4();
        frames.push(Frame {
            id,
            name,
            scope,
            hooks: TeardownHooks::new(),
        });
        id
    }

    /// 弹出该帧及其内层帧，依次执行被弹出帧的拆卸回调
    ///
    /// 帧已被外层退出连带弹出时返回 [`LifecycleError::UnbalancedExit`]，不影响现存帧。
    pub(crate) fn exit_frame(&self, id: Uuid) -> Result<TeardownReport, LifecycleError> {
        let popped: Vec<Frame> = {
            let mut frames = self.frames.lock();
            let Some(position) = frames.iter().position(|frame| frame.id == id) else {
                return Err(LifecycleError::UnbalancedExit {
                    scope: format!("frame {}", id),
                });
            };
            frames.drain(position..).collect()
        };

        if popped.len() > 1 {
            warn!(
                "子树未按嵌套顺序退出，连带退出 {} 层: {}",
                popped.len() - 1,
                popped[0].name
            );
        }

        // 回调在锁外执行，回调内部可以继续使用游标
        Ok(teardown(popped))
    }

    fn top_scope(&self, frames: &mut Vec<Frame>) -> Scope {
        if let Some(frame) = frames.last() {
            return frame.scope.clone();
        }

        let root = Scope::root(self.root_name.clone());
        debug!("惰性创建根作用域: {}", root.name());
        frames.push(Frame {
            id: Uuid::new_v4(),
            name: self.root_name.clone(),
            scope: root.clone(),
            hooks: TeardownHooks::new(),
        });
        root
    }
}

/// 由内向外执行帧的拆卸回调
fn teardown(frames: Vec<Frame>) -> TeardownReport {
    let mut report = TeardownReport::default();
    for frame in frames.into_iter().rev() {
        debug!("退出子树: {}", frame.name);
        report.merge(frame.hooks.run(&frame.name));
    }
    report
}

impl Drop for ScopeCursor {
    fn drop(&mut self) {
        let frames = std::mem::take(self.frames.get_mut());
        if !frames.is_empty() {
            debug!("游标释放，拆卸剩余 {} 层子树", frames.len());
            teardown(frames);
        }
    }
}

impl Default for ScopeCursor {
    fn default() -> Self {
        Self::new("root")
    }
}

impl ScopeStack for ScopeCursor {
    type Node = Scope;

    fn current(&self) -> Scope {
        let mut frames = self.frames.lock();
        self.top_scope(&mut frames)
    }

    fn publish(&self, node: Scope) {
        let mut frames = self.frames.lock();
        self.top_scope(&mut frames);
        if let Some(frame) = frames.last_mut() {
            frame.scope = node;
        }
    }
}

impl TeardownRegistry for ScopeCursor {
    fn on_teardown(&self, hook: TeardownHook) {
        let mut frames = self.frames.lock();
        self.top_scope(&mut frames);
        if let Some(frame) = frames.last_mut() {
            frame.hooks.push(hook);
        }
    }
}

impl fmt::Debug for ScopeCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frames = self.frames.lock();
        f.debug_struct("ScopeCursor")
            .field("root_name", &self.root_name)
            .field(
                "frames",
                &frames.iter().map(|frame| frame.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// 子树守卫
///
/// 释放时弹出对应帧，恢复外层的当前作用域并执行拆卸回调。
#[must_use = "守卫释放时立即退出子树"]
pub struct SubtreeGuard<'a> {
    cursor: &'a ScopeCursor,
    frame: Uuid,
    name: String,
}

impl SubtreeGuard<'_> {
    /// 子树名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for SubtreeGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cursor.exit_frame(self.frame) {
            warn!("退出子树失败 [{}]: {}", self.name, e);
        }
    }
}
