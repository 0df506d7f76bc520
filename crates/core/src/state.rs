use parking_lot::Mutex;

use crate::WindowState;

/// 单个窗口最新已知状态的缓存
///
/// 显式调用和消息拦截都通过这里读写，锁只覆盖闭包本身。
#[derive(Debug, Default)]
pub struct StateCache {
    inner: Mutex<WindowState>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在独占锁内对缓存做一次读-改-写
    pub fn update<R>(&self, mutator: impl FnOnce(&mut WindowState) -> R) -> R {
        let mut state = self.inner.lock();
        mutator(&mut state)
    }

    /// 返回当前缓存的副本
    pub fn snapshot(&self) -> WindowState {
        *self.inner.lock()
    }
}
