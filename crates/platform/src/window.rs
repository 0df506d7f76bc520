use parking_lot::Mutex;
use winstate_core::state::StateCache;
use winstate_core::WindowState;

use crate::{NativeHandle, WndProc};

type HandleSource = Box<dyn Fn() -> Option<NativeHandle> + Send + Sync>;

/// 钩子生命周期字段，由独立于状态锁的 `hook` 锁保护
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HookSlot {
    pub(crate) installed: bool,
    pub(crate) hwnd: Option<NativeHandle>,
    pub(crate) original: Option<WndProc>,
}

/// 宿主持有的窗口对象
///
/// 生命周期由宿主决定；本 crate 只在上面挂载状态缓存和钩子信息。
/// 注册表只保存它的 `Weak` 引用。
pub struct TrackedWindow {
    handle_source: HandleSource,
    state: StateCache,
    pub(crate) hook: Mutex<HookSlot>,
}

impl TrackedWindow {
    /// `source` 在窗口尚未创建时返回 `None`
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> Option<NativeHandle> + Send + Sync + 'static,
    {
        Self {
            handle_source: Box::new(source),
            state: StateCache::new(),
            hook: Mutex::new(HookSlot::default()),
        }
    }

    /// 已经拿到原生句柄的窗口
    pub fn with_handle(handle: NativeHandle) -> Self {
        Self::new(move || Some(handle))
    }

    /// 还没有原生句柄的窗口，所有平台调用都会退化为空操作
    pub fn unrealized() -> Self {
        Self::new(|| None)
    }

    pub fn native_handle(&self) -> Option<NativeHandle> {
        (self.handle_source)().filter(|handle| !handle.is_null())
    }

    /// 在状态锁内执行一次读-改-写
    pub fn update_cached_state<R>(&self, mutator: impl FnOnce(&mut WindowState) -> R) -> R {
        self.state.update(mutator)
    }

    pub fn read_cached_state(&self) -> WindowState {
        self.state.snapshot()
    }

    pub fn is_hooked(&self) -> bool {
        self.hook.lock().installed
    }

    /// 已保存的原始窗口过程
    pub fn original_window_proc(&self) -> Option<WndProc> {
        self.hook.lock().original
    }
}

impl std::fmt::Debug for TrackedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedWindow")
            .field("state", &self.read_cached_state())
            .field("hook", &*self.hook.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicIsize, Ordering};
    use std::sync::Arc;
    use winstate_core::PresentationState;

    #[test]
    fn test_handle_source_is_queried_lazily() {
        let raw = Arc::new(AtomicIsize::new(0));
        let source = raw.clone();
        let window = TrackedWindow::new(move || Some(NativeHandle(source.load(Ordering::SeqCst))));

        // 0 视为未创建
        assert_eq!(window.native_handle(), None);
        raw.store(0x1234, Ordering::SeqCst);
        assert_eq!(window.native_handle(), Some(NativeHandle(0x1234)));
    }

    #[test]
    fn test_new_window_state() {
        let window = TrackedWindow::unrealized();
        assert_eq!(window.read_cached_state().state, PresentationState::Unknown);
        assert!(!window.is_hooked());
        assert_eq!(window.original_window_proc(), None);

        window.update_cached_state(|state| state.set_position(1, 2));
        assert_eq!(window.read_cached_state().state, PresentationState::Normal);
    }
}
