use std::sync::Arc;

use winstate_core::WindowState;

use crate::window::TrackedWindow;
use crate::WindowTracker;

/// 没有原生钩子的平台上的实现
///
/// 无法向 OS 查询几何，`get_window_state` 总是返回 Unknown；setter 只写缓存，
/// 宿主可以通过 [`TrackedWindow::read_cached_state`] 读取。钩子的安装与卸载都是空操作。
#[derive(Debug, Default)]
pub struct CachedTracker;

impl CachedTracker {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTracker for CachedTracker {
    fn get_window_state(&self, _window: &Arc<TrackedWindow>) -> WindowState {
        WindowState::default()
    }

    fn set_window_position(&self, window: &Arc<TrackedWindow>, x: i32, y: i32) {
        window.update_cached_state(|state| state.set_position(x, y));
    }

    fn set_window_size(&self, window: &Arc<TrackedWindow>, width: i32, height: i32) {
        window.update_cached_state(|state| state.set_size(width, height));
    }

    fn ensure_window_hook(&self, _window: &Arc<TrackedWindow>) {}

    fn remove_window_hook(&self, _window: &Arc<TrackedWindow>) {}
}
