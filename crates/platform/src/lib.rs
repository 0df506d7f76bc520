use std::sync::{Arc, OnceLock};

use winstate_core::config::TrackerConfig;
use winstate_core::WindowState;

pub mod fallback;
pub mod registry;
pub mod subclass;
pub mod window;

#[cfg(target_os = "windows")]
pub mod windows;

pub use registry::HookRegistry;
pub use window::TrackedWindow;

/// 原生窗口句柄（HWND 的数值），非拥有的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeHandle(pub isize);

impl NativeHandle {
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// 窗口过程的地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WndProc(pub isize);

/// 窗口状态跟踪 trait
pub trait WindowTracker: Send + Sync {
    /// 获取窗口当前的几何与呈现状态（尽力而为）
    fn get_window_state(&self, window: &Arc<TrackedWindow>) -> WindowState;

    /// 设置窗口位置
    fn set_window_position(&self, window: &Arc<TrackedWindow>, x: i32, y: i32);

    /// 设置窗口尺寸，非正的维度被忽略
    fn set_window_size(&self, window: &Arc<TrackedWindow>, width: i32, height: i32);

    /// 安装消息钩子（幂等）
    fn ensure_window_hook(&self, window: &Arc<TrackedWindow>);

    /// 卸载消息钩子（幂等）
    fn remove_window_hook(&self, window: &Arc<TrackedWindow>);
}

#[cfg(target_os = "windows")]
pub type PlatformTracker = subclass::SubclassTracker<crate::windows::Win32Api>;

#[cfg(not(target_os = "windows"))]
pub type PlatformTracker = fallback::CachedTracker;

// 平台工厂函数
#[cfg(target_os = "windows")]
pub fn create_tracker(config: &TrackerConfig) -> PlatformTracker {
    crate::windows::Win32Api::tracker().with_fullscreen_detection(config.detect_fullscreen)
}

#[cfg(not(target_os = "windows"))]
pub fn create_tracker(_config: &TrackerConfig) -> PlatformTracker {
    fallback::CachedTracker::new()
}

fn default_tracker() -> &'static PlatformTracker {
    static TRACKER: OnceLock<PlatformTracker> = OnceLock::new();
    TRACKER.get_or_init(|| create_tracker(&TrackerConfig::default()))
}

/// 获取窗口状态；`None` 时返回 Unknown
pub fn get_window_state(window: Option<&Arc<TrackedWindow>>) -> WindowState {
    window.map_or_else(WindowState::default, |w| default_tracker().get_window_state(w))
}

pub fn set_window_position(window: Option<&Arc<TrackedWindow>>, x: i32, y: i32) {
    if let Some(window) = window {
        default_tracker().set_window_position(window, x, y);
    }
}

pub fn set_window_size(window: Option<&Arc<TrackedWindow>>, width: i32, height: i32) {
    if let Some(window) = window {
        default_tracker().set_window_size(window, width, height);
    }
}

/// 宿主在窗口创建后调用
pub fn ensure_window_hook(window: Option<&Arc<TrackedWindow>>) {
    if let Some(window) = window {
        default_tracker().ensure_window_hook(window);
    }
}

/// 宿主在窗口销毁前调用
pub fn remove_window_hook(window: Option<&Arc<TrackedWindow>>) {
    if let Some(window) = window {
        default_tracker().remove_window_hook(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winstate_core::PresentationState;

    #[test]
    fn test_none_window_is_noop() {
        assert_eq!(get_window_state(None).state, PresentationState::Unknown);
        set_window_position(None, 1, 2);
        set_window_size(None, 3, 4);
        ensure_window_hook(None);
        remove_window_hook(None);
    }

    #[test]
    fn test_unrealized_window_through_free_functions() {
        let window = Arc::new(TrackedWindow::unrealized());
        set_window_position(Some(&window), 12, 34);
        set_window_size(Some(&window), 640, 0);

        let state = window.read_cached_state();
        assert_eq!((state.x, state.y, state.width, state.height), (12, 34, 640, 0));
        assert_eq!(state.state, PresentationState::Normal);
        assert!(!window.is_hooked());
    }

    #[test]
    fn test_null_handle() {
        assert!(NativeHandle::default().is_null());
        assert!(!NativeHandle(0x10).is_null());
    }
}
