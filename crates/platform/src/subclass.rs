//! 窗口子类化：替换窗口过程、拦截消息、维护状态缓存
//!
//! 所有 OS 原语都经过 [`NativeApi`]，Windows 上由 `Win32Api` 实现，
//! 测试中由记录调用的假实现代替。
//!
//! 锁顺序固定为 钩子锁 → 注册表锁。窗口过程在调用任何转发或卸载之前
//! 已经释放了注册表读锁，因此在 WM_DESTROY 中自我卸载不会死锁。

use anyhow::Result;
use std::sync::Arc;

use winstate_core::message::{WindowMessage, WindowPos};
use winstate_core::monitor::{self, MonitorInfo};
use winstate_core::{PresentationState, Rect, WindowState};

use crate::registry::HookRegistry;
use crate::window::{HookSlot, TrackedWindow};
use crate::{NativeHandle, WindowTracker, WndProc};

/// 子类化所需的 OS 原语
pub trait NativeApi: Send + Sync {
    /// 拦截用窗口过程的地址
    fn trampoline(&self) -> WndProc;

    /// 替换窗口过程，返回之前的窗口过程
    fn swap_window_proc(&self, hwnd: NativeHandle, new_proc: WndProc) -> Result<Option<WndProc>>;

    fn call_window_proc(
        &self,
        original: WndProc,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize;

    fn default_window_proc(
        &self,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize;

    /// 把 WM_WINDOWPOSCHANGED 的 lparam 解释为 WINDOWPOS
    ///
    /// # Safety
    /// `lparam` 必须是指向有效 WINDOWPOS 的指针。
    unsafe fn read_window_pos(&self, lparam: isize) -> Option<WindowPos>;

    fn window_rect(&self, hwnd: NativeHandle) -> Option<Rect>;

    /// WINDOWPLACEMENT.showCmd
    fn show_command(&self, hwnd: NativeHandle) -> Option<u32>;

    /// GWL_STYLE，失败时为 0
    fn window_style(&self, hwnd: NativeHandle) -> u32;

    fn nearest_monitor(&self, hwnd: NativeHandle) -> Option<MonitorInfo>;

    fn move_window(&self, hwnd: NativeHandle, x: i32, y: i32) -> Result<()>;

    fn resize_window(&self, hwnd: NativeHandle, width: i32, height: i32) -> Result<()>;
}

/// 支持原生钩子的实现
pub struct SubclassTracker<A: NativeApi> {
    api: A,
    registry: Arc<HookRegistry>,
    detect_fullscreen: bool,
}

impl<A: NativeApi> SubclassTracker<A> {
    pub fn new(api: A, registry: Arc<HookRegistry>) -> Self {
        Self {
            api,
            registry,
            detect_fullscreen: true,
        }
    }

    pub fn with_fullscreen_detection(mut self, enabled: bool) -> Self {
        self.detect_fullscreen = enabled;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// 窗口过程主体：OS 投递给已挂钩窗口的每条消息都经过这里
    ///
    /// 先更新缓存再转发；WM_DESTROY/WM_NCDESTROY 先转发再卸载。
    /// 返回值始终是原始（或默认）窗口过程的返回值。
    ///
    /// # Safety
    /// 参数必须是 OS 投递的原始消息参数，WM_WINDOWPOSCHANGED 的 lparam
    /// 必须指向有效的 WINDOWPOS。
    pub unsafe fn dispatch(
        &self,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        let Some(entry) = self.registry.lookup(hwnd) else {
            return self.api.default_window_proc(hwnd, msg, wparam, lparam);
        };

        let message = WindowMessage::classify(msg, wparam, lparam, |ptr| unsafe {
            self.api.read_window_pos(ptr)
        });
        let window = entry.window.upgrade();

        if message == WindowMessage::Destroyed {
            let result = self.forward(entry.original, hwnd, msg, wparam, lparam);
            match window {
                Some(window) => self.remove_window_hook(&window),
                None => {
                    // 窗口对象已被释放，只剩注册表记录
                    self.registry.unregister(hwnd, || self.restore(hwnd, entry.original));
                }
            }
            return result;
        }

        if let Some(window) = window {
            if message.touches_state() {
                window.update_cached_state(|state| message.apply(state));
                log::trace!("窗口 {:?} 状态更新: {:?}", hwnd, message);
            }
        }

        self.forward(entry.original, hwnd, msg, wparam, lparam)
    }

    fn forward(
        &self,
        original: Option<WndProc>,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        match original {
            Some(original) => self.api.call_window_proc(original, hwnd, msg, wparam, lparam),
            None => self.api.default_window_proc(hwnd, msg, wparam, lparam),
        }
    }

    fn restore(&self, hwnd: NativeHandle, original: Option<WndProc>) {
        let Some(original) = original else {
            return;
        };
        if let Err(e) = self.api.swap_window_proc(hwnd, original) {
            log::warn!("恢复窗口 {:?} 的原始窗口过程失败: {:#}", hwnd, e);
        }
    }

    /// 向 OS 查询当前几何与呈现状态，查询失败的字段保留缓存值
    fn query_state(&self, window: &TrackedWindow, hwnd: NativeHandle) -> WindowState {
        let mut state = window.read_cached_state();

        if let Some(rect) = self.api.window_rect(hwnd) {
            state.x = rect.x;
            state.y = rect.y;
            state.width = rect.width;
            state.height = rect.height;
        }

        match self.api.show_command(hwnd) {
            Some(show_cmd) => state.state = monitor::state_from_show_command(show_cmd),
            None if state.state == PresentationState::Unknown => {
                state.state = PresentationState::Normal
            }
            None => {}
        }

        if self.detect_fullscreen {
            let monitor = self.api.nearest_monitor(hwnd).map(|info| info.bounds);
            state.state = monitor::classify(
                state.state,
                self.api.window_style(hwnd),
                &state.bounds(),
                monitor.as_ref(),
            );
        }

        state
    }
}

impl<A: NativeApi> WindowTracker for SubclassTracker<A> {
    fn get_window_state(&self, window: &Arc<TrackedWindow>) -> WindowState {
        self.ensure_window_hook(window);

        match window.native_handle() {
            Some(hwnd) => self.query_state(window, hwnd),
            None => window.read_cached_state(),
        }
    }

    fn set_window_position(&self, window: &Arc<TrackedWindow>, x: i32, y: i32) {
        self.ensure_window_hook(window);

        window.update_cached_state(|state| state.set_position(x, y));

        let Some(hwnd) = window.native_handle() else {
            return;
        };
        // 移动产生的消息会异步回到窗口过程，以那里为准
        if let Err(e) = self.api.move_window(hwnd, x, y) {
            log::warn!("移动窗口 {:?} 失败: {:#}", hwnd, e);
        }
    }

    fn set_window_size(&self, window: &Arc<TrackedWindow>, width: i32, height: i32) {
        self.ensure_window_hook(window);

        window.update_cached_state(|state| state.set_size(width, height));

        let Some(hwnd) = window.native_handle() else {
            return;
        };
        if width <= 0 || height <= 0 {
            return;
        }
        if let Err(e) = self.api.resize_window(hwnd, width, height) {
            log::warn!("调整窗口 {:?} 尺寸失败: {:#}", hwnd, e);
        }
    }

    fn ensure_window_hook(&self, window: &Arc<TrackedWindow>) {
        let mut slot = window.hook.lock();
        if slot.installed {
            return;
        }

        let Some(hwnd) = window.native_handle() else {
            return;
        };

        let trampoline = self.api.trampoline();
        let swapped = self.registry.register(hwnd, Arc::downgrade(window), || {
            self.api.swap_window_proc(hwnd, trampoline)
        });

        match swapped {
            Ok(original) => {
                *slot = HookSlot {
                    installed: true,
                    hwnd: Some(hwnd),
                    original,
                };
                log::debug!("窗口 {:?} 已挂钩，原始窗口过程: {:?}", hwnd, original);
            }
            Err(e) => log::warn!("窗口 {:?} 挂钩失败: {:#}", hwnd, e),
        }
    }

    fn remove_window_hook(&self, window: &Arc<TrackedWindow>) {
        // 先取出字段并释放钩子锁，再做恢复调用
        let slot = {
            let mut slot = window.hook.lock();
            if !slot.installed {
                return;
            }
            std::mem::take(&mut *slot)
        };

        let Some(hwnd) = slot.hwnd else {
            return;
        };
        self.registry.unregister(hwnd, || self.restore(hwnd, slot.original));
        log::debug!("窗口 {:?} 已卸载钩子", hwnd);
    }
}
