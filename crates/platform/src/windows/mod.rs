pub mod hook;
pub mod monitor;
pub mod window;

use anyhow::Result;
use std::sync::OnceLock;

use winstate_core::message::WindowPos;
use winstate_core::monitor::MonitorInfo;
use winstate_core::Rect;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};

use crate::registry::HookRegistry;
use crate::subclass::{NativeApi, SubclassTracker};
use crate::{NativeHandle, WndProc};

/// 基于 Win32 API 的原语实现
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Api;

impl Win32Api {
    /// 使用全局注册表的跟踪器，窗口过程与宿主共享同一张表
    pub fn tracker() -> SubclassTracker<Win32Api> {
        SubclassTracker::new(Win32Api, HookRegistry::global().clone())
    }

    /// 窗口过程使用的实例
    pub(crate) fn shared() -> &'static SubclassTracker<Win32Api> {
        static SHARED: OnceLock<SubclassTracker<Win32Api>> = OnceLock::new();
        SHARED.get_or_init(Self::tracker)
    }
}

pub(crate) fn to_hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.0 as *mut _)
}

impl NativeApi for Win32Api {
    fn trampoline(&self) -> WndProc {
        let proc: unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT =
            hook::window_proc;
        WndProc(proc as usize as isize)
    }

    fn swap_window_proc(&self, hwnd: NativeHandle, new_proc: WndProc) -> Result<Option<WndProc>> {
        hook::swap_window_proc(hwnd, new_proc)
    }

    fn call_window_proc(
        &self,
        original: WndProc,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        hook::call_window_proc(original, hwnd, msg, wparam, lparam)
    }

    fn default_window_proc(
        &self,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        hook::default_window_proc(hwnd, msg, wparam, lparam)
    }

    unsafe fn read_window_pos(&self, lparam: isize) -> Option<WindowPos> {
        window::read_window_pos(lparam)
    }

    fn window_rect(&self, hwnd: NativeHandle) -> Option<Rect> {
        window::window_rect(hwnd)
    }

    fn show_command(&self, hwnd: NativeHandle) -> Option<u32> {
        window::show_command(hwnd)
    }

    fn window_style(&self, hwnd: NativeHandle) -> u32 {
        window::window_style(hwnd)
    }

    fn nearest_monitor(&self, hwnd: NativeHandle) -> Option<MonitorInfo> {
        monitor::nearest_monitor(hwnd)
    }

    fn move_window(&self, hwnd: NativeHandle, x: i32, y: i32) -> Result<()> {
        window::move_window(hwnd, x, y)
    }

    fn resize_window(&self, hwnd: NativeHandle, width: i32, height: i32) -> Result<()> {
        window::resize_window(hwnd, width, height)
    }
}
