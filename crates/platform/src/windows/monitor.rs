use std::mem::size_of;

use winstate_core::monitor::MonitorInfo;
use winstate_core::Rect;

use windows::Win32::Graphics::Gdi::*;

use super::to_hwnd;
use crate::NativeHandle;

/// 窗口最近的显示器（MONITOR_DEFAULTTONEAREST）
pub(crate) fn nearest_monitor(hwnd: NativeHandle) -> Option<MonitorInfo> {
    unsafe {
        let monitor = MonitorFromWindow(to_hwnd(hwnd), MONITOR_DEFAULTTONEAREST);
        if monitor.0.is_null() {
            return None;
        }

        let mut info = MONITORINFO {
            cbSize: size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !GetMonitorInfoW(monitor, &mut info).as_bool() {
            return None;
        }

        let bounds = info.rcMonitor;
        Some(MonitorInfo {
            bounds: Rect::from_ltrb(bounds.left, bounds.top, bounds.right, bounds.bottom),
        })
    }
}
