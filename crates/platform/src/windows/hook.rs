use anyhow::{bail, Result};
use std::mem::transmute;

use windows::Win32::Foundation::{
    GetLastError, SetLastError, HWND, LPARAM, LRESULT, WIN32_ERROR, WPARAM,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, DefWindowProcW, SetWindowLongPtrW, GWLP_WNDPROC, WNDPROC,
};

use super::{to_hwnd, Win32Api};
use crate::{NativeHandle, WndProc};

/// 替换后的窗口过程，OS 对已挂钩窗口投递的每条消息都会进入这里
pub(crate) unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let handle = NativeHandle(hwnd.0 as isize);
    LRESULT(Win32Api::shared().dispatch(handle, msg, wparam.0, lparam.0))
}

/// 通过 GWLP_WNDPROC 替换窗口过程
///
/// 返回 0 时需要看 last error 才能区分失败和原值本来就是 0。
pub(crate) fn swap_window_proc(hwnd: NativeHandle, new_proc: WndProc) -> Result<Option<WndProc>> {
    unsafe {
        SetLastError(WIN32_ERROR(0));
        let previous = SetWindowLongPtrW(to_hwnd(hwnd), GWLP_WNDPROC, new_proc.0);
        if previous == 0 {
            let error = GetLastError();
            if error.0 != 0 {
                bail!("SetWindowLongPtrW 失败: {:?}", error);
            }
            return Ok(None);
        }
        Ok(Some(WndProc(previous)))
    }
}

pub(crate) fn call_window_proc(
    original: WndProc,
    hwnd: NativeHandle,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> isize {
    unsafe {
        let proc: WNDPROC = transmute::<isize, WNDPROC>(original.0);
        CallWindowProcW(proc, to_hwnd(hwnd), msg, WPARAM(wparam), LPARAM(lparam)).0
    }
}

pub(crate) fn default_window_proc(
    hwnd: NativeHandle,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> isize {
    unsafe { DefWindowProcW(to_hwnd(hwnd), msg, WPARAM(wparam), LPARAM(lparam)).0 }
}
