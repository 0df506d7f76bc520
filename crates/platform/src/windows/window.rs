use anyhow::{Context, Result};
use std::mem::size_of;

use winstate_core::message::WindowPos;
use winstate_core::Rect;

use windows::Win32::Foundation::RECT;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::to_hwnd;
use crate::NativeHandle;

pub(crate) fn window_rect(hwnd: NativeHandle) -> Option<Rect> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(to_hwnd(hwnd), &mut rect) }.ok()?;
    Some(Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom))
}

/// WINDOWPLACEMENT.showCmd
pub(crate) fn show_command(hwnd: NativeHandle) -> Option<u32> {
    let mut placement = WINDOWPLACEMENT {
        length: size_of::<WINDOWPLACEMENT>() as u32,
        ..Default::default()
    };
    unsafe { GetWindowPlacement(to_hwnd(hwnd), &mut placement) }.ok()?;
    Some(placement.showCmd)
}

pub(crate) fn window_style(hwnd: NativeHandle) -> u32 {
    unsafe { GetWindowLongPtrW(to_hwnd(hwnd), GWL_STYLE) as u32 }
}

/// # Safety
/// `lparam` 必须为 0 或指向有效的 WINDOWPOS。
pub(crate) unsafe fn read_window_pos(lparam: isize) -> Option<WindowPos> {
    let pos = (lparam as *const WINDOWPOS).as_ref()?;
    Some(WindowPos {
        x: pos.x,
        y: pos.y,
        cx: pos.cx,
        cy: pos.cy,
        flags: pos.flags.0,
    })
}

pub(crate) fn move_window(hwnd: NativeHandle, x: i32, y: i32) -> Result<()> {
    unsafe {
        SetWindowPos(
            to_hwnd(hwnd),
            HWND_TOP,
            x,
            y,
            0,
            0,
            SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        )
    }
    .context("SetWindowPos 移动窗口失败")
}

pub(crate) fn resize_window(hwnd: NativeHandle, width: i32, height: i32) -> Result<()> {
    unsafe {
        SetWindowPos(
            to_hwnd(hwnd),
            HWND_TOP,
            0,
            0,
            width,
            height,
            SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
        )
    }
    .context("SetWindowPos 调整尺寸失败")
}
