//! 演示宿主：创建窗口、挂接状态跟踪，把状态变化写进日志

use anyhow::Result;
use std::sync::Arc;

use winstate_core::config::TrackerConfig;
use winstate_core::WindowState;
use winstate_platform::{TrackedWindow, WindowTracker};

/// 把配置里的初始几何交给 setter
fn apply_initial_geometry(
    tracker: &impl WindowTracker,
    window: &Arc<TrackedWindow>,
    config: &TrackerConfig,
) {
    if config.hook_on_attach {
        tracker.ensure_window_hook(window);
    }
    let geometry = &config.window;
    tracker.set_window_position(window, geometry.x, geometry.y);
    tracker.set_window_size(window, geometry.width, geometry.height);
}

#[cfg(target_os = "windows")]
pub fn run(config: &TrackerConfig) -> Result<WindowState> {
    win32::run(config)
}

/// 没有原生窗口时只能通过 setter 维护状态
#[cfg(not(target_os = "windows"))]
pub fn run(config: &TrackerConfig) -> Result<WindowState> {
    let tracker = winstate_platform::create_tracker(config);
    let window = Arc::new(TrackedWindow::unrealized());

    log::info!("当前平台不支持消息钩子，仅记录显式设置的状态");
    apply_initial_geometry(&tracker, &window, config);

    log::info!("查询到的窗口状态: {}", tracker.get_window_state(&window).state);
    let state = window.read_cached_state();
    log::info!("缓存的窗口状态: {} {:?}", state.state, state.bounds());

    tracker.remove_window_hook(&window);
    Ok(state)
}

#[cfg(target_os = "windows")]
mod win32 {
    use anyhow::{bail, Result};
    use std::iter::once;
    use std::sync::Arc;

    use winstate_core::config::{InitialGeometry, TrackerConfig};
    use winstate_core::WindowState;
    use winstate_platform::{create_tracker, NativeHandle, TrackedWindow, WindowTracker};

    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::*;

    /// 状态轮询间隔（毫秒）
    const REPORT_INTERVAL_MS: u32 = 1000;

    pub fn run(config: &TrackerConfig) -> Result<WindowState> {
        let hwnd = create_window(&config.window)?;
        let window = Arc::new(TrackedWindow::with_handle(NativeHandle(hwnd.0 as isize)));
        let tracker = create_tracker(config);

        super::apply_initial_geometry(&tracker, &window, config);

        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
        }

        let mut last = tracker.get_window_state(&window);
        log::info!("窗口已创建: {} {:?}", last.state, last.bounds());

        unsafe {
            let timer = SetTimer(HWND::default(), 0, REPORT_INTERVAL_MS, None);
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, HWND::default(), 0, 0).as_bool() {
                if msg.message == WM_TIMER && window.is_hooked() {
                    let current = tracker.get_window_state(&window);
                    if current != last {
                        log::info!("窗口状态变化: {} {:?}", current.state, current.bounds());
                        last = current;
                    }
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            let _ = KillTimer(HWND::default(), timer);
        }

        // WM_DESTROY 时钩子已自行卸载，这里再调用一次也无副作用
        tracker.remove_window_hook(&window);
        Ok(window.read_cached_state())
    }

    fn create_window(geometry: &InitialGeometry) -> Result<HWND> {
        unsafe {
            let instance = GetModuleHandleW(None)?;
            let class_name = w!("WinstateDemoWindow");

            let wc = WNDCLASSW {
                lpfnWndProc: Some(host_window_proc),
                hInstance: instance.into(),
                lpszClassName: class_name,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                bail!("RegisterClassW 失败");
            }

            let title: Vec<u16> = geometry.title.encode_utf16().chain(once(0)).collect();
            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                class_name,
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                HWND::default(),
                HMENU::default(),
                instance,
                None,
            )?;
            Ok(hwnd)
        }
    }

    /// 宿主窗口类的窗口过程，也就是被挂钩后转发的目标
    unsafe extern "system" fn host_window_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        if msg == WM_DESTROY {
            PostQuitMessage(0);
            return LRESULT(0);
        }
        DefWindowProcW(hwnd, msg, wparam, lparam)
    }
}
