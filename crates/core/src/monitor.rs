use crate::{PresentationState, Rect};

pub const SW_SHOWMINIMIZED: u32 = 2;
pub const SW_SHOWMAXIMIZED: u32 = 3;
pub const SW_SHOWMINNOACTIVE: u32 = 7;

/// WS_OVERLAPPEDWINDOW：标题栏、边框、系统菜单与最小化/最大化按钮
pub const WS_OVERLAPPEDWINDOW: u32 = 0x00CF_0000;

/// 显示器信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    /// 显示器完整区域（包含任务栏）
    pub bounds: Rect,
}

/// 把 WINDOWPLACEMENT.showCmd 翻译为呈现状态
pub fn state_from_show_command(show_cmd: u32) -> PresentationState {
    match show_cmd {
        SW_SHOWMAXIMIZED => PresentationState::Maximized,
        SW_SHOWMINIMIZED | SW_SHOWMINNOACTIVE => PresentationState::Minimized,
        _ => PresentationState::Normal,
    }
}

/// 全屏推断：没有 overlapped 装饰的窗口覆盖了最近的显示器
///
/// 这只是几何近似。跨多个显示器的窗口和 DPI 虚拟化下的坐标都没有特殊处理。
pub fn is_fullscreen(style: u32, window: &Rect, monitor: &Rect) -> bool {
    style != 0 && style & WS_OVERLAPPEDWINDOW == 0 && window.covers(monitor)
}

/// 在 show command 推出的状态之上应用全屏推断
pub fn classify(
    show_state: PresentationState,
    style: u32,
    window: &Rect,
    monitor: Option<&Rect>,
) -> PresentationState {
    match monitor {
        Some(monitor) if is_fullscreen(style, window, monitor) => PresentationState::Fullscreen,
        _ => show_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS_POPUP: u32 = 0x8000_0000;
    const WS_VISIBLE: u32 = 0x1000_0000;

    fn primary() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    #[test]
    fn test_show_command_table() {
        assert_eq!(state_from_show_command(SW_SHOWMAXIMIZED), PresentationState::Maximized);
        assert_eq!(state_from_show_command(SW_SHOWMINIMIZED), PresentationState::Minimized);
        assert_eq!(state_from_show_command(SW_SHOWMINNOACTIVE), PresentationState::Minimized);
        assert_eq!(state_from_show_command(1), PresentationState::Normal);
        assert_eq!(state_from_show_command(9), PresentationState::Normal);
    }

    #[test]
    fn test_borderless_window_covering_monitor_is_fullscreen() {
        let window = primary();
        let state = classify(
            PresentationState::Normal,
            WS_POPUP | WS_VISIBLE,
            &window,
            Some(&primary()),
        );
        assert_eq!(state, PresentationState::Fullscreen);
    }

    #[test]
    fn test_decorated_window_keeps_show_state() {
        let window = primary();
        let style = WS_OVERLAPPEDWINDOW | WS_VISIBLE;
        assert_eq!(
            classify(PresentationState::Maximized, style, &window, Some(&primary())),
            PresentationState::Maximized
        );
        assert_eq!(
            classify(PresentationState::Normal, style, &window, Some(&primary())),
            PresentationState::Normal
        );
    }

    #[test]
    fn test_borderless_window_smaller_than_monitor() {
        let window = Rect::new(100, 100, 800, 600);
        assert!(!is_fullscreen(WS_POPUP, &window, &primary()));
    }

    #[test]
    fn test_unknown_style_or_monitor() {
        let window = primary();
        assert!(!is_fullscreen(0, &window, &primary()));
        assert_eq!(
            classify(PresentationState::Normal, WS_POPUP, &window, None),
            PresentationState::Normal
        );
    }

    #[test]
    fn test_secondary_monitor() {
        let monitor = Rect::new(1920, 0, 2560, 1440);
        assert!(is_fullscreen(WS_POPUP, &Rect::new(1920, 0, 2560, 1440), &monitor));
        assert!(!is_fullscreen(WS_POPUP, &Rect::new(1921, 0, 2560, 1440), &monitor));
    }
}
