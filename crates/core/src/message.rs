//! 被拦截的窗口消息：解码与缓存更新规则
//!
//! 常量取自 Win32 的消息编号，解码只依赖 `wparam`/`lparam` 的原始数值，
//! 因此可以在任何平台上测试。

use crate::{PresentationState, WindowState};

pub const WM_DESTROY: u32 = 0x0002;
pub const WM_MOVE: u32 = 0x0003;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_WINDOWPOSCHANGED: u32 = 0x0047;
pub const WM_NCDESTROY: u32 = 0x0082;

pub const SIZE_RESTORED: usize = 0;
pub const SIZE_MINIMIZED: usize = 1;
pub const SIZE_MAXIMIZED: usize = 2;

pub const SWP_NOSIZE: u32 = 0x0001;
pub const SWP_NOMOVE: u32 = 0x0002;

/// WM_WINDOWPOSCHANGED 携带的位置/尺寸信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowPos {
    pub x: i32,
    pub y: i32,
    pub cx: i32,
    pub cy: i32,
    pub flags: u32,
}

impl WindowPos {
    pub fn moved(&self) -> bool {
        self.flags & SWP_NOMOVE == 0
    }

    pub fn resized(&self) -> bool {
        self.flags & SWP_NOSIZE == 0
    }
}

/// 解码后的窗口消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    /// WM_SIZE：客户区新尺寸与尺寸模式
    Resized {
        width: i32,
        height: i32,
        state: PresentationState,
    },
    /// WM_WINDOWPOSCHANGED
    PositionChanged(WindowPos),
    /// WM_MOVE：有符号的 16 位坐标
    Moved { x: i32, y: i32 },
    /// WM_DESTROY / WM_NCDESTROY
    Destroyed,
    Other,
}

impl WindowMessage {
    /// 按消息编号分类；`read_pos` 负责把 lparam 解释为 WINDOWPOS 指针
    pub fn classify(
        msg: u32,
        wparam: usize,
        lparam: isize,
        read_pos: impl FnOnce(isize) -> Option<WindowPos>,
    ) -> Self {
        match msg {
            WM_SIZE => Self::Resized {
                width: loword(lparam) as i32,
                height: hiword(lparam) as i32,
                state: size_mode(wparam),
            },
            WM_WINDOWPOSCHANGED => {
                if lparam == 0 {
                    return Self::Other;
                }
                read_pos(lparam).map_or(Self::Other, Self::PositionChanged)
            }
            WM_MOVE => Self::Moved {
                x: loword(lparam) as i16 as i32,
                y: hiword(lparam) as i16 as i32,
            },
            WM_DESTROY | WM_NCDESTROY => Self::Destroyed,
            _ => Self::Other,
        }
    }

    /// 该消息是否会修改缓存
    pub fn touches_state(&self) -> bool {
        match self {
            Self::Resized { width, height, .. } => *width > 0 && *height > 0,
            Self::PositionChanged(pos) => pos.moved() || pos.resized(),
            Self::Moved { .. } => true,
            Self::Destroyed | Self::Other => false,
        }
    }

    /// 把消息应用到缓存的状态上
    pub fn apply(&self, state: &mut WindowState) {
        match *self {
            Self::Resized {
                width,
                height,
                state: mode,
            } => {
                if width <= 0 || height <= 0 {
                    return;
                }
                // 实时的尺寸事件是权威的，直接覆盖之前的模式
                state.width = width;
                state.height = height;
                state.state = mode;
            }
            Self::PositionChanged(pos) => {
                if pos.moved() {
                    state.set_position(pos.x, pos.y);
                }
                if pos.resized() {
                    state.set_size(pos.cx, pos.cy);
                    if state.state == PresentationState::Unknown {
                        state.state = PresentationState::Normal;
                    }
                }
            }
            Self::Moved { x, y } => state.set_position(x, y),
            Self::Destroyed | Self::Other => {}
        }
    }
}

/// WM_SIZE 的 wparam 到呈现状态；未识别的编码按 Normal 处理
pub fn size_mode(wparam: usize) -> PresentationState {
    match wparam {
        SIZE_MAXIMIZED => PresentationState::Maximized,
        SIZE_MINIMIZED => PresentationState::Minimized,
        _ => PresentationState::Normal,
    }
}

fn loword(value: isize) -> u16 {
    (value as usize & 0xFFFF) as u16
}

fn hiword(value: isize) -> u16 {
    (((value as usize) >> 16) & 0xFFFF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(lo: u16, hi: u16) -> isize {
        ((hi as usize) << 16 | lo as usize) as isize
    }

    fn no_pos(_: isize) -> Option<WindowPos> {
        None
    }

    #[test]
    fn test_size_message() {
        let msg = WindowMessage::classify(WM_SIZE, SIZE_MAXIMIZED, pack(1920, 1040), no_pos);
        assert_eq!(
            msg,
            WindowMessage::Resized {
                width: 1920,
                height: 1040,
                state: PresentationState::Maximized
            }
        );

        let mut state = WindowState {
            state: PresentationState::Minimized,
            ..Default::default()
        };
        msg.apply(&mut state);
        assert_eq!((state.width, state.height), (1920, 1040));
        assert_eq!(state.state, PresentationState::Maximized);
    }

    #[test]
    fn test_size_message_with_zero_dimension_is_ignored() {
        let mut state = WindowState::default();
        state.set_size(640, 480);
        let before = state;

        let msg = WindowMessage::classify(WM_SIZE, SIZE_MAXIMIZED, pack(0, 480), no_pos);
        assert!(!msg.touches_state());
        msg.apply(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_size_mode_defaults_to_normal() {
        assert_eq!(size_mode(SIZE_RESTORED), PresentationState::Normal);
        assert_eq!(size_mode(3), PresentationState::Normal);
        assert_eq!(size_mode(4), PresentationState::Normal);
        assert_eq!(size_mode(SIZE_MINIMIZED), PresentationState::Minimized);
    }

    #[test]
    fn test_move_message_sign_extends() {
        let lparam = pack((-1920i16) as u16, (-8i16) as u16);
        let msg = WindowMessage::classify(WM_MOVE, 0, lparam, no_pos);
        assert_eq!(msg, WindowMessage::Moved { x: -1920, y: -8 });

        let mut state = WindowState::default();
        msg.apply(&mut state);
        assert_eq!((state.x, state.y), (-1920, -8));
        assert_eq!(state.state, PresentationState::Normal);
    }

    #[test]
    fn test_position_changed_respects_nomove() {
        let pos = WindowPos {
            x: 500,
            y: 600,
            cx: 1024,
            cy: 768,
            flags: SWP_NOMOVE,
        };
        let msg = WindowMessage::classify(WM_WINDOWPOSCHANGED, 0, 0x1000, |_| Some(pos));
        assert_eq!(msg, WindowMessage::PositionChanged(pos));

        let mut state = WindowState::default();
        state.set_position(10, 20);
        msg.apply(&mut state);
        assert_eq!((state.x, state.y), (10, 20));
        assert_eq!((state.width, state.height), (1024, 768));
    }

    #[test]
    fn test_position_changed_respects_nosize() {
        let pos = WindowPos {
            x: 5,
            y: 6,
            cx: 1,
            cy: 1,
            flags: SWP_NOSIZE,
        };
        let mut state = WindowState::default();
        WindowMessage::PositionChanged(pos).apply(&mut state);
        assert_eq!((state.x, state.y), (5, 6));
        assert_eq!((state.width, state.height), (0, 0));
        assert_eq!(state.state, PresentationState::Normal);
    }

    #[test]
    fn test_position_changed_skips_non_positive_size() {
        let pos = WindowPos {
            x: 0,
            y: 0,
            cx: 0,
            cy: 300,
            flags: SWP_NOMOVE,
        };
        let mut state = WindowState::default();
        state.set_size(400, 200);
        WindowMessage::PositionChanged(pos).apply(&mut state);
        assert_eq!((state.width, state.height), (400, 300));
    }

    #[test]
    fn test_position_changed_null_lparam() {
        let msg = WindowMessage::classify(WM_WINDOWPOSCHANGED, 0, 0, |_| {
            panic!("null lparam must not be read")
        });
        assert_eq!(msg, WindowMessage::Other);
    }

    #[test]
    fn test_destroy_and_other() {
        assert_eq!(WindowMessage::classify(WM_DESTROY, 0, 0, no_pos), WindowMessage::Destroyed);
        assert_eq!(WindowMessage::classify(WM_NCDESTROY, 0, 0, no_pos), WindowMessage::Destroyed);
        // WM_PAINT
        assert_eq!(WindowMessage::classify(0x000F, 0, 0, no_pos), WindowMessage::Other);
    }
}
