pub mod config;
pub mod message;
pub mod monitor;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fmt;

/// 矩形区域（屏幕坐标，像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// 由左上角和右下角坐标构造（Win32 RECT 的布局）
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// 当前矩形是否完整覆盖 `other`：原点不大于、尺寸不小于
    pub fn covers(&self, other: &Rect) -> bool {
        self.width >= other.width
            && self.height >= other.height
            && self.x <= other.x
            && self.y <= other.y
    }
}

/// 窗口的呈现状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationState {
    /// 尚未获知任何几何信息
    #[default]
    Unknown,
    Normal,
    Minimized,
    Maximized,
    /// 无边框且覆盖整个显示器（由几何关系推断）
    Fullscreen,
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
            Self::Fullscreen => "fullscreen",
        };
        f.write_str(name)
    }
}

/// 窗口几何与呈现状态的快照
///
/// `width`/`height` 为 0 表示尚未获知。非正的尺寸永远不会覆盖已知的正值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub state: PresentationState,
}

impl WindowState {
    /// 更新位置，首次获知几何信息时 Unknown 提升为 Normal
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.promote();
    }

    /// 只接受正的尺寸；两个维度都已知后才提升为 Normal
    pub fn set_size(&mut self, width: i32, height: i32) {
        if width > 0 {
            self.width = width;
        }
        if height > 0 {
            self.height = height;
        }
        if self.has_size() {
            self.promote();
        }
    }

    pub fn has_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn promote(&mut self) {
        if self.state == PresentationState::Unknown {
            self.state = PresentationState::Normal;
        }
    }
}
