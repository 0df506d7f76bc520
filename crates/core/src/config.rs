use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 窗口状态跟踪配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// 查询状态时是否执行全屏推断
    #[serde(default = "default_true")]
    pub detect_fullscreen: bool,

    /// 宿主创建窗口后立即安装钩子（否则在第一次读写状态时安装）
    #[serde(default = "default_true")]
    pub hook_on_attach: bool,

    /// 日志级别（env_logger 过滤语法）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 演示宿主窗口的初始几何
    #[serde(default)]
    pub window: InitialGeometry,
}

/// 宿主窗口的初始标题、位置与尺寸
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialGeometry {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_origin")]
    pub x: i32,
    #[serde(default = "default_origin")]
    pub y: i32,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_title() -> String {
    "winstate".to_string()
}

fn default_origin() -> i32 {
    100
}

fn default_width() -> i32 {
    1024
}

fn default_height() -> i32 {
    768
}

impl Default for InitialGeometry {
    fn default() -> Self {
        Self {
            title: default_title(),
            x: default_origin(),
            y: default_origin(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detect_fullscreen: true,
            hook_on_attach: true,
            log_level: default_log_level(),
            window: InitialGeometry::default(),
        }
    }
}

impl TrackerConfig {
    /// 获取配置文件路径
    /// - Windows: %APPDATA%/winstate/config.toml
    /// - Linux: ~/.config/winstate/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("无法获取配置目录")?
            .join("winstate");

        fs::create_dir_all(&config_dir).context("无法创建配置目录")?;

        Ok(config_dir.join("config.toml"))
    }

    /// 从配置文件加载，如果文件不存在则写入并返回默认配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        Self::parse(&content)
    }

    /// 解析 TOML 文本
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("配置文件格式错误")
    }

    /// 保存配置到文件
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let content = toml::to_string_pretty(self).context("配置序列化失败")?;

        fs::write(&path, content)
            .with_context(|| format!("无法写入配置文件: {}", path.display()))?;

        log::debug!("配置已保存到: {}", path.display());
        Ok(())
    }
}
