use anyhow::{bail, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

use crate::window::TrackedWindow;
use crate::{NativeHandle, WndProc};

/// 注册表中的一条记录
#[derive(Debug, Clone)]
pub struct HookEntry {
    /// 非拥有引用，窗口对象的生命周期不受注册表控制
    pub window: Weak<TrackedWindow>,
    /// 原始窗口过程的副本，窗口对象被提前释放时仍可转发
    pub original: Option<WndProc>,
}

/// 原生句柄 → 窗口对象 的进程级映射
///
/// OS 投递消息时无法携带应用层上下文，窗口过程只能靠句柄找回所属窗口。
/// 每个已挂钩的窗口恰好一条记录，安装时插入、卸载或销毁时删除。
#[derive(Debug, Default)]
pub struct HookRegistry {
    entries: RwLock<HashMap<NativeHandle, HookEntry>>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<HookRegistry>> = OnceLock::new();

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 供真实窗口过程使用的全局注册表
    pub fn global() -> &'static Arc<HookRegistry> {
        GLOBAL_REGISTRY.get_or_init(|| Arc::new(HookRegistry::new()))
    }

    /// 在写锁内执行 `swap` 并插入记录
    ///
    /// 写锁覆盖替换窗口过程和插入这两步，窗口过程在两者之间收到的消息
    /// 会等待插入完成，不会找不到记录。`swap` 不得向该窗口同步发送消息。
    pub fn register(
        &self,
        hwnd: NativeHandle,
        window: Weak<TrackedWindow>,
        swap: impl FnOnce() -> Result<Option<WndProc>>,
    ) -> Result<Option<WndProc>> {
        let mut entries = self.entries.write();
        if entries.contains_key(&hwnd) {
            bail!("窗口 {:?} 已被其它窗口对象挂钩", hwnd);
        }
        let original = swap()?;
        entries.insert(hwnd, HookEntry { window, original });
        Ok(original)
    }

    /// 在写锁内执行 `restore` 并删除记录，返回被删除的记录
    pub fn unregister(&self, hwnd: NativeHandle, restore: impl FnOnce()) -> Option<HookEntry> {
        let mut entries = self.entries.write();
        restore();
        entries.remove(&hwnd)
    }

    pub fn lookup(&self, hwnd: NativeHandle) -> Option<HookEntry> {
        self.entries.read().get(&hwnd).cloned()
    }

    pub fn contains(&self, hwnd: NativeHandle) -> bool {
        self.entries.read().contains_key(&hwnd)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let registry = HookRegistry::new();
        let window = Arc::new(TrackedWindow::unrealized());
        let hwnd = NativeHandle(0x10);

        let original = registry
            .register(hwnd, Arc::downgrade(&window), || Ok(Some(WndProc(0x99))))
            .unwrap();
        assert_eq!(original, Some(WndProc(0x99)));
        assert!(registry.contains(hwnd));
        assert_eq!(registry.len(), 1);

        let entry = registry.lookup(hwnd).unwrap();
        assert!(Arc::ptr_eq(&entry.window.upgrade().unwrap(), &window));

        let mut restored = false;
        let removed = registry.unregister(hwnd, || restored = true);
        assert!(restored);
        assert!(removed.is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_swap_does_not_insert() {
        let registry = HookRegistry::new();
        let result = registry.register(NativeHandle(0x10), Weak::new(), || bail!("拒绝"));
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_handle_is_rejected_before_swap() {
        let registry = HookRegistry::new();
        let hwnd = NativeHandle(0x20);
        registry.register(hwnd, Weak::new(), || Ok(None)).unwrap();

        let mut swapped = false;
        let result = registry.register(hwnd, Weak::new(), || {
            swapped = true;
            Ok(None)
        });
        assert!(result.is_err());
        assert!(!swapped);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_entry_outlives_window() {
        let registry = HookRegistry::new();
        let hwnd = NativeHandle(0x30);
        let window = Arc::new(TrackedWindow::unrealized());
        registry
            .register(hwnd, Arc::downgrade(&window), || Ok(Some(WndProc(7))))
            .unwrap();
        drop(window);

        let entry = registry.lookup(hwnd).unwrap();
        assert!(entry.window.upgrade().is_none());
        assert_eq!(entry.original, Some(WndProc(7)));
    }
}
