//! 促销横幅可见性存储
//!
//! 每个会话一份；用户关闭后在当前会话内保持隐藏。

use std::sync::atomic::{AtomicBool, Ordering};

/// 横幅存储
pub struct BannerStore {
    visible: AtomicBool,
}

impl BannerStore {
    /// 创建新的横幅存储，初始可见
    pub fn new() -> Self {
        Self {
            visible: AtomicBool::new(true),
        }
    }

    /// 横幅当前是否可见
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// 隐藏横幅
    pub fn hide(&self) {
        self.visible.store(false, Ordering::Relaxed);
    }

    /// 重新显示横幅
    pub fn show(&self) {
        self.visible.store(true, Ordering::Relaxed);
    }
}

impl Default for BannerStore {
    fn default() -> Self {
        Self::new()
    }
}
