//! 客户端常量配置
//!
//! 集中管理硬编码值，与后端的路径和角色定义保持一致。

/// API 端点（相对于基础 URL）
pub mod endpoints {
    pub const PRODUCTS: &str = "/api/product";
    pub const CATEGORIES: &str = "/api/category";
    pub const PROFILE: &str = "/api/profile";
    pub const USERS: &str = "/api/users";
    pub const FAVORITES: &str = "/api/favorites";
    pub const FAVORITES_TOGGLE: &str = "/api/favorites/toggle";
    pub const FAVORITES_IDS: &str = "/api/favorites/ids";
}

/// 时间相关常量
pub mod timing {
    /// 管理员守卫等待用户资料加载的最长时间（毫秒），超时按未授权处理
    pub const ADMIN_GUARD_TIMEOUT_MS: u64 = 2000;
}
