//! 收藏（菜谱心愿单）模块
//!
//! 实现收藏列表的远端同步与本地状态维护

pub mod api;
pub mod models;
pub mod service;

// 重新导出主要类型
pub use api::{FavoriteApi, FavoritesBackend};
pub use models::{FavoriteEntry, ToggleResult};
pub use service::FavoritesStore;
