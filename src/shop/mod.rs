//! Ricetti 店面客户端核心模块
//!
//! 此模块包含店面 SDK 的核心逻辑实现：
//! 各领域的 HTTP API 客户端、本地状态存储与管理员路由守卫。

pub mod auth;
pub mod banner;
pub mod catalog;
pub mod client;
pub mod constants;
pub mod error;
pub mod favorite;
pub mod guard;
pub mod user;

// 重新导出主要类型
pub use auth::{StaticTokenProvider, TokenProvider};
pub use banner::BannerStore;
pub use client::{ClientConfig, ShopClient};
pub use error::RemoteError;
pub use favorite::{FavoriteApi, FavoriteEntry, FavoritesStore, ToggleResult};
pub use guard::{AdminGuard, GuardDecision, IdentityCheck};
pub use user::{ProfileStore, Role, UserApi, UserProfile};
