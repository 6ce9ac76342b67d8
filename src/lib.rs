pub mod shop;

// 重新导出常用类型和函数，方便外部使用
pub use shop::{
    client::{ClientConfig, ShopClient},
    error::RemoteError,
    favorite::{FavoriteEntry, FavoritesStore, ToggleResult},
    guard::{AdminGuard, GuardDecision},
    user::{ProfileStore, Role, UserProfile},
};
