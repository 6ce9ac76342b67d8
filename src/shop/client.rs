//! Ricetti 客户端核心实现模块
//!
//! 组合令牌提供者、各 API 客户端与状态存储，管理会话生命周期。
//! 存储不再是模块级单例，由客户端显式构造并按引用交给 UI 层。

use crate::shop::auth::TokenProvider;
use crate::shop::banner::BannerStore;
use crate::shop::catalog::api::CatalogApi;
use crate::shop::constants::timing;
use crate::shop::favorite::api::FavoriteApi;
use crate::shop::favorite::service::FavoritesStore;
use crate::shop::guard::{AdminGuard, IdentityCheck};
use crate::shop::user::api::UserApi;
use crate::shop::user::service::ProfileStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// HTTP API 基础地址
    pub api_base_url: String,
    /// 管理员守卫等待资料加载的最长时间（毫秒）
    pub admin_guard_timeout_ms: u64,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            admin_guard_timeout_ms: timing::ADMIN_GUARD_TIMEOUT_MS,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8081")
    }
}

/// Ricetti 店面客户端
///
/// 持有一个会话的全部本地状态
pub struct ShopClient {
    config: ClientConfig,
    favorites: Arc<FavoritesStore>,
    profile: Arc<ProfileStore>,
    banner: Arc<BannerStore>,
    catalog: Arc<CatalogApi>,
    users: Arc<UserApi>,
}

impl ShopClient {
    /// 创建新的客户端
    /// - `config`: 客户端配置
    /// - `token_provider`: 访问令牌提供者（身份提供商的适配器）
    pub fn new(config: ClientConfig, token_provider: Arc<dyn TokenProvider>) -> Result<Self> {
        let http_client = reqwest::ClientBuilder::new()
            .build()
            .context("创建 HTTP 客户端失败")?;

        let favorite_api = Arc::new(FavoriteApi::new(
            http_client.clone(),
            config.api_base_url.clone(),
            token_provider.clone(),
        ));
        let user_api = Arc::new(UserApi::new(
            http_client.clone(),
            config.api_base_url.clone(),
            token_provider.clone(),
        ));
        let catalog_api = Arc::new(CatalogApi::new(
            http_client,
            config.api_base_url.clone(),
            token_provider,
        ));

        Ok(Self {
            favorites: Arc::new(FavoritesStore::new(favorite_api)),
            profile: Arc::new(ProfileStore::new(user_api.clone())),
            banner: Arc::new(BannerStore::new()),
            catalog: catalog_api,
            users: user_api,
            config,
        })
    }

    /// 会话开始：加载用户资料和收藏 ID（首屏快速路径）
    pub async fn init_session(&self) {
        info!("[Client] 🔗 初始化会话: {}", self.config.api_base_url);
        self.profile.fetch_profile().await;
        self.favorites.fetch_favorite_ids().await;
    }

    /// 会话结束：清空全部本地状态
    pub fn clear_session(&self) {
        self.profile.clear_profile();
        self.favorites.clear_favorites();
        info!("[Client] 🔒 会话状态已清空");
    }

    /// 构造进入管理端路由用的守卫
    pub fn admin_guard(&self, identity: Arc<dyn IdentityCheck>) -> AdminGuard {
        AdminGuard::new(identity, self.profile.clone())
            .with_wait_budget(Duration::from_millis(self.config.admin_guard_timeout_ms))
    }

    /// 收藏存储
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// 用户资料存储
    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    /// 横幅存储
    pub fn banner(&self) -> &BannerStore {
        &self.banner
    }

    /// 商品目录 API
    pub fn catalog(&self) -> &CatalogApi {
        &self.catalog
    }

    /// 用户管理 API（管理端）
    pub fn users(&self) -> &UserApi {
        &self.users
    }

    /// 当前配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::auth::StaticTokenProvider;
    use std::sync::Once;
    use tracing::error;

    static INIT_LOGGER: Once = Once::new();

    fn init_test_logger() {
        INIT_LOGGER.call_once(|| {
            use tracing_subscriber::prelude::*;
            use tracing_subscriber::EnvFilter;

            let filter_layer = EnvFilter::new("info,ricetti_sdk_core_rust=debug,reqwest=info");

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_test_writer();

            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt_layer)
                .init();
        });
    }

    #[tokio::test]
    async fn clear_session_resets_all_stores() {
        let client = ShopClient::new(
            ClientConfig::default(),
            Arc::new(StaticTokenProvider::new("test-token")),
        )
        .unwrap();

        client.clear_session();
        assert!(!client.profile().is_logged_in());
        assert_eq!(client.favorites().count(), 0);
        assert!(client.banner().is_visible());
    }

    /// 对着本地真实后端跑一遍完整会话（需要先启动后端并提供有效 token）
    #[tokio::test]
    #[ignore]
    async fn test_live_session() {
        init_test_logger();

        let token = match std::env::var("RICETTI_TOKEN") {
            Ok(t) => t,
            Err(_) => {
                error!("缺少环境变量 RICETTI_TOKEN，跳过");
                return;
            }
        };

        let client = ShopClient::new(
            ClientConfig::default(),
            Arc::new(StaticTokenProvider::new(token)),
        )
        .unwrap();

        client.init_session().await;
        assert!(client.profile().is_logged_in());

        client.favorites().fetch_favorites().await;
        tracing::info!("收藏数量: {}", client.favorites().count());
    }
}
