//! 收藏 HTTP API 客户端
//!
//! 负责所有收藏相关的 HTTP 请求

use crate::shop::auth::TokenProvider;
use crate::shop::constants::endpoints;
use crate::shop::error::RemoteError;
use crate::shop::favorite::models::{FavoriteEntry, ToggleResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 收藏后端接口
///
/// `FavoritesStore` 通过该 trait 访问远端，单测用脚本化实现替换。
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// 获取收藏列表（含详情）
    async fn list(&self) -> Result<Vec<FavoriteEntry>, RemoteError>;
    /// 只获取收藏的菜谱 ID 列表
    async fn list_ids(&self) -> Result<Vec<i64>, RemoteError>;
    /// 切换收藏状态，返回服务器侧的权威结果
    async fn toggle(&self, recipe_id: i64) -> Result<ToggleResult, RemoteError>;
    /// 添加收藏
    async fn add(&self, recipe_id: i64) -> Result<FavoriteEntry, RemoteError>;
    /// 移除收藏
    async fn remove(&self, recipe_id: i64) -> Result<(), RemoteError>;
}

/// 收藏相关的 HTTP API 客户端
pub struct FavoriteApi {
    client: reqwest::Client,
    api_base_url: String,
    token_provider: Arc<dyn TokenProvider>,
}

impl FavoriteApi {
    /// 创建新的收藏 API 客户端
    pub fn new(
        client: reqwest::Client,
        api_base_url: String,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client,
            api_base_url,
            token_provider,
        }
    }

    /// 每次调用前重新向提供方取令牌
    async fn bearer(&self) -> Result<String, RemoteError> {
        self.token_provider.access_token().await
    }
}

#[async_trait]
impl FavoritesBackend for FavoriteApi {
    async fn list(&self) -> Result<Vec<FavoriteEntry>, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::FAVORITES);

        info!("[FavoritesAPI] 📡 请求收藏列表");
        debug!("[FavoritesAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[FavoritesAPI] 收藏列表请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let entries: Vec<FavoriteEntry> = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[FavoritesAPI] 收藏列表反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[FavoritesAPI] ✅ 收藏列表响应，条目数: {}", entries.len());
        Ok(entries)
    }

    async fn list_ids(&self) -> Result<Vec<i64>, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::FAVORITES_IDS);

        info!("[FavoritesAPI] 📡 请求收藏ID列表");
        debug!("[FavoritesAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[FavoritesAPI] 收藏ID列表请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let ids: Vec<i64> = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[FavoritesAPI] 收藏ID列表反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[FavoritesAPI] ✅ 收藏ID列表响应，条目数: {}", ids.len());
        Ok(ids)
    }

    async fn toggle(&self, recipe_id: i64) -> Result<ToggleResult, RemoteError> {
        let url = format!(
            "{}{}/{}",
            self.api_base_url,
            endpoints::FAVORITES_TOGGLE,
            recipe_id
        );

        info!("[FavoritesAPI] 📡 切换收藏状态: recipeId={}", recipe_id);
        debug!("[FavoritesAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        // 先读原始文本，解码失败要与 HTTP 状态失败区分开
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[FavoritesAPI] 切换收藏请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_raw_body(status, &body));
        }

        let result: ToggleResult = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[FavoritesAPI] 切换收藏响应解析失败: {:?}, 原始响应: {}",
                e, body
            );
            RemoteError::Decode("无效的服务器响应".to_string())
        })?;

        info!(
            "[FavoritesAPI] ✅ 切换收藏响应: recipeId={}, isFavorite={}",
            result.recipe_id, result.is_favorite
        );
        Ok(result)
    }

    async fn add(&self, recipe_id: i64) -> Result<FavoriteEntry, RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::FAVORITES, recipe_id);

        info!("[FavoritesAPI] 📡 添加收藏: recipeId={}", recipe_id);
        debug!("[FavoritesAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[FavoritesAPI] 添加收藏请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let entry: FavoriteEntry = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[FavoritesAPI] 添加收藏反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[FavoritesAPI] ✅ 收藏已添加: recipeId={}", entry.recipe_id);
        Ok(entry)
    }

    async fn remove(&self, recipe_id: i64) -> Result<(), RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::FAVORITES, recipe_id);

        info!("[FavoritesAPI] 📡 移除收藏: recipeId={}", recipe_id);
        debug!("[FavoritesAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.delete(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[FavoritesAPI] 移除收藏请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        info!("[FavoritesAPI] ✅ 收藏已移除: recipeId={}", recipe_id);
        Ok(())
    }
}
