//! 用户 HTTP API 客户端
//!
//! 负责当前用户资料读取与管理端的用户维护请求

use crate::shop::auth::TokenProvider;
use crate::shop::constants::endpoints;
use crate::shop::error::RemoteError;
use crate::shop::user::models::UserProfile;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 用户资料后端接口
///
/// `ProfileStore` 通过该 trait 访问远端，单测用脚本化实现替换。
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// 获取当前登录用户的资料
    async fn get_profile(&self) -> Result<UserProfile, RemoteError>;
}

/// 用户相关的 HTTP API 客户端
pub struct UserApi {
    client: reqwest::Client,
    api_base_url: String,
    token_provider: Arc<dyn TokenProvider>,
}

impl UserApi {
    /// 创建新的用户 API 客户端
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

    async fn bearer(&self) -> Result<String, RemoteError> {
        self.token_provider.access_token().await
    }

    /// 获取全部用户（管理端）
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::USERS);

        info!("[UserAPI] 📡 请求用户列表");
        debug!("[UserAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[UserAPI] 用户列表请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let users: Vec<UserProfile> = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[UserAPI] 用户列表反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[UserAPI] ✅ 用户列表响应，条目数: {}", users.len());
        Ok(users)
    }

    /// 更新用户（管理端）
    pub async fn update_user(
        &self,
        id: i64,
        user: &UserProfile,
    ) -> Result<UserProfile, RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::USERS, id);

        info!("[UserAPI] 📡 更新用户: id={}", id);
        debug!("[UserAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .json(user)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[UserAPI] 更新用户请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let updated: UserProfile = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[UserAPI] 更新用户反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[UserAPI] ✅ 用户已更新: id={}", updated.id);
        Ok(updated)
    }
}

#[async_trait]
impl ProfileBackend for UserApi {
    async fn get_profile(&self) -> Result<UserProfile, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::PROFILE);

        info!("[UserAPI] 📡 请求用户资料");
        debug!("[UserAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[UserAPI] 用户资料请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let profile: UserProfile = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[UserAPI] 用户资料反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[UserAPI] ✅ 用户资料响应: {}", profile.email);
        Ok(profile)
    }
}
