//! 访问令牌提供者
//!
//! 身份提供商（Auth0 等）作为外部协作方，SDK 只通过该 trait 按需取令牌。
//! 每次请求都重新获取，令牌缓存由提供方自己负责。

use crate::shop::error::RemoteError;
use async_trait::async_trait;

/// 访问令牌提供者
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// 获取当前用户的访问令牌，可能较慢或失败
    async fn access_token(&self) -> Result<String, RemoteError>;
}

/// 固定令牌提供者（CLI 和测试用）
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// 用已有令牌创建提供者
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, RemoteError> {
        Ok(self.token.clone())
    }
}
