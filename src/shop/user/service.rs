//! 用户资料存储
//!
//! 持有当前会话的用户资料并派生管理员标志。
//! 加载状态通过 watch 通道对外发布，管理员守卫据此等待加载结束，
//! 取代按固定间隔轮询加载标志的做法。

use crate::shop::user::api::ProfileBackend;
use crate::shop::user::models::{Role, UserProfile};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::{error, info};

/// 用户资料状态
#[derive(Debug, Default)]
struct ProfileState {
    profile: Option<UserProfile>,
    error: Option<String>,
}

/// 用户资料存储
///
/// 不变式：`profile` 为空时 `is_admin` 和 `is_logged_in` 一定为 false。
pub struct ProfileStore {
    backend: Arc<dyn ProfileBackend>,
    state: RwLock<ProfileState>,
    loading_tx: watch::Sender<bool>,
}

impl ProfileStore {
    /// 创建新的用户资料存储
    pub fn new(backend: Arc<dyn ProfileBackend>) -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            backend,
            state: RwLock::new(ProfileState::default()),
            loading_tx,
        }
    }

    /// 从后端加载用户资料
    ///
    /// 失败时清空 `profile` 并记录错误信息；加载标志在所有出口都会被清除。
    pub async fn fetch_profile(&self) {
        self.loading_tx.send_replace(true);
        {
            let mut s = self.state.write().unwrap();
            s.error = None;
        }

        let result = self.backend.get_profile().await;

        {
            let mut s = self.state.write().unwrap();
            match result {
                Ok(profile) => {
                    info!("[ProfileStore] ✅ 用户资料已加载: {}", profile.email);
                    s.profile = Some(profile);
                }
                Err(e) => {
                    s.profile = None;
                    s.error = Some(e.to_string());
                    error!("[ProfileStore] 加载用户资料失败: {}", e);
                }
            }
        }
        self.loading_tx.send_replace(false);
    }

    /// 重置资料（登出时调用），无 I/O
    pub fn clear_profile(&self) {
        let mut s = self.state.write().unwrap();
        s.profile = None;
        s.error = None;
    }

    /// 当前用户是否为管理员
    pub fn is_admin(&self) -> bool {
        self.state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map(|p| p.role == Role::Admin)
            .unwrap_or(false)
    }

    /// 是否已登录（资料已加载）
    pub fn is_logged_in(&self) -> bool {
        self.state.read().unwrap().profile.is_some()
    }

    /// 显示名称，未登录时为空字符串
    pub fn user_name(&self) -> String {
        self.state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    /// 邮箱地址，未登录时为空字符串
    pub fn user_email(&self) -> String {
        self.state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map(|p| p.email.clone())
            .unwrap_or_default()
    }

    /// 当前资料副本
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().unwrap().profile.clone()
    }

    /// 最近一次加载失败的错误信息
    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    /// 是否正在加载
    pub fn is_loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    /// 等待当前加载结束；未在加载中时立即返回
    pub async fn wait_until_loaded(&self) {
        let mut rx = self.loading_tx.subscribe();
        loop {
            if !*rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::error::RemoteError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 脚本化的资料后端
    struct ScriptedProfileBackend {
        resps: Mutex<Vec<Result<UserProfile, RemoteError>>>,
    }

    impl ScriptedProfileBackend {
        fn with(resp: Result<UserProfile, RemoteError>) -> Arc<Self> {
            Arc::new(Self {
                resps: Mutex::new(vec![resp]),
            })
        }
    }

    #[async_trait]
    impl ProfileBackend for ScriptedProfileBackend {
        async fn get_profile(&self) -> Result<UserProfile, RemoteError> {
            self.resps.lock().unwrap().pop().expect("无预设资料响应")
        }
    }

    fn admin_profile() -> UserProfile {
        UserProfile {
            id: 1,
            name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            role: Role::Admin,
            oauth_id: "auth0|admin".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_profile_success_derives_admin_flag() {
        let store = ProfileStore::new(ScriptedProfileBackend::with(Ok(admin_profile())));

        store.fetch_profile().await;

        assert!(store.is_logged_in());
        assert!(store.is_admin());
        assert_eq!(store.user_name(), "Anna");
        assert_eq!(store.user_email(), "anna@example.com");
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn fetch_profile_failure_clears_profile() {
        let store = ProfileStore::new(ScriptedProfileBackend::with(Err(RemoteError::Http {
            status: 401,
            message: "Unauthorized".to_string(),
        })));

        store.fetch_profile().await;

        // profile 为空时派生值必须全部回落
        assert!(!store.is_logged_in());
        assert!(!store.is_admin());
        assert_eq!(store.user_name(), "");
        assert_eq!(store.user_email(), "");
        assert!(store.error().unwrap().contains("401"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn clear_profile_resets_and_is_idempotent() {
        let store = ProfileStore::new(ScriptedProfileBackend::with(Ok(admin_profile())));

        store.fetch_profile().await;
        store.clear_profile();
        assert!(!store.is_logged_in());
        assert!(!store.is_admin());

        store.clear_profile();
        assert!(!store.is_logged_in());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn wait_until_loaded_returns_immediately_when_idle() {
        let store = ProfileStore::new(ScriptedProfileBackend::with(Ok(admin_profile())));
        // 没有在途加载时不等待
        store.wait_until_loaded().await;
        assert!(!store.is_loading());
    }
}
