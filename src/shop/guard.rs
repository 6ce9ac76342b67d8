//! 管理员导航守卫
//!
//! 进入管理端路由前的一次性异步检查：身份校验 → 有界等待资料加载 → 授权判定。
//! 等待超时不报错，直接用当前值判定（fail-closed，资料未就绪时即拒绝）。

use crate::shop::constants::timing;
use crate::shop::user::service::ProfileStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行
    Allow,
    /// 未登录，跳转身份提供商登录页
    RedirectLogin,
    /// 已登录但无权限，跳转首页
    RedirectHome,
}

/// 身份校验（外部协作方，例如 Auth0 的登录检查）
#[async_trait]
pub trait IdentityCheck: Send + Sync {
    /// 返回 `Allow` 或校验方自带的重定向决定
    async fn check(&self) -> GuardDecision;
}

/// 守卫事件监听器（可由调用方注册）
///
/// 拒绝访问必须给用户一个阻断式提示，绝不能静默失败。
#[async_trait]
pub trait GuardListener: Send + Sync {
    /// 授权判定失败时回调，message 为面向用户的提示文案
    async fn on_access_denied(&self, message: String);
}

/// 空监听器
pub struct EmptyGuardListener;

#[async_trait]
impl GuardListener for EmptyGuardListener {
    async fn on_access_denied(&self, _message: String) {}
}

/// 管理员守卫
pub struct AdminGuard {
    identity: Arc<dyn IdentityCheck>,
    profile_store: Arc<ProfileStore>,
    listener: Arc<dyn GuardListener>,
    wait_budget: Duration,
}

impl AdminGuard {
    /// 创建新的管理员守卫（默认等待预算，空监听器）
    pub fn new(identity: Arc<dyn IdentityCheck>, profile_store: Arc<ProfileStore>) -> Self {
        Self {
            identity,
            profile_store,
            listener: Arc::new(EmptyGuardListener),
            wait_budget: Duration::from_millis(timing::ADMIN_GUARD_TIMEOUT_MS),
        }
    }

    /// 注册守卫监听器
    pub fn with_listener(mut self, listener: Arc<dyn GuardListener>) -> Self {
        self.listener = listener;
        self
    }

    /// 覆盖等待资料加载的最长时间
    pub fn with_wait_budget(mut self, wait_budget: Duration) -> Self {
        self.wait_budget = wait_budget;
        self
    }

    /// 进入管理端路由前调用
    pub async fn before_enter(&self) -> GuardDecision {
        // 第一步：身份校验，拒绝时直接带出它的重定向决定
        match self.identity.check().await {
            GuardDecision::Allow => {}
            other => {
                info!("[AdminGuard] 身份校验未通过: {:?}", other);
                return other;
            }
        }

        // 第二步：有界等待资料加载结束；超时不报错，继续用当前值判定
        if tokio::time::timeout(self.wait_budget, self.profile_store.wait_until_loaded())
            .await
            .is_err()
        {
            warn!(
                "[AdminGuard] ⏰ 等待用户资料加载超时（{}ms），按当前状态判定",
                self.wait_budget.as_millis()
            );
        }

        // 第三步：授权判定
        if self.profile_store.is_admin() {
            debug!("[AdminGuard] ✅ 管理员校验通过");
            GuardDecision::Allow
        } else {
            let message = "访问被拒绝：该页面仅限管理员访问。".to_string();
            warn!("[AdminGuard] ❌ {}", message);
            self.listener.on_access_denied(message).await;
            GuardDecision::RedirectHome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::error::RemoteError;
    use crate::shop::user::api::ProfileBackend;
    use crate::shop::user::models::{Role, UserProfile};
    use std::sync::Mutex;
    use tokio::time::{sleep, Instant};

    struct AlwaysLoggedIn;

    #[async_trait]
    impl IdentityCheck for AlwaysLoggedIn {
        async fn check(&self) -> GuardDecision {
            GuardDecision::Allow
        }
    }

    struct NotLoggedIn;

    #[async_trait]
    impl IdentityCheck for NotLoggedIn {
        async fn check(&self) -> GuardDecision {
            GuardDecision::RedirectLogin
        }
    }

    /// 记录拒绝提示的监听器
    #[derive(Default)]
    struct RecordingListener {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GuardListener for RecordingListener {
        async fn on_access_denied(&self, message: String) {
            self.messages.lock().unwrap().push(message);
        }
    }

    /// 延迟指定毫秒后返回资料的后端
    struct SlowProfileBackend {
        delay_ms: u64,
        role: Role,
    }

    #[async_trait]
    impl ProfileBackend for SlowProfileBackend {
        async fn get_profile(&self) -> Result<UserProfile, RemoteError> {
            sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(UserProfile {
                id: 1,
                name: "Anna".to_string(),
                email: "anna@example.com".to_string(),
                role: self.role,
                oauth_id: "auth0|abc".to_string(),
            })
        }
    }

    /// 启动一次在途的资料加载，并等它把加载标志置起来
    async fn spawn_fetch(store: &Arc<ProfileStore>) {
        let store2 = store.clone();
        tokio::spawn(async move { store2.fetch_profile().await });
        sleep(Duration::from_millis(1)).await;
        assert!(store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn guard_allows_promptly_when_profile_loads_fast() {
        let store = Arc::new(ProfileStore::new(Arc::new(SlowProfileBackend {
            delay_ms: 50,
            role: Role::Admin,
        })));
        spawn_fetch(&store).await;

        let guard = AdminGuard::new(Arc::new(AlwaysLoggedIn), store);
        let start = Instant::now();
        let decision = guard.before_enter().await;
        let elapsed = start.elapsed();

        assert_eq!(decision, GuardDecision::Allow);
        // 加载 50ms 就结束，守卫不会把 2000ms 预算耗完
        assert!(elapsed < Duration::from_millis(100), "elapsed={:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn guard_fails_closed_when_budget_is_exhausted() {
        // 加载 2500ms 才结束，超过 2000ms 预算
        let store = Arc::new(ProfileStore::new(Arc::new(SlowProfileBackend {
            delay_ms: 2500,
            role: Role::Regular,
        })));
        spawn_fetch(&store).await;

        let listener = Arc::new(RecordingListener::default());
        let guard = AdminGuard::new(Arc::new(AlwaysLoggedIn), store.clone())
            .with_listener(listener.clone());
        let start = Instant::now();
        let decision = guard.before_enter().await;
        let elapsed = start.elapsed();

        // 预算耗尽即判定，不等满 2500ms；此时资料仍未加载 → 拒绝
        assert_eq!(decision, GuardDecision::RedirectHome);
        assert!(elapsed >= Duration::from_millis(2000), "elapsed={:?}", elapsed);
        assert!(elapsed < Duration::from_millis(2500), "elapsed={:?}", elapsed);
        assert_eq!(listener.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn guard_short_circuits_on_identity_denial() {
        let store = Arc::new(ProfileStore::new(Arc::new(SlowProfileBackend {
            delay_ms: 2500,
            role: Role::Admin,
        })));
        spawn_fetch(&store).await;

        let guard = AdminGuard::new(Arc::new(NotLoggedIn), store);
        let start = Instant::now();
        let decision = guard.before_enter().await;

        // 身份校验拒绝时直接返回，不进入等待
        assert_eq!(decision, GuardDecision::RedirectLogin);
        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn guard_denies_immediately_without_inflight_load() {
        let store = Arc::new(ProfileStore::new(Arc::new(SlowProfileBackend {
            delay_ms: 0,
            role: Role::Regular,
        })));

        let listener = Arc::new(RecordingListener::default());
        let guard = AdminGuard::new(Arc::new(AlwaysLoggedIn), store)
            .with_listener(listener.clone());
        let start = Instant::now();
        let decision = guard.before_enter().await;

        // 没有在途加载、也没有资料：立即拒绝并带用户提示
        assert_eq!(decision, GuardDecision::RedirectHome);
        assert!(start.elapsed() < Duration::from_millis(10));
        assert!(!listener.messages.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn guard_allows_admin_after_load_already_finished() {
        let store = Arc::new(ProfileStore::new(Arc::new(SlowProfileBackend {
            delay_ms: 0,
            role: Role::Admin,
        })));
        store.fetch_profile().await;

        let guard = AdminGuard::new(Arc::new(AlwaysLoggedIn), store);
        assert_eq!(guard.before_enter().await, GuardDecision::Allow);
    }
}
