//! 收藏状态存储
//!
//! 缓存后端收藏数据的本地状态：读取同步、变更先走远端再回填本地。
//! `fetch_favorite_ids` 是首屏快速路径，只更新 ID 集合，
//! 详情列表 `favorites` 可能暂时落后于 ID 集合，消费方需容忍该偏差。
//! toggle 的本地更新以服务器返回的权威结果为准。

use crate::shop::error::RemoteError;
use crate::shop::favorite::api::FavoritesBackend;
use crate::shop::favorite::models::{FavoriteEntry, ToggleResult};
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

/// 收藏状态
#[derive(Debug, Default)]
struct FavoritesState {
    /// 收藏详情列表
    favorites: Vec<FavoriteEntry>,
    /// 已收藏的菜谱 ID（数组实现的成员集合）
    favorite_ids: Vec<i64>,
    /// 是否正在加载
    is_loading: bool,
    /// 最近一次读取失败的错误信息
    error: Option<String>,
}

/// 收藏存储
///
/// 并发约定：所有变更操作发起后各自落地，不做同键去重；
/// 同一 recipeId 的两次 toggle 同时在途时，后完成的响应生效。
pub struct FavoritesStore {
    backend: Arc<dyn FavoritesBackend>,
    state: RwLock<FavoritesState>,
}

impl FavoritesStore {
    /// 创建新的收藏存储
    pub fn new(backend: Arc<dyn FavoritesBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(FavoritesState::default()),
        }
    }

    /// 加载全部收藏（含详情）
    ///
    /// 成功时同时替换 `favorites` 和由其投影出的 `favorite_ids`；
    /// 失败时保留旧数据，只记录错误；加载标志在所有出口都会被清除。
    pub async fn fetch_favorites(&self) {
        {
            let mut s = self.state.write().unwrap();
            s.is_loading = true;
            s.error = None;
        }

        let result = self.backend.list().await;

        let mut s = self.state.write().unwrap();
        match result {
            Ok(entries) => {
                s.favorite_ids = entries.iter().map(|f| f.recipe_id).collect();
                s.favorites = entries;
                info!("[FavoritesStore] ✅ 收藏已加载，条目数: {}", s.favorites.len());
            }
            Err(e) => {
                s.error = Some(e.to_string());
                error!("[FavoritesStore] 加载收藏失败: {}", e);
            }
        }
        s.is_loading = false;
    }

    /// 只刷新收藏 ID 列表（轻量，首屏用）
    ///
    /// 不触碰 `is_loading` 和 `favorites`；失败只记日志，不改任何状态。
    pub async fn fetch_favorite_ids(&self) {
        match self.backend.list_ids().await {
            Ok(ids) => {
                let mut s = self.state.write().unwrap();
                s.favorite_ids = ids;
            }
            Err(e) => {
                warn!("[FavoritesStore] 加载收藏ID失败: {}", e);
            }
        }
    }

    /// 切换收藏状态
    ///
    /// 本地状态向服务器返回的 `ToggleResult` 对齐；
    /// 失败时不动本地状态，错误原样抛给调用方。
    pub async fn toggle_favorite(&self, recipe_id: i64) -> Result<ToggleResult, RemoteError> {
        let result = match self.backend.toggle(recipe_id).await {
            Ok(r) => r,
            Err(e) => {
                error!(
                    "[FavoritesStore] 切换收藏失败: recipeId={}, {}",
                    recipe_id, e
                );
                return Err(e);
            }
        };

        let mut s = self.state.write().unwrap();
        if result.is_favorite {
            if !s.favorite_ids.contains(&recipe_id) {
                s.favorite_ids.push(recipe_id);
            }
        } else {
            s.favorite_ids.retain(|&id| id != recipe_id);
            s.favorites.retain(|f| f.recipe_id != recipe_id);
        }
        info!(
            "[FavoritesStore] ✅ 收藏状态已更新: recipeId={}, isFavorite={}",
            recipe_id, result.is_favorite
        );
        Ok(result)
    }

    /// 添加收藏（先远端后本地，不做乐观预更新）
    pub async fn add_favorite(&self, recipe_id: i64) -> Result<FavoriteEntry, RemoteError> {
        let favorite = match self.backend.add(recipe_id).await {
            Ok(f) => f,
            Err(e) => {
                error!(
                    "[FavoritesStore] 添加收藏失败: recipeId={}, {}",
                    recipe_id, e
                );
                return Err(e);
            }
        };

        let mut s = self.state.write().unwrap();
        if !s.favorite_ids.contains(&recipe_id) {
            s.favorite_ids.push(recipe_id);
        }
        // 幂等插入：同一菜谱已有条目时用新条目替换
        s.favorites.retain(|f| f.recipe_id != recipe_id);
        s.favorites.push(favorite.clone());
        info!("[FavoritesStore] ✅ 收藏已添加: recipeId={}", recipe_id);
        Ok(favorite)
    }

    /// 移除收藏（先远端后本地）
    pub async fn remove_favorite(&self, recipe_id: i64) -> Result<(), RemoteError> {
        if let Err(e) = self.backend.remove(recipe_id).await {
            error!(
                "[FavoritesStore] 移除收藏失败: recipeId={}, {}",
                recipe_id, e
            );
            return Err(e);
        }

        let mut s = self.state.write().unwrap();
        s.favorite_ids.retain(|&id| id != recipe_id);
        s.favorites.retain(|f| f.recipe_id != recipe_id);
        info!("[FavoritesStore] ✅ 收藏已移除: recipeId={}", recipe_id);
        Ok(())
    }

    /// 重置全部状态（登出时调用），无 I/O，可重复调用
    pub fn clear_favorites(&self) {
        let mut s = self.state.write().unwrap();
        s.favorites.clear();
        s.favorite_ids.clear();
        s.is_loading = false;
        s.error = None;
    }

    /// 该菜谱是否已收藏
    pub fn is_favorite(&self, recipe_id: i64) -> bool {
        self.state.read().unwrap().favorite_ids.contains(&recipe_id)
    }

    /// 收藏数量
    pub fn count(&self) -> usize {
        self.state.read().unwrap().favorite_ids.len()
    }

    /// 按创建时间倒序的收藏列表（最新在前）
    ///
    /// 每次读取现算，不修改底层列表的顺序。
    pub fn sorted_favorites(&self) -> Vec<FavoriteEntry> {
        let mut list = self.state.read().unwrap().favorites.clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// 当前收藏详情列表（原始顺序）
    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.state.read().unwrap().favorites.clone()
    }

    /// 当前收藏 ID 列表
    pub fn favorite_ids(&self) -> Vec<i64> {
        self.state.read().unwrap().favorite_ids.clone()
    }

    /// 是否正在加载
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().is_loading
    }

    /// 最近一次读取失败的错误信息
    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }
}
