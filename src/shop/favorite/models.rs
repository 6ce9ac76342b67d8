//! 收藏本地模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 收藏条目（与后端 Favorite 字段对应）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: i64,
    #[serde(rename = "recipeId")]
    pub recipe_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// toggle 接口的权威返回结果
///
/// 本地状态必须向该结果对齐，而不是反过来。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleResult {
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
    #[serde(rename = "recipeId")]
    pub recipe_id: i64,
}
