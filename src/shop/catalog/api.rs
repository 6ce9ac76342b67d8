//! 商品/分类 HTTP API 客户端
//!
//! 商品读取接口公开，管理端的增删改需要 Bearer 认证

use crate::shop::auth::TokenProvider;
use crate::shop::catalog::models::{Category, Product};
use crate::shop::constants::endpoints;
use crate::shop::error::RemoteError;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 商品列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// 按名称搜索
    pub name: Option<String>,
    /// 按分类过滤
    pub category: Option<Category>,
}

/// 商品目录相关的 HTTP API 客户端
pub struct CatalogApi {
    client: reqwest::Client,
    api_base_url: String,
    token_provider: Arc<dyn TokenProvider>,
}

impl CatalogApi {
    /// 创建新的商品目录 API 客户端
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

    /// 查询商品列表（可选名称/分类过滤，无需认证）
    pub async fn get_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::PRODUCTS);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(name) = &filter.name {
            params.push(("name", name.clone()));
        }
        if let Some(category) = filter.category {
            params.push(("category", category.as_str().to_string()));
        }

        info!("[CatalogAPI] 📡 请求商品列表");
        debug!("[CatalogAPI]   请求URL: {}, 过滤条件: {:?}", url, filter);

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 商品列表请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[CatalogAPI] 商品列表反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[CatalogAPI] ✅ 商品列表响应，条目数: {}", products.len());
        Ok(products)
    }

    /// 按 ID 查询单个商品（无需认证）
    pub async fn get_product(&self, id: i64) -> Result<Product, RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::PRODUCTS, id);

        info!("[CatalogAPI] 📡 请求商品详情: id={}", id);
        debug!("[CatalogAPI]   请求URL: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 商品详情请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let product: Product = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[CatalogAPI] 商品详情反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[CatalogAPI] ✅ 商品详情响应: {}", product.title);
        Ok(product)
    }

    /// 创建商品（管理端）
    pub async fn create_product(&self, product: &Product) -> Result<Product, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::PRODUCTS);

        info!("[CatalogAPI] 📡 创建商品: {}", product.title);
        debug!("[CatalogAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .json(product)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 创建商品请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let created: Product = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[CatalogAPI] 创建商品反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[CatalogAPI] ✅ 商品已创建: id={:?}", created.id);
        Ok(created)
    }

    /// 更新商品（管理端）
    pub async fn update_product(&self, id: i64, product: &Product) -> Result<Product, RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::PRODUCTS, id);

        info!("[CatalogAPI] 📡 更新商品: id={}", id);
        debug!("[CatalogAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .json(product)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 更新商品请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let updated: Product = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[CatalogAPI] 更新商品反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[CatalogAPI] ✅ 商品已更新: id={}", id);
        Ok(updated)
    }

    /// 删除商品（管理端），成功时响应体可能为空
    pub async fn delete_product(&self, id: i64) -> Result<(), RemoteError> {
        let url = format!("{}{}/{}", self.api_base_url, endpoints::PRODUCTS, id);

        info!("[CatalogAPI] 📡 删除商品: id={}", id);
        debug!("[CatalogAPI]   请求URL: {}", url);

        let token = self.bearer().await?;
        let response = self.client.delete(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 删除商品请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        info!("[CatalogAPI] ✅ 商品已删除: id={}", id);
        Ok(())
    }

    /// 查询全部分类（无需认证）
    pub async fn get_categories(&self) -> Result<Vec<Category>, RemoteError> {
        let url = format!("{}{}", self.api_base_url, endpoints::CATEGORIES);

        info!("[CatalogAPI] 📡 请求分类列表");
        debug!("[CatalogAPI]   请求URL: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "[CatalogAPI] 分类列表请求失败，HTTP状态: {}, 响应: {}",
                status, body
            );
            return Err(RemoteError::from_response(status, &body));
        }

        let categories: Vec<Category> = serde_json::from_str(&body).map_err(|e| {
            error!(
                "[CatalogAPI] 分类列表反序列化失败: {:?}\n原始响应: {}",
                e, body
            );
            RemoteError::Decode(e.to_string())
        })?;

        info!("[CatalogAPI] ✅ 分类列表响应，条目数: {}", categories.len());
        Ok(categories)
    }
}
