//! 商品目录模块
//!
//! 实现商品/菜谱/分类的读取接口与管理端的商品维护接口

pub mod api;
pub mod models;

// 重新导出主要类型
pub use api::{CatalogApi, ProductFilter};
pub use models::{Category, Product, Recipe};
