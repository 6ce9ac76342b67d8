//! 用户（资料与管理）模块
//!
//! 实现当前用户资料的加载缓存与管理端的用户维护接口

pub mod api;
pub mod models;
pub mod service;

// 重新导出主要类型
pub use api::{ProfileBackend, UserApi};
pub use models::{Role, UserProfile};
pub use service::ProfileStore;
