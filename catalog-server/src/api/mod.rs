//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口
//! - [`categories`] - 分类管理接口
//! - [`stats`] - 库存统计接口
//! - [`cache`] - 读缓存控制

pub mod cache;
pub mod categories;
pub mod health;
pub mod products;
pub mod stats;
