//! Catalog Server - 库存 / 商品目录服务
//!
//! # 架构概述
//!
//! - **查询服务** (`services`): 过滤、分页、统计, 带 TTL 读缓存
//! - **存储** (`db`): 可替换后端 (JSON 文件 / 内存 / redb), 带离线回退
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── services/      # 查询服务、读缓存、HTTP 组装
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、校验、日志
//! └── db/            # 存储后端
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use services::CatalogService;
pub use services::http::build_app;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境: `.env`, 日志
///
/// Must run inside the tokio runtime when `LOG_DIR` is set, the log
/// cleanup task is spawned on it.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )?;

    api::health::mark_started();
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
