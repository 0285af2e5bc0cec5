use std::path::PathBuf;
use std::time::Duration;

use crate::db::StoreBackend;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | STORE_BACKEND | json | 存储后端: json / memory / redb |
/// | DATA_DIR | data | `db.json` / `catalog.redb` 所在目录 |
/// | CACHE_TTL_MS | 15000 | 读缓存有效期(毫秒) |
/// | OFFLINE_FALLBACK | true | 存储不可达时使用 mock 数据 |
/// | CORS_ORIGIN | * | 允许的来源 (`*` = 任意) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | RATE_LIMIT_MAX | 300 | 每个客户端每窗口最大请求数 (0 = 不限流) |
/// | RATE_LIMIT_WINDOW_SECS | 60 | 限流窗口(秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 |
/// | LOG_JSON | false (production: true) | JSON 日志 |
/// | LOG_DIR | - | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// STORE_BACKEND=redb HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// Persistence backend
    pub store_backend: StoreBackend,
    /// Directory holding the store files
    pub data_dir: PathBuf,
    /// 读缓存有效期 (毫秒)
    pub cache_ttl_ms: u64,
    /// Serve mock data when the store is unreachable
    pub offline_fallback: bool,
    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// Requests per client and window, 0 disables limiting
    pub rate_limit_max: u32,
    /// 限流窗口 (秒)
    pub rate_limit_window_secs: u64,
    /// 运行环境: development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let log_json = env_flag("LOG_JSON").unwrap_or(environment == "production");

        Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(4000),
            store_backend: env_parse("STORE_BACKEND").unwrap_or(StoreBackend::Json),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            cache_ttl_ms: env_parse("CACHE_TTL_MS").unwrap_or(15_000),
            offline_fallback: env_flag("OFFLINE_FALLBACK").unwrap_or(true),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30_000),
            rate_limit_max: env_parse("RATE_LIMIT_MAX").unwrap_or(300),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS").unwrap_or(60),
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json,
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    /// In-memory configuration, independent of the process environment
    ///
    /// 常用于测试场景
    pub fn in_memory() -> Self {
        Self {
            http_port: 0,
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from("data"),
            cache_ttl_ms: 15_000,
            offline_fallback: true,
            cors_origin: "*".into(),
            request_timeout_ms: 30_000,
            rate_limit_max: 300,
            rate_limit_window_secs: 60,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_defaults() {
        let config = Config::in_memory();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.cache_ttl(), Duration::from_secs(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.rate_limit_max, 300);
        assert_eq!(config.rate_limit_window(), Duration::from_secs(60));
    }
}
