// ==========================================
// LTS 化验分析系统 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("锁获取失败: {0}")]
    Lock(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
