// ==========================================
// LTS 化验分析系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,把各层技术错误转换为界面可展示的错误消息
// 红线: 所有错误信息必须包含显式原因（参数名 / 行号 / 文件路径）
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::render::error::RenderError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 测量值校验失败（带全部违规明细）
    #[error("测量值校验失败: {reason}")]
    ValidationFailed {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 判定与报告错误
    // ==========================================
    #[error("判定失败: {0}")]
    EvaluationError(String),

    #[error("报告生成失败: {0}")]
    ReportError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("文件不存在: {0}")]
    NotFound(String),

    // ==========================================
    // 配置与文件错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("文件写出失败: {0}")]
    IoError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MissingParameter { .. }
            | EngineError::UnknownParameter { .. }
            | EngineError::NonNumeric { .. } => ApiError::InvalidInput(err.to_string()),
            EngineError::ModuleMismatch { .. } => ApiError::ReportError(err.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(path),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 RenderError 转换
// ==========================================
impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(e) => ApiError::IoError(e.to_string()),
            other => ApiError::ReportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::IoError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 违规类型（UNKNOWN_PARAMETER / MISSING_PARAMETER / NON_NUMERIC / OUT_OF_DOMAIN）
    pub violation_type: String,
    /// 参数 key
    pub parameter: String,
    /// 违规原因
    pub reason: String,
    /// 额外信息（可选）
    pub details: Option<serde_json::Value>,
}
