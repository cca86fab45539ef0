// ==========================================
// LTS 化验分析系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供界面层 / 命令行调用
// ==========================================

pub mod analysis_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use analysis_api::{
    save_report, AnalysisApi, ModuleCatalogEntry, ParameterCatalogEntry, ReportInput, ResultRow,
    PDF_MIME,
};
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use validator::{RequestValidator, ViolationType};
