// ==========================================
// LTS 化验分析系统 - 核心库
// ==========================================
// 场景: LTS 天然气处理厂化验室数据录入与合规判定
// 流程: 测量值 -> 规则表逐参数判定 -> 报告组装 -> PDF 字节流
// 系统定位: 无状态,每次操作独立完成,不保存历史数据
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 模块 / 参数规格 / 判定结果 / 报告实体
pub mod domain;

// 引擎层 - 规则表 / 文本规范化 / 报告组装
pub mod engine;

// 渲染层 - PDF / 纯文本
pub mod render;

// 导入层 - 化验样品表
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ModuleKind, Verdict};

// 领域实体
pub use domain::{
    AnalysisResult, Measurements, ModuleRequest, ModuleSpec, ParameterOutcome, ParameterSpec,
    RenderedReport, Report, ReportRequest,
};

// 引擎
pub use engine::{ReportAssembler, ReportSettings, RuleTable};

// 渲染
pub use render::{PdfRenderer, TextRenderer};

// API
pub use api::{AnalysisApi, ApiError, ApiResult, ReportInput};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "LTS Lab Analyzer";
