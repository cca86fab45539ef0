// ==========================================
// LTS 化验分析系统 - 领域模型层
// ==========================================
// 职责: 定义模块、参数规格、判定结果、报告实体
// 红线: 不含文件访问逻辑,不含渲染逻辑
// ==========================================

pub mod analysis;
pub mod parameter;
pub mod report;
pub mod sample;
pub mod types;

// 重导出核心类型
pub use analysis::{format_measurement, AnalysisResult, Measurements, ParameterOutcome};
pub use parameter::{AcceptanceRule, InputDomain, ModuleSpec, ParameterSpec};
pub use report::{RenderedReport, Report, ReportRequest, ReportSection, SectionBody, SectionKind};
pub use sample::{
    AminesSample, DeminWaterSample, GasolineSample, MegSample, ModuleRequest, NaturalGasSample,
    TegSample,
};
pub use types::{ModuleKind, Verdict};
