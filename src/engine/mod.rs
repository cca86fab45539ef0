// ==========================================
// LTS 化验分析系统 - 引擎层
// ==========================================
// 职责: 规则表判定、报告文本规范化、报告组装
// 红线: 引擎无状态,不读写文件
// ==========================================

pub mod error;
pub mod report_assembler;
pub mod rule_table;
pub mod text_normalizer;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use report_assembler::{ReportAssembler, ReportSettings};
pub use rule_table::{module_spec, RuleTable};
pub use text_normalizer::normalize;
