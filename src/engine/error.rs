// ==========================================
// LTS 化验分析系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::ModuleKind;
use thiserror::Error;

/// 引擎层错误类型
///
/// 正常流程中输入采集层已完成校验,这些错误只在调用方跳过校验时出现
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("缺少参数: module={module}, parameter={parameter}")]
    MissingParameter {
        module: ModuleKind,
        parameter: String,
    },

    #[error("未知参数: module={module}, parameter={parameter}")]
    UnknownParameter {
        module: ModuleKind,
        parameter: String,
    },

    #[error("非数值输入: parameter={parameter}, value={value}")]
    NonNumeric { parameter: String, value: f64 },

    #[error("报告请求与判定结果的模块不一致: request={request}, results={results}")]
    ModuleMismatch {
        request: ModuleKind,
        results: ModuleKind,
    },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
