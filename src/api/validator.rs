// ==========================================
// LTS 化验分析系统 - 测量值校验器
// ==========================================
// 职责: 判定前检查测量值是否落在参数输入域内（表单数值框的取值范围）
// 规则: 一次收集全部违规,而不是遇到第一个就返回
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::analysis::Measurements;
use crate::domain::types::ModuleKind;
use crate::engine::rule_table::module_spec;

// ==========================================
// ViolationType - 违规类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    UnknownParameter,
    MissingParameter,
    NonNumeric,
    OutOfDomain,
}

impl ViolationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::UnknownParameter => "UNKNOWN_PARAMETER",
            ViolationType::MissingParameter => "MISSING_PARAMETER",
            ViolationType::NonNumeric => "NON_NUMERIC",
            ViolationType::OutOfDomain => "OUT_OF_DOMAIN",
        }
    }
}

// ==========================================
// RequestValidator - 测量值校验器
// ==========================================
pub struct RequestValidator {
    // 无状态校验器
}

impl RequestValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 收集全部违规
    pub fn collect_violations(
        &self,
        kind: ModuleKind,
        measurements: &Measurements,
    ) -> Vec<ValidationViolation> {
        let spec = module_spec(kind);
        let mut violations = Vec::new();

        for (key, _) in measurements.iter() {
            if spec.parameter(key).is_none() {
                violations.push(ValidationViolation {
                    violation_type: ViolationType::UnknownParameter.as_str().to_string(),
                    parameter: key.to_string(),
                    reason: format!("模块 {} 没有参数 {}", kind, key),
                    details: None,
                });
            }
        }

        for param in spec.parameters {
            let value = match measurements.get(param.key) {
                Some(value) => value,
                None => {
                    violations.push(ValidationViolation {
                        violation_type: ViolationType::MissingParameter.as_str().to_string(),
                        parameter: param.key.to_string(),
                        reason: format!("缺少参数 {}", param.key),
                        details: None,
                    });
                    continue;
                }
            };

            if !value.is_finite() {
                violations.push(ValidationViolation {
                    violation_type: ViolationType::NonNumeric.as_str().to_string(),
                    parameter: param.key.to_string(),
                    reason: format!("参数 {} 不是有效数值: {}", param.key, value),
                    details: None,
                });
            } else if !param.domain.contains(value) {
                violations.push(ValidationViolation {
                    violation_type: ViolationType::OutOfDomain.as_str().to_string(),
                    parameter: param.key.to_string(),
                    reason: format!("参数 {} 超出输入范围: {}", param.key, value),
                    details: Some(serde_json::json!({
                        "value": value,
                        "min": param.domain.min,
                        "max": param.domain.max,
                    })),
                });
            }
        }

        violations
    }

    /// 校验测量值
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::ValidationFailed): 带全部违规明细
    pub fn validate(&self, kind: ModuleKind, measurements: &Measurements) -> ApiResult<()> {
        let violations = self.collect_violations(kind, measurements);
        if violations.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            module = %kind,
            violations = violations.len(),
            "测量值校验未通过"
        );
        Err(ApiError::ValidationFailed {
            reason: format!("{}个参数未通过校验", violations.len()),
            violations,
        })
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}
