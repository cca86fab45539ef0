// ==========================================
// LTS 化验分析系统 - 参数规格
// ==========================================
// 职责: 参数验收规则与输入域定义
// 红线: 所有边界均为闭区间（等于边界值判定为合格）
// ==========================================

use crate::domain::types::ModuleKind;
use serde::Serialize;
use std::fmt;

// ==========================================
// AcceptanceRule - 验收规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptanceRule {
    /// value <= max
    AtMost { max: f64 },
    /// min <= value <= max
    Between { min: f64, max: f64 },
}

impl AcceptanceRule {
    /// 判定测量值是否合格（纯函数）
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            AcceptanceRule::AtMost { max } => value <= max,
            AcceptanceRule::Between { min, max } => min <= value && value <= max,
        }
    }
}

impl fmt::Display for AcceptanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptanceRule::AtMost { max } => write!(f, "<= {}", max),
            AcceptanceRule::Between { min, max } => write!(f, "{} - {}", min, max),
        }
    }
}

// ==========================================
// InputDomain - 输入域
// ==========================================
// 表单数值框的取值范围,由输入采集层校验
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputDomain {
    pub min: f64,
    pub max: Option<f64>,
}

impl InputDomain {
    /// 非负数
    pub const NON_NEGATIVE: InputDomain = InputDomain { min: 0.0, max: None };

    /// pH 标尺
    pub const PH_SCALE: InputDomain = InputDomain {
        min: 0.0,
        max: Some(14.0),
    };

    /// 质量百分比
    pub const PERCENT_WT: InputDomain = InputDomain {
        min: 0.0,
        max: Some(100.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min {
            return false;
        }
        match self.max {
            Some(max) => value <= max,
            None => true,
        }
    }
}

// ==========================================
// ParameterSpec - 参数规格
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    /// 稳定标识（i18n key / 导入表匹配）
    pub key: &'static str,
    /// 参数名称
    pub name: &'static str,
    /// 单位
    pub unit: &'static str,
    /// 验收规则
    pub rule: AcceptanceRule,
    /// 输入域
    pub domain: InputDomain,
}

impl ParameterSpec {
    /// 参数名称的 i18n key
    pub fn label_key(&self) -> String {
        format!("parameter.{}", self.key)
    }

    /// 规格说明文本,例如 "<= 2.1 ppm"
    pub fn acceptance_text(&self) -> String {
        format!("{} {}", self.rule, self.unit).trim_end().to_string()
    }
}

// ==========================================
// ModuleSpec - 模块规格
// ==========================================
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleSpec {
    pub kind: ModuleKind,
    /// 参数列表（顺序即报告顺序）
    pub parameters: &'static [ParameterSpec],
}

impl ModuleSpec {
    pub fn parameter(&self, key: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.parameters.iter().map(|p| p.key)
    }
}
