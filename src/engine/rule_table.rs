// ==========================================
// LTS 化验分析系统 - 规则表引擎
// ==========================================
// 职责: (模块, 参数) -> 验收规则 的静态映射,逐参数判定
// 输入: 模块 + 测量值
// 输出: AnalysisResult (逐参数 "<值> - <标记>" + 布尔判定)
// 红线: 纯函数,无隐藏状态;所有边界闭区间
// ==========================================

use crate::domain::analysis::{AnalysisResult, Measurements, ParameterOutcome};
use crate::domain::parameter::{AcceptanceRule, InputDomain, ModuleSpec, ParameterSpec};
use crate::domain::sample::ModuleRequest;
use crate::domain::types::{ModuleKind, Verdict};
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// 规格表
// ==========================================

const NATURAL_GAS: &[ParameterSpec] = &[
    ParameterSpec {
        key: "h2s",
        name: "H₂S",
        unit: "ppm",
        rule: AcceptanceRule::AtMost { max: 2.1 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "co2",
        name: "CO₂",
        unit: "%",
        rule: AcceptanceRule::AtMost { max: 2.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
];

const GASOLINE: &[ParameterSpec] = &[
    ParameterSpec {
        key: "tvr",
        name: "TVR",
        unit: "psia",
        rule: AcceptanceRule::AtMost { max: 12.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "salts",
        name: "Salts",
        unit: "mg/m²",
        rule: AcceptanceRule::AtMost { max: 100.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "water_sediment",
        name: "Water & Sediment",
        unit: "%",
        rule: AcceptanceRule::AtMost { max: 1.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
];

const MEG: &[ParameterSpec] = &[
    ParameterSpec {
        key: "ph",
        name: "pH",
        unit: "",
        rule: AcceptanceRule::Between { min: 6.5, max: 8.0 },
        domain: InputDomain::PH_SCALE,
    },
    ParameterSpec {
        key: "concentration",
        name: "Concentration",
        unit: "%wt",
        rule: AcceptanceRule::Between {
            min: 60.0,
            max: 84.0,
        },
        domain: InputDomain::PERCENT_WT,
    },
    ParameterSpec {
        key: "chlorides",
        name: "Chlorides",
        unit: "ppm",
        rule: AcceptanceRule::AtMost { max: 50.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
];

const TEG: &[ParameterSpec] = &[
    ParameterSpec {
        key: "ph",
        name: "pH",
        unit: "",
        rule: AcceptanceRule::Between { min: 6.5, max: 8.5 },
        domain: InputDomain::PH_SCALE,
    },
    ParameterSpec {
        key: "concentration",
        name: "Concentration",
        unit: "%wt",
        rule: AcceptanceRule::Between {
            min: 99.0,
            max: 100.0,
        },
        domain: InputDomain::PERCENT_WT,
    },
    ParameterSpec {
        key: "chlorides",
        name: "Chlorides",
        unit: "ppm",
        rule: AcceptanceRule::AtMost { max: 50.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
];

const DEMIN_WATER: &[ParameterSpec] = &[ParameterSpec {
    key: "chlorides",
    name: "Chlorides",
    unit: "ppm",
    rule: AcceptanceRule::AtMost { max: 10.0 },
    domain: InputDomain::NON_NEGATIVE,
}];

const AMINES: &[ParameterSpec] = &[
    ParameterSpec {
        key: "concentration",
        name: "Concentration",
        unit: "%wt",
        rule: AcceptanceRule::Between {
            min: 48.0,
            max: 52.0,
        },
        domain: InputDomain::PERCENT_WT,
    },
    ParameterSpec {
        key: "chlorides_amine",
        name: "Chlorides in amine",
        unit: "ppm",
        rule: AcceptanceRule::AtMost { max: 1000.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "chlorides_boiler",
        name: "Chlorides in boiler",
        unit: "ppm",
        rule: AcceptanceRule::AtMost { max: 10.0 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "lean_loading",
        name: "Lean acid loading",
        unit: "mol/mol",
        rule: AcceptanceRule::AtMost { max: 0.025 },
        domain: InputDomain::NON_NEGATIVE,
    },
    ParameterSpec {
        key: "rich_loading",
        name: "Rich acid loading",
        unit: "mol/mol",
        rule: AcceptanceRule::AtMost { max: 0.45 },
        domain: InputDomain::NON_NEGATIVE,
    },
];

static MODULE_SPECS: [ModuleSpec; 6] = [
    ModuleSpec {
        kind: ModuleKind::NaturalGas,
        parameters: NATURAL_GAS,
    },
    ModuleSpec {
        kind: ModuleKind::StabilizedGasoline,
        parameters: GASOLINE,
    },
    ModuleSpec {
        kind: ModuleKind::Meg,
        parameters: MEG,
    },
    ModuleSpec {
        kind: ModuleKind::Teg,
        parameters: TEG,
    },
    ModuleSpec {
        kind: ModuleKind::DemineralizedWater,
        parameters: DEMIN_WATER,
    },
    ModuleSpec {
        kind: ModuleKind::Amines,
        parameters: AMINES,
    },
];

// ==========================================
// RuleTable - 规则表引擎
// ==========================================
pub struct RuleTable {
    // 无状态引擎,规格表为进程级常量
}

impl RuleTable {
    pub fn new() -> Self {
        Self {}
    }

    /// 模块规格
    pub fn spec(&self, kind: ModuleKind) -> &'static ModuleSpec {
        module_spec(kind)
    }

    /// 全部模块规格（页签顺序）
    pub fn modules(&self) -> &'static [ModuleSpec] {
        &MODULE_SPECS
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 逐参数判定
    ///
    /// # 参数
    /// - `kind`: 模块
    /// - `measurements`: 测量值（必须覆盖模块全部参数,且不含多余参数）
    ///
    /// # 返回
    /// AnalysisResult,顺序与模块参数列表一致
    ///
    /// # 错误
    /// - UnknownParameter / MissingParameter: 参数集合与模块不符
    /// - NonNumeric: NaN 或无穷大
    pub fn evaluate(
        &self,
        kind: ModuleKind,
        measurements: &Measurements,
    ) -> EngineResult<AnalysisResult> {
        let spec = self.spec(kind);

        if let Some((unknown, _)) = measurements
            .iter()
            .find(|(key, _)| spec.parameter(key).is_none())
        {
            return Err(EngineError::UnknownParameter {
                module: kind,
                parameter: unknown.to_string(),
            });
        }

        let mut outcomes = Vec::with_capacity(spec.parameters.len());
        for param in spec.parameters {
            let value = measurements
                .get(param.key)
                .ok_or_else(|| EngineError::MissingParameter {
                    module: kind,
                    parameter: param.key.to_string(),
                })?;

            if !value.is_finite() {
                return Err(EngineError::NonNumeric {
                    parameter: param.key.to_string(),
                    value,
                });
            }

            let verdict = Verdict::from_passed(param.rule.accepts(value));
            tracing::debug!(
                module = %kind,
                parameter = param.key,
                value,
                rule = %param.rule,
                verdict = %verdict,
                "参数判定"
            );
            outcomes.push(ParameterOutcome::new(
                param.key, param.name, param.unit, value, verdict,
            ));
        }

        let result = AnalysisResult {
            module: kind,
            outcomes,
        };
        tracing::info!(
            module = %kind,
            parameters = result.len(),
            failed = result.failed_count(),
            "化验判定完成"
        );
        Ok(result)
    }

    /// 按请求对象判定
    pub fn evaluate_request(&self, request: ModuleRequest) -> EngineResult<AnalysisResult> {
        self.evaluate(request.kind(), &request.measurements())
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 查询模块规格
pub fn module_spec(kind: ModuleKind) -> &'static ModuleSpec {
    match kind {
        ModuleKind::NaturalGas => &MODULE_SPECS[0],
        ModuleKind::StabilizedGasoline => &MODULE_SPECS[1],
        ModuleKind::Meg => &MODULE_SPECS[2],
        ModuleKind::Teg => &MODULE_SPECS[3],
        ModuleKind::DemineralizedWater => &MODULE_SPECS[4],
        ModuleKind::Amines => &MODULE_SPECS[5],
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_module_kind() {
        let table = RuleTable::new();
        for (spec, kind) in table.modules().iter().zip(ModuleKind::ALL) {
            assert_eq!(spec.kind, kind);
            assert!(std::ptr::eq(table.spec(kind), spec));
        }
    }

    #[test]
    fn test_parameter_keys_unique_per_module() {
        for spec in RuleTable::new().modules() {
            let mut keys: Vec<&str> = spec.keys().collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), total, "{} 存在重复参数", spec.kind);
        }
    }

    #[test]
    fn test_thresholds_lie_inside_input_domain() {
        for spec in RuleTable::new().modules() {
            for param in spec.parameters {
                let (min, max) = match param.rule {
                    AcceptanceRule::AtMost { max } => (param.domain.min, max),
                    AcceptanceRule::Between { min, max } => (min, max),
                };
                assert!(param.domain.contains(min), "{}.{}", spec.kind, param.key);
                assert!(param.domain.contains(max), "{}.{}", spec.kind, param.key);
            }
        }
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let m = Measurements::new()
            .with("h2s", 1.0)
            .with("co2", 1.0)
            .with("ph", 7.0);
        let err = RuleTable::new()
            .evaluate(ModuleKind::NaturalGas, &m)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownParameter {
                module: ModuleKind::NaturalGas,
                parameter: "ph".to_string()
            }
        );
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let m = Measurements::new().with("h2s", 1.0);
        let err = RuleTable::new()
            .evaluate(ModuleKind::NaturalGas, &m)
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingParameter { parameter, .. } if parameter == "co2"));
    }

    #[test]
    fn test_nan_rejected() {
        let m = Measurements::new().with("chlorides", f64::NAN);
        let err = RuleTable::new()
            .evaluate(ModuleKind::DemineralizedWater, &m)
            .unwrap_err();
        assert!(matches!(err, EngineError::NonNumeric { .. }));
    }

    #[test]
    fn test_outcomes_follow_spec_order_not_input_order() {
        let m = Measurements::new()
            .with("chlorides", 10.0)
            .with("ph", 7.0)
            .with("concentration", 70.0);
        let result = RuleTable::new().evaluate(ModuleKind::Meg, &m).unwrap();
        let keys: Vec<&str> = result.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["ph", "concentration", "chlorides"]);
    }
}
