// ==========================================
// LTS 化验分析系统 - 测量值与判定结果
// ==========================================
// 职责: 一次判定的输入（Measurements）与输出（AnalysisResult）
// 生命周期: 每次点击"分析"创建,生成报告后丢弃,不持久化
// ==========================================

use crate::domain::types::{ModuleKind, Verdict};
use serde::{Deserialize, Serialize};

// ==========================================
// Measurements - 测量值（保持录入顺序）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    entries: Vec<MeasurementEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub key: String,
    pub value: f64,
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入测量值,同名参数覆盖并返回旧值（保持原位置）
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            let old = entry.value;
            entry.value = value;
            return Some(old);
        }
        self.entries.push(MeasurementEntry { key, value });
        None
    }

    /// 链式写入
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Measurements {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut measurements = Measurements::new();
        for (key, value) in iter {
            measurements.insert(key, value);
        }
        measurements
    }
}

// ==========================================
// ParameterOutcome - 单参数判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOutcome {
    pub key: String,
    pub name: String,
    pub unit: String,
    pub value: f64,
    pub verdict: Verdict,
    /// "<value> - <标记>"
    pub formatted: String,
}

impl ParameterOutcome {
    pub fn new(key: &str, name: &str, unit: &str, value: f64, verdict: Verdict) -> Self {
        let formatted = format!("{} - {}", format_measurement(value), verdict.mark());
        Self {
            key: key.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            value,
            verdict,
            formatted,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.passed()
    }
}

// ==========================================
// AnalysisResult - 模块判定结果
// ==========================================
// 无模块级汇总结论,只有逐参数判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub module: ModuleKind,
    pub outcomes: Vec<ParameterOutcome>,
}

impl AnalysisResult {
    pub fn get(&self, key: &str) -> Option<&ParameterOutcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterOutcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    /// 界面结果表格（列: 参数, 值）,行顺序与参数列表一致
    pub fn results_table(&self) -> Vec<(String, String)> {
        self.outcomes
            .iter()
            .map(|o| {
                let label = if o.unit.is_empty() {
                    o.name.clone()
                } else {
                    format!("{} ({})", o.name, o.unit)
                };
                (label, o.formatted.clone())
            })
            .collect()
    }
}

/// 测量值格式化
///
/// 与表单数值框的显示一致: 整数值保留一位小数（2.0、70.0）,
/// 其余按最短表示输出（2.1、0.0251）。
pub fn format_measurement(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_measurement() {
        assert_eq!(format_measurement(2.0), "2.0");
        assert_eq!(format_measurement(70.0), "70.0");
        assert_eq!(format_measurement(2.1), "2.1");
        assert_eq!(format_measurement(0.0251), "0.0251");
        assert_eq!(format_measurement(1000.0), "1000.0");
    }

    #[test]
    fn test_measurements_keep_insertion_order() {
        let m = Measurements::new()
            .with("ph", 7.0)
            .with("concentration", 70.0)
            .with("chlorides", 50.0);
        let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ph", "concentration", "chlorides"]);
    }

    #[test]
    fn test_measurements_overwrite_keeps_position() {
        let mut m = Measurements::new().with("h2s", 1.0).with("co2", 1.5);
        assert_eq!(m.insert("h2s", 2.5), Some(1.0));
        assert_eq!(m.len(), 2);
        assert_eq!(m.iter().next(), Some(("h2s", 2.5)));
    }

    #[test]
    fn test_outcome_formatted() {
        let ok = ParameterOutcome::new("h2s", "H₂S", "ppm", 2.1, Verdict::Pass);
        assert_eq!(ok.formatted, "2.1 - ✅");
        let no = ParameterOutcome::new("co2", "CO₂", "%", 2.0, Verdict::Fail);
        assert_eq!(no.formatted, "2.0 - ❌");
    }

    #[test]
    fn test_results_table_rows() {
        let result = AnalysisResult {
            module: ModuleKind::Meg,
            outcomes: vec![
                ParameterOutcome::new("ph", "pH", "", 7.0, Verdict::Pass),
                ParameterOutcome::new("chlorides", "Chlorides", "ppm", 51.0, Verdict::Fail),
            ],
        };
        assert_eq!(
            result.results_table(),
            vec![
                ("pH".to_string(), "7.0 - ✅".to_string()),
                ("Chlorides (ppm)".to_string(), "51.0 - ❌".to_string()),
            ]
        );
        assert_eq!(result.failed_count(), 1);
    }
}
