// ==========================================
// LTS 化验分析系统 - 化验样品表导入器
// ==========================================
// 表格格式（长表）: 每行一个参数
//   parameter | value        （英文表头）
//   parámetro | valor        （西班牙语表头）
// 参数列可填写: 参数 key / 英文名称 / 任一语言包中的名称,
//              名称后可带单位括号,例如 "H₂S (ppm)"
// 数值列接受小数点或小数逗号
// 红线: 导入结果必须恰好覆盖模块全部参数,否则拒绝整张表
// ==========================================

use crate::domain::analysis::Measurements;
use crate::domain::parameter::{ModuleSpec, ParameterSpec};
use crate::domain::types::ModuleKind;
use crate::engine::rule_table::module_spec;
use crate::engine::text_normalizer::normalize;
use crate::i18n::{tr, SUPPORTED_LOCALES};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use std::path::Path;

/// 参数列表头别名
pub const PARAMETER_HEADERS: [&str; 3] = ["parameter", "parametro", "parámetro"];

/// 数值列表头别名
pub const VALUE_HEADERS: [&str; 2] = ["value", "valor"];

// ==========================================
// SampleSheetImporter
// ==========================================
pub struct SampleSheetImporter {
    parser: UniversalFileParser,
}

impl SampleSheetImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 从文件导入一个模块的测量值
    ///
    /// # 错误
    /// - FileNotFound / UnsupportedFormat / 解析错误: 文件层
    /// - MissingColumn: 缺少参数列或数值列
    /// - UnknownParameter / DuplicateParameter / MissingParameter: 参数集合与模块不符
    /// - TypeConversionError: 数值无法解析
    /// - ValueRangeError: 数值超出参数输入域
    pub fn import<P: AsRef<Path>>(&self, kind: ModuleKind, path: P) -> ImportResult<Measurements> {
        let path = path.as_ref();
        tracing::info!(module = %kind, path = %path.display(), "开始导入化验样品表");

        let records = self.parser.parse(path)?;
        let measurements = self.map_records(kind, &records)?;

        tracing::info!(
            module = %kind,
            parameters = measurements.len(),
            "化验样品表导入完成"
        );
        Ok(measurements)
    }

    /// 行记录 -> 测量值（顺序与模块参数列表一致）
    pub fn map_records(&self, kind: ModuleKind, records: &[RawRecord]) -> ImportResult<Measurements> {
        let spec = module_spec(kind);

        let (parameter_column, value_column) = match records.first() {
            Some(first) => (
                find_column(first, &PARAMETER_HEADERS)
                    .ok_or_else(|| ImportError::MissingColumn(PARAMETER_HEADERS[0].to_string()))?,
                find_column(first, &VALUE_HEADERS)
                    .ok_or_else(|| ImportError::MissingColumn(VALUE_HEADERS[0].to_string()))?,
            ),
            None => {
                return Err(ImportError::MissingParameter(
                    spec.parameters
                        .first()
                        .map(|p| p.key.to_string())
                        .unwrap_or_default(),
                ))
            }
        };

        let mut found: Vec<(&'static str, f64)> = Vec::with_capacity(spec.parameters.len());
        for record in records {
            let name = record.get(&parameter_column).unwrap_or("");
            let raw_value = record.get(&value_column).unwrap_or("");

            let param = match_parameter(spec, name).ok_or_else(|| ImportError::UnknownParameter {
                row: record.row,
                name: name.to_string(),
            })?;

            if found.iter().any(|(key, _)| *key == param.key) {
                return Err(ImportError::DuplicateParameter {
                    row: record.row,
                    key: param.key.to_string(),
                });
            }

            let value =
                parse_measurement(raw_value).ok_or_else(|| ImportError::TypeConversionError {
                    row: record.row,
                    field: param.key.to_string(),
                    message: format!("无法解析为数值: '{}'", raw_value),
                })?;

            if !param.domain.contains(value) {
                return Err(ImportError::ValueRangeError {
                    row: record.row,
                    field: param.key.to_string(),
                    value,
                    min: param.domain.min,
                    max: param.domain.max.unwrap_or(f64::INFINITY),
                });
            }

            tracing::debug!(row = record.row, parameter = param.key, value, "读取测量值");
            found.push((param.key, value));
        }

        let mut measurements = Measurements::new();
        for param in spec.parameters {
            let value = found
                .iter()
                .find(|(key, _)| *key == param.key)
                .map(|(_, value)| *value)
                .ok_or_else(|| ImportError::MissingParameter(param.key.to_string()))?;
            measurements.insert(param.key, value);
        }
        Ok(measurements)
    }
}

impl Default for SampleSheetImporter {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 解析测量值文本
///
/// 接受小数点或小数逗号;空串、非数值、NaN/无穷大返回 None
///
/// # 示例
/// ```
/// use lts_lab_analyzer::importer::parse_measurement;
/// assert_eq!(parse_measurement(" 2,1 "), Some(2.1));
/// assert_eq!(parse_measurement("abc"), None);
/// ```
pub fn parse_measurement(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };
    candidate.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 比较用的规范形式: ASCII 化 + 小写 + 去空白
fn fold(text: &str) -> String {
    normalize(text).trim().to_lowercase()
}

fn find_column(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    record
        .fields
        .keys()
        .find(|header| {
            let header = header.trim().to_lowercase();
            aliases.iter().any(|alias| header == *alias)
        })
        .cloned()
}

/// 去掉名称末尾的单位括号
fn strip_unit(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.rfind('(') {
        Some(idx) if trimmed.ends_with(')') => trimmed[..idx].trim_end(),
        _ => trimmed,
    }
}

fn match_parameter<'a>(spec: &'a ModuleSpec, cell: &str) -> Option<&'a ParameterSpec> {
    let wanted = fold(strip_unit(cell));
    if wanted.is_empty() {
        return None;
    }
    spec.parameters.iter().find(|param| {
        fold(param.key) == wanted
            || fold(param.name) == wanted
            || SUPPORTED_LOCALES
                .iter()
                .any(|locale| fold(&tr(locale, &param.label_key())) == wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(row: usize, parameter: &str, value: &str) -> RawRecord {
        let mut fields = HashMap::new();
        fields.insert("parametro".to_string(), parameter.to_string());
        fields.insert("valor".to_string(), value.to_string());
        RawRecord { row, fields }
    }

    #[test]
    fn test_parse_measurement_variants() {
        assert_eq!(parse_measurement("2.1"), Some(2.1));
        assert_eq!(parse_measurement("2,1"), Some(2.1));
        assert_eq!(parse_measurement("  7 "), Some(7.0));
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("NaN"), None);
        assert_eq!(parse_measurement("inf"), None);
        assert_eq!(parse_measurement("1,2,3"), None);
    }

    #[test]
    fn test_strip_unit() {
        assert_eq!(strip_unit("H₂S (ppm)"), "H₂S");
        assert_eq!(strip_unit("pH"), "pH");
    }

    #[test]
    fn test_map_records_accepts_key_name_and_label() {
        let importer = SampleSheetImporter::new();
        let records = vec![
            record(2, "CO2 (%)", "1,8"),
            record(3, "h2s", "2.1"),
        ];
        let measurements = importer
            .map_records(ModuleKind::NaturalGas, &records)
            .unwrap();

        // 顺序与模块参数列表一致
        let pairs: Vec<(&str, f64)> = measurements.iter().collect();
        assert_eq!(pairs, vec![("h2s", 2.1), ("co2", 1.8)]);
    }

    #[test]
    fn test_map_records_localized_label() {
        let importer = SampleSheetImporter::new();
        let records = vec![record(2, "Cloruros", "12")];
        let measurements = importer
            .map_records(ModuleKind::DemineralizedWater, &records)
            .unwrap();
        assert_eq!(measurements.get("chlorides"), Some(12.0));
    }

    #[test]
    fn test_map_records_rejects_unknown_duplicate_missing() {
        let importer = SampleSheetImporter::new();

        let unknown = importer.map_records(ModuleKind::NaturalGas, &[record(2, "tvr", "1")]);
        assert!(matches!(unknown, Err(ImportError::UnknownParameter { row: 2, .. })));

        let duplicate = importer.map_records(
            ModuleKind::NaturalGas,
            &[record(2, "h2s", "1"), record(3, "H2S", "2")],
        );
        assert!(matches!(
            duplicate,
            Err(ImportError::DuplicateParameter { row: 3, ref key }) if key == "h2s"
        ));

        let missing = importer.map_records(ModuleKind::NaturalGas, &[record(2, "h2s", "1")]);
        assert!(matches!(missing, Err(ImportError::MissingParameter(ref key)) if key == "co2"));
    }

    #[test]
    fn test_map_records_rejects_bad_values() {
        let importer = SampleSheetImporter::new();

        let not_number = importer.map_records(
            ModuleKind::DemineralizedWater,
            &[record(2, "chlorides", "alto")],
        );
        assert!(matches!(
            not_number,
            Err(ImportError::TypeConversionError { row: 2, .. })
        ));

        let negative = importer.map_records(
            ModuleKind::DemineralizedWater,
            &[record(2, "chlorides", "-1")],
        );
        assert!(matches!(negative, Err(ImportError::ValueRangeError { .. })));
    }

    #[test]
    fn test_map_records_missing_value_column() {
        let importer = SampleSheetImporter::new();
        let mut fields = HashMap::new();
        fields.insert("parameter".to_string(), "chlorides".to_string());
        let records = vec![RawRecord { row: 2, fields }];

        let result = importer.map_records(ModuleKind::DemineralizedWater, &records);
        assert!(matches!(result, Err(ImportError::MissingColumn(ref c)) if c == "value"));
    }
}
