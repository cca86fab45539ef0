// ==========================================
// LTS 化验分析系统 - 报告组装器
// ==========================================
// 职责: ReportRequest -> Report（结构化章节）
// 章节顺序固定: 化验员 / 技术说明 / 结果 / 备注
// 红线: 报告内容是 ReportRequest 的确定性函数;所有文本先规范化再输出
// ==========================================

use crate::domain::analysis::{AnalysisResult, ParameterOutcome};
use crate::domain::parameter::ParameterSpec;
use crate::domain::report::{Report, ReportRequest, ReportSection, SectionBody, SectionKind};
use crate::domain::types::ModuleKind;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::text_normalizer::normalize;
use crate::i18n::{tr, tr_with_args};
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// 报告文件名中的时间格式
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// 页眉日期格式
pub const HEADER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ==========================================
// ReportSettings - 报告外观配置
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReportSettings {
    /// Logo 图片路径
    pub logo_path: Option<PathBuf>,
    /// 覆盖默认标题
    pub title: Option<String>,
    /// 覆盖默认页脚
    pub footer: Option<String>,
}

// ==========================================
// ReportAssembler - 报告组装器
// ==========================================
pub struct ReportAssembler {
    settings: ReportSettings,
}

impl ReportAssembler {
    pub fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }

    /// 组装报告（标题取自配置或语言包）
    ///
    /// # 错误
    /// - ModuleMismatch: 请求模块与判定结果模块不一致
    pub fn assemble(&self, request: &ReportRequest) -> EngineResult<Report> {
        if request.module != request.results.module {
            return Err(EngineError::ModuleMismatch {
                request: request.module,
                results: request.results.module,
            });
        }

        let title = self
            .settings
            .title
            .clone()
            .unwrap_or_else(|| tr(&request.locale, "report.title"));

        Ok(self.build_report(
            &title,
            &request.operator,
            &request.explanation,
            &request.results,
            &request.observations,
            request.timestamp,
            &request.locale,
        ))
    }

    /// 构建结构化报告
    ///
    /// # 参数
    /// - `title`: 报告标题
    /// - `operator`: 化验员
    /// - `explanation`: 模块技术说明
    /// - `results`: 判定结果（每个参数一行,保持顺序）
    /// - `observations`: 备注,为空时使用语言包中的 "无备注" 文本
    /// - `timestamp`: 生成时间（页眉与文件名）
    /// - `locale`: 报告语言
    #[allow(clippy::too_many_arguments)]
    pub fn build_report(
        &self,
        title: &str,
        operator: &str,
        explanation: &str,
        results: &AnalysisResult,
        observations: &str,
        timestamp: NaiveDateTime,
        locale: &str,
    ) -> Report {
        let result_lines: Vec<String> = results
            .iter()
            .map(|outcome| normalize(&result_line(locale, outcome)))
            .collect();

        let observations = if observations.trim().is_empty() {
            tr(locale, "report.no_observations")
        } else {
            observations.to_string()
        };

        let sections = SectionKind::ORDER
            .iter()
            .map(|kind| {
                let body = match kind {
                    SectionKind::Operator => SectionBody::Text(normalize(operator)),
                    SectionKind::Explanation => SectionBody::Text(normalize(explanation)),
                    SectionKind::Results => SectionBody::Lines(result_lines.clone()),
                    SectionKind::Observations => SectionBody::Text(normalize(&observations)),
                };
                ReportSection {
                    kind: *kind,
                    title: normalize(&tr(locale, kind.title_key())),
                    body,
                }
            })
            .collect();

        let date = timestamp.format(HEADER_DATE_FORMAT).to_string();
        let footer = self
            .settings
            .footer
            .clone()
            .unwrap_or_else(|| tr(locale, "report.footer"));

        let report = Report {
            title: normalize(title),
            date_line: normalize(&tr_with_args(locale, "report.date", &[("date", date.as_str())])),
            generated_at: timestamp,
            logo_path: self.settings.logo_path.clone(),
            sections,
            footer: normalize(&footer),
            file_name: file_name(results.module, operator, timestamp),
        };

        tracing::info!(
            module = %results.module,
            file_name = %report.file_name,
            result_lines = results.len(),
            "报告组装完成"
        );
        report
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(ReportSettings::default())
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 参数显示名称: "<本地化名称> (<单位>)",无单位时只有名称
pub fn parameter_label(locale: &str, key: &str, unit: &str) -> String {
    let name = tr(locale, &format!("parameter.{}", key));
    if unit.is_empty() {
        name
    } else {
        format!("{} ({})", name, unit)
    }
}

/// 规格表中的参数显示名称
pub fn spec_label(locale: &str, spec: &ParameterSpec) -> String {
    parameter_label(locale, spec.key, spec.unit)
}

/// 结果行: "<名称>: <值> - <标记>"
pub fn result_line(locale: &str, outcome: &ParameterOutcome) -> String {
    format!(
        "{}: {}",
        parameter_label(locale, &outcome.key, &outcome.unit),
        outcome.formatted
    )
}

/// 报告文件名: <模块前缀>_<化验员>_<YYYYMMDD_HHMM>.pdf
///
/// 化验员姓名中的路径分隔符与文件系统非法字符替换为 '_'
pub fn file_name(module: ModuleKind, operator: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.pdf",
        module.file_prefix(),
        sanitize_file_component(operator.trim()),
        timestamp.format(FILE_TIMESTAMP_FORMAT)
    )
}

fn sanitize_file_component(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
