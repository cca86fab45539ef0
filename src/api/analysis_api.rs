// ==========================================
// LTS 化验分析系统 - 化验分析 API
// ==========================================
// 职责: 界面层调用入口
//   - 模块目录（表单渲染）
//   - 测量值校验 + 规则表判定（结果表格）
//   - 报告组装 + PDF 渲染（下载字节流）
// 红线: 每次调用独立,不保存任何会话状态;只持有不可变配置
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::RequestValidator;
use crate::config::ConfigManager;
use crate::domain::analysis::{format_measurement, AnalysisResult, Measurements};
use crate::domain::report::{RenderedReport, Report, ReportRequest};
use crate::domain::sample::ModuleRequest;
use crate::domain::types::{ModuleKind, Verdict};
use crate::engine::report_assembler::{parameter_label, spec_label, ReportAssembler, ReportSettings};
use crate::engine::rule_table::RuleTable;
use crate::i18n::{resolve_locale, tr};
use crate::importer::SampleSheetImporter;
use crate::render::{PdfRenderer, TextRenderer};

/// 报告文件 MIME 类型
pub const PDF_MIME: &str = "application/pdf";

// ==========================================
// DTO
// ==========================================

/// 模块目录条目（界面页签 + 表单字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCatalogEntry {
    pub module: ModuleKind,
    /// 模块名称（本地化）
    pub name: String,
    /// 技术说明（本地化）
    pub explanation: String,
    pub parameters: Vec<ParameterCatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterCatalogEntry {
    pub key: String,
    /// "<名称> (<单位>)"
    pub label: String,
    pub unit: String,
    /// 规格说明,例如 "<= 2.1 ppm"
    pub specification: String,
    /// 输入下限
    pub min: f64,
    /// 输入上限（None 表示无上限）
    pub max: Option<f64>,
}

/// 结果表格行（界面展示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub key: String,
    pub label: String,
    pub value: String,
    pub specification: String,
    pub verdict: Verdict,
    /// "<值> - <标记>"
    pub formatted: String,
}

/// 报告生成输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    /// 化验员
    pub operator: String,
    pub results: AnalysisResult,
    /// 备注（可为空）
    #[serde(default)]
    pub observations: String,
    pub timestamp: NaiveDateTime,
    /// 报告语言（None 时使用 API 默认语言）
    #[serde(default)]
    pub locale: Option<String>,
}

// ==========================================
// AnalysisApi
// ==========================================
pub struct AnalysisApi {
    rule_table: RuleTable,
    validator: RequestValidator,
    importer: SampleSheetImporter,
    assembler: ReportAssembler,
    renderer: PdfRenderer,
    locale: String,
}

impl AnalysisApi {
    /// 创建新的 AnalysisApi 实例
    ///
    /// # 参数
    /// - settings: 报告外观配置（Logo / 标题 / 页脚）
    /// - locale: 默认报告语言
    pub fn new(settings: ReportSettings, locale: &str) -> Self {
        Self {
            rule_table: RuleTable::new(),
            validator: RequestValidator::new(),
            importer: SampleSheetImporter::new(),
            assembler: ReportAssembler::new(settings),
            renderer: PdfRenderer::new(),
            locale: resolve_locale(locale).to_string(),
        }
    }

    /// 从配置管理器创建
    pub fn from_config(config: &ConfigManager) -> ApiResult<Self> {
        Ok(Self::new(config.report_settings()?, &config.get_locale()?))
    }

    /// 默认报告语言
    pub fn locale(&self) -> &str {
        &self.locale
    }

    // ==========================================
    // 模块目录
    // ==========================================

    /// 全部模块（页签顺序）及其参数
    pub fn list_modules(&self) -> Vec<ModuleCatalogEntry> {
        self.rule_table
            .modules()
            .iter()
            .map(|spec| ModuleCatalogEntry {
                module: spec.kind,
                name: tr(&self.locale, &spec.kind.name_key()),
                explanation: tr(&self.locale, &spec.kind.explanation_key()),
                parameters: spec
                    .parameters
                    .iter()
                    .map(|param| ParameterCatalogEntry {
                        key: param.key.to_string(),
                        label: spec_label(&self.locale, param),
                        unit: param.unit.to_string(),
                        specification: param.acceptance_text(),
                        min: param.domain.min,
                        max: param.domain.max,
                    })
                    .collect(),
            })
            .collect()
    }

    // ==========================================
    // 判定
    // ==========================================

    /// 按模块请求对象判定
    pub fn analyze(&self, request: ModuleRequest) -> ApiResult<AnalysisResult> {
        self.analyze_measurements(request.kind(), &request.measurements())
    }

    /// 校验后判定
    pub fn analyze_measurements(
        &self,
        kind: ModuleKind,
        measurements: &Measurements,
    ) -> ApiResult<AnalysisResult> {
        self.validator.validate(kind, measurements)?;
        Ok(self.rule_table.evaluate(kind, measurements)?)
    }

    /// 从化验样品表导入并判定
    pub fn analyze_sheet<P: AsRef<Path>>(
        &self,
        kind: ModuleKind,
        path: P,
    ) -> ApiResult<AnalysisResult> {
        let measurements = self.importer.import(kind, path)?;
        self.analyze_measurements(kind, &measurements)
    }

    /// 结果表格（界面展示,保持参数顺序）
    pub fn results_table(&self, results: &AnalysisResult) -> Vec<ResultRow> {
        let spec = self.rule_table.spec(results.module);
        results
            .iter()
            .map(|outcome| ResultRow {
                key: outcome.key.clone(),
                label: parameter_label(&self.locale, &outcome.key, &outcome.unit),
                value: format_measurement(outcome.value),
                specification: spec
                    .parameter(&outcome.key)
                    .map(|p| p.acceptance_text())
                    .unwrap_or_default(),
                verdict: outcome.verdict,
                formatted: outcome.formatted.clone(),
            })
            .collect()
    }

    // ==========================================
    // 报告
    // ==========================================

    /// 组装结构化报告
    pub fn build_report(&self, input: &ReportInput) -> ApiResult<Report> {
        let locale = input
            .locale
            .as_deref()
            .map(resolve_locale)
            .unwrap_or(self.locale.as_str());
        let module = input.results.module;

        let request = ReportRequest {
            module,
            operator: input.operator.clone(),
            explanation: tr(locale, &module.explanation_key()),
            results: input.results.clone(),
            observations: input.observations.clone(),
            timestamp: input.timestamp,
            locale: locale.to_string(),
        };
        Ok(self.assembler.assemble(&request)?)
    }

    /// 生成 PDF 报告（只返回字节流,不写文件）
    pub fn generate_report(&self, input: &ReportInput) -> ApiResult<RenderedReport> {
        let report = self.build_report(input)?;
        let bytes = self.renderer.render(&report)?;
        Ok(RenderedReport {
            file_name: report.file_name,
            mime: PDF_MIME.to_string(),
            bytes,
        })
    }

    /// 生成纯文本报告预览
    pub fn preview_report(&self, input: &ReportInput) -> ApiResult<String> {
        let report = self.build_report(input)?;
        Ok(TextRenderer.render(&report))
    }

    /// 一次完成判定与报告生成（"生成报告" 按钮）
    pub fn analyze_and_report(
        &self,
        kind: ModuleKind,
        measurements: &Measurements,
        operator: &str,
        observations: &str,
        timestamp: NaiveDateTime,
    ) -> ApiResult<(AnalysisResult, RenderedReport)> {
        let results = self.analyze_measurements(kind, measurements)?;
        let rendered = self.generate_report(&ReportInput {
            operator: operator.to_string(),
            results: results.clone(),
            observations: observations.to_string(),
            timestamp,
            locale: None,
        })?;
        Ok((results, rendered))
    }
}

impl Default for AnalysisApi {
    fn default() -> Self {
        Self::new(ReportSettings::default(), crate::i18n::DEFAULT_LOCALE)
    }
}

// ==========================================
// 保存报告（命令行使用）
// ==========================================

/// 把渲染好的报告写入目录,返回完整路径
pub fn save_report<P: AsRef<Path>>(report: &RenderedReport, dir: P) -> ApiResult<PathBuf> {
    let dir = dir.as_ref();
    if report.file_name.trim().is_empty() {
        return Err(ApiError::InvalidInput("报告文件名为空".to_string()));
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(&report.file_name);
    fs::write(&path, &report.bytes)?;
    tracing::info!(path = %path.display(), bytes = report.bytes.len(), "报告已保存");
    Ok(path)
}
