// ==========================================
// LTS 化验分析系统 - 报告实体
// ==========================================
// ReportRequest: 判定时创建,由报告组装器消费一次
// Report: 结构化报告（章节文本）,交给渲染器输出 PDF / 文本
// ==========================================

use crate::domain::analysis::AnalysisResult;
use crate::domain::types::ModuleKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ==========================================
// ReportRequest - 报告请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub module: ModuleKind,
    /// 化验员
    pub operator: String,
    /// 模块技术说明
    pub explanation: String,
    pub results: AnalysisResult,
    /// 备注（可为空）
    pub observations: String,
    pub timestamp: NaiveDateTime,
    /// 报告语言
    pub locale: String,
}

// ==========================================
// Report - 结构化报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// 页眉日期行,例如 "Fecha: 2025-06-01 08:30"
    pub date_line: String,
    pub generated_at: NaiveDateTime,
    /// Logo 路径（文件缺失时渲染器忽略）
    pub logo_path: Option<PathBuf>,
    pub sections: Vec<ReportSection>,
    /// 页脚保密声明
    pub footer: String,
    pub file_name: String,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// 章节类型（固定顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Operator,
    Explanation,
    Results,
    Observations,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 4] = [
        SectionKind::Operator,
        SectionKind::Explanation,
        SectionKind::Results,
        SectionKind::Observations,
    ];

    pub fn title_key(&self) -> &'static str {
        match self {
            SectionKind::Operator => "report.section.operator",
            SectionKind::Explanation => "report.section.explanation",
            SectionKind::Results => "report.section.results",
            SectionKind::Observations => "report.section.observations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub title: String,
    pub body: SectionBody,
}

/// 章节正文: 自由文本（自动换行）或逐行列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionBody {
    Text(String),
    Lines(Vec<String>),
}

// ==========================================
// RenderedReport - 渲染完成的报告文件
// ==========================================
// 只在内存中,下载/保存由调用方负责
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedReport {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}
