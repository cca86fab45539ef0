// ==========================================
// LTS 化验分析系统 - PDF 报告渲染器
// ==========================================
// 输入: Report（已规范化的结构化章节）
// 输出: PDF 字节流（不写文件,下载/保存由调用方负责）
// 版式: A4,边距 10 mm;页眉 Logo + 标题 + 日期;页脚保密声明;
//       距底边 20 mm 自动分页
// ==========================================

use crate::domain::report::{Report, SectionBody};
use crate::render::error::RenderResult;
use crate::render::font_metrics::{text_width_mm, wrap_text, PT_PER_MM};
use crate::render::logo::load_logo;
use crate::render::pdf_writer::{FontStyle, PdfWriter, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const MARGIN_MM: f64 = 10.0;
const CELL_MARGIN_MM: f64 = 1.0;
const PAGE_BREAK_MM: f64 = PAGE_HEIGHT_MM - 20.0;
const FOOTER_TOP_MM: f64 = PAGE_HEIGHT_MM - 15.0;

const LOGO_X_MM: f64 = 10.0;
const LOGO_Y_MM: f64 = 8.0;
const LOGO_WIDTH_MM: f64 = 33.0;

const TITLE_SIZE: f64 = 12.0;
const DATE_SIZE: f64 = 10.0;
const SECTION_TITLE_SIZE: f64 = 11.0;
const BODY_SIZE: f64 = 10.0;
const FOOTER_SIZE: f64 = 8.0;

const HEADER_CELL_MM: f64 = 10.0;
const SECTION_TITLE_CELL_MM: f64 = 10.0;
const BODY_LINE_MM: f64 = 8.0;
const SECTION_GAP_MM: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

// ==========================================
// PdfRenderer
// ==========================================
pub struct PdfRenderer {
    // 无状态渲染器
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// 渲染报告
    pub fn render(&self, report: &Report) -> RenderResult<Vec<u8>> {
        let mut writer = PdfWriter::new();
        let logo_height = match report.logo_path.as_deref().and_then(load_logo) {
            Some(logo) => {
                let height = logo.height_for_width(LOGO_WIDTH_MM);
                writer.set_image(logo);
                Some(height)
            }
            None => None,
        };

        let mut layout = Layout {
            writer,
            report,
            logo_height,
            y: MARGIN_MM,
        };
        layout.new_page();

        for section in &report.sections {
            layout.ensure_space(SECTION_TITLE_CELL_MM);
            layout.cell(
                SECTION_TITLE_CELL_MM,
                FontStyle::Bold,
                SECTION_TITLE_SIZE,
                &section.title,
                Align::Left,
            );

            let lines: Vec<String> = match &section.body {
                SectionBody::Text(text) => wrap_text(
                    text,
                    FontStyle::Regular,
                    BODY_SIZE,
                    content_width() - 2.0 * CELL_MARGIN_MM,
                ),
                SectionBody::Lines(lines) => lines
                    .iter()
                    .flat_map(|line| {
                        wrap_text(
                            line,
                            FontStyle::Regular,
                            BODY_SIZE,
                            content_width() - 2.0 * CELL_MARGIN_MM,
                        )
                    })
                    .collect(),
            };

            for line in &lines {
                layout.ensure_space(BODY_LINE_MM);
                layout.cell(BODY_LINE_MM, FontStyle::Regular, BODY_SIZE, line, Align::Left);
            }
            layout.y += SECTION_GAP_MM;
        }

        let page_count = layout.writer.page_count();
        let bytes = layout.writer.finish()?;
        tracing::info!(
            file_name = %report.file_name,
            pages = page_count,
            bytes = bytes.len(),
            "PDF 报告渲染完成"
        );
        Ok(bytes)
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn content_width() -> f64 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

// ==========================================
// Layout - 页面游标
// ==========================================
struct Layout<'a> {
    writer: PdfWriter,
    report: &'a Report,
    logo_height: Option<f64>,
    /// 当前行顶部到页面顶部的距离（毫米）
    y: f64,
}

impl<'a> Layout<'a> {
    fn new_page(&mut self) {
        self.writer.add_page();
        self.y = MARGIN_MM;
        self.header();
        self.footer();
    }

    fn header(&mut self) {
        if let Some(height) = self.logo_height {
            self.writer
                .draw_image(LOGO_X_MM, LOGO_Y_MM, LOGO_WIDTH_MM, height);
        }
        let title = self.report.title.clone();
        let date_line = self.report.date_line.clone();
        self.cell(HEADER_CELL_MM, FontStyle::Bold, TITLE_SIZE, &title, Align::Center);
        self.cell(HEADER_CELL_MM, FontStyle::Regular, DATE_SIZE, &date_line, Align::Right);
        self.y += 5.0;
    }

    fn footer(&mut self) {
        let saved = self.y;
        self.y = FOOTER_TOP_MM;
        let footer = self.report.footer.clone();
        self.cell(HEADER_CELL_MM, FontStyle::Italic, FOOTER_SIZE, &footer, Align::Center);
        self.y = saved;
    }

    /// 剩余空间不足时换页
    fn ensure_space(&mut self, height: f64) {
        if self.y + height > PAGE_BREAK_MM {
            self.new_page();
        }
    }

    /// 整行单元格: 输出文本并把游标移到下一行
    fn cell(&mut self, height: f64, style: FontStyle, size_pt: f64, text: &str, align: Align) {
        let width = text_width_mm(text, style, size_pt);
        let x = match align {
            Align::Left => MARGIN_MM + CELL_MARGIN_MM,
            Align::Center => MARGIN_MM + (content_width() - width) / 2.0,
            Align::Right => MARGIN_MM + content_width() - CELL_MARGIN_MM - width,
        };
        let baseline = self.y + 0.5 * height + 0.3 * size_pt / PT_PER_MM;
        if !text.is_empty() {
            self.writer.text(x, baseline, style, size_pt, text);
        }
        self.y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{ReportSection, SectionKind};
    use chrono::NaiveDate;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn report_with_observations(observations: String) -> Report {
        Report {
            title: "INFORME DE ANALISIS DE LABORATORIO".to_string(),
            date_line: "Fecha: 2025-06-01 08:30".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            logo_path: None,
            sections: vec![
                ReportSection {
                    kind: SectionKind::Operator,
                    title: "Operador".to_string(),
                    body: SectionBody::Text("Ana".to_string()),
                },
                ReportSection {
                    kind: SectionKind::Results,
                    title: "Resultados".to_string(),
                    body: SectionBody::Lines(vec!["H2S (ppm): 2.1 - OK".to_string()]),
                },
                ReportSection {
                    kind: SectionKind::Observations,
                    title: "Observaciones".to_string(),
                    body: SectionBody::Text(observations),
                },
            ],
            footer: "Confidencial - Uso interno PETROGAS".to_string(),
            file_name: "GasNatural_Ana_20250601_0830.pdf".to_string(),
        }
    }

    #[test]
    fn test_render_contains_sections_and_footer() {
        let bytes = PdfRenderer::new()
            .render(&report_with_observations("Sin observaciones.".to_string()))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, b"(Operador) Tj"));
        assert!(contains(&bytes, b"(H2S \\(ppm\\): 2.1 - OK) Tj"));
        assert!(contains(&bytes, b"(Confidencial - Uso interno PETROGAS) Tj"));
        assert!(contains(&bytes, b"/Count 1"));
    }

    #[test]
    fn test_long_observations_paginate_and_repeat_footer() {
        let long = "Lectura estable sin desviaciones.\n".repeat(60);
        let bytes = PdfRenderer::new()
            .render(&report_with_observations(long))
            .unwrap();
        assert!(contains(&bytes, b"/Count 2") || contains(&bytes, b"/Count 3"));
        let footer = b"(Confidencial - Uso interno PETROGAS) Tj";
        let occurrences = bytes
            .windows(footer.len())
            .filter(|w| *w == footer)
            .count();
        assert!(occurrences >= 2);
    }

    #[test]
    fn test_missing_logo_does_not_fail() {
        let mut report = report_with_observations(String::new());
        report.logo_path = Some("no_existe/logopetrogas.png".into());
        let bytes = PdfRenderer::new().render(&report).unwrap();
        assert!(!contains(&bytes, b"/Im1 Do"));
    }
}
