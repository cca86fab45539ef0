// ==========================================
// LTS 化验分析系统 - 纯文本报告渲染器
// ==========================================
// 用途: 终端预览 / 日志,章节顺序与 PDF 一致
// ==========================================

use crate::domain::report::{Report, SectionBody};

pub struct TextRenderer;

impl TextRenderer {
    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        out.push_str(&report.title);
        out.push('\n');
        out.push_str(&report.date_line);
        out.push_str("\n\n");

        for section in &report.sections {
            out.push_str(&section.title);
            out.push('\n');
            match &section.body {
                SectionBody::Text(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                SectionBody::Lines(lines) => {
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
            out.push('\n');
        }

        out.push_str(&report.footer);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{ReportSection, SectionKind};
    use chrono::NaiveDate;

    #[test]
    fn test_text_layout() {
        let report = Report {
            title: "LABORATORY ANALYSIS REPORT".to_string(),
            date_line: "Date: 2025-06-01 08:30".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            logo_path: None,
            sections: vec![
                ReportSection {
                    kind: SectionKind::Operator,
                    title: "Operator".to_string(),
                    body: SectionBody::Text("Ana".to_string()),
                },
                ReportSection {
                    kind: SectionKind::Results,
                    title: "Results".to_string(),
                    body: SectionBody::Lines(vec![
                        "H2S (ppm): 2.1 - OK".to_string(),
                        "CO2 (%): 2.0 - OK".to_string(),
                    ]),
                },
            ],
            footer: "Confidential".to_string(),
            file_name: "GasNatural_Ana_20250601_0830.pdf".to_string(),
        };

        let text = TextRenderer.render(&report);
        assert_eq!(
            text,
            "LABORATORY ANALYSIS REPORT\nDate: 2025-06-01 08:30\n\n\
             Operator\nAna\n\n\
             Results\nH2S (ppm): 2.1 - OK\nCO2 (%): 2.0 - OK\n\n\
             Confidential\n"
        );
    }
}
