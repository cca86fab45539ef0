// ==========================================
// LTS 化验分析系统 - Helvetica 字宽表
// ==========================================
// 用途: PDF 文本对齐与自动换行
// 数据: Adobe Helvetica AFM 字宽（1/1000 em）,WinAnsi 编码
// 粗体/斜体按常规字宽近似（粗体放大 5%）,仅影响换行位置
// ==========================================

use crate::render::pdf_writer::FontStyle;

/// 毫米/磅换算
pub const PT_PER_MM: f64 = 72.0 / 25.4;

const DEFAULT_WIDTH: u16 = 556;

/// ASCII 0x20..=0x7E
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Latin-1 补充区 0xA0..=0xFF
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// 单字符宽度（1/1000 em）
pub fn char_width(c: char) -> u16 {
    let code = c as u32;
    match code {
        0x20..=0x7E => ASCII_WIDTHS[(code - 0x20) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(code - 0xA0) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// 文本宽度（毫米）
pub fn text_width_mm(text: &str, style: FontStyle, size_pt: f64) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let scale = match style {
        FontStyle::Bold => 1.05,
        FontStyle::Regular | FontStyle::Italic => 1.0,
    };
    units as f64 * scale * size_pt / 1000.0 / PT_PER_MM
}

/// 按宽度自动换行
///
/// 保留显式换行;单词超过行宽时按字符截断
pub fn wrap_text(text: &str, style: FontStyle, size_pt: f64, max_width_mm: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, style, size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // 单词本身过长: 按字符截断
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && text_width_mm(&next, style, size_pt) > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width_lookup() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('0'), 556);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('i'), 222);
        assert_eq!(char_width('~'), 584);
        assert_eq!(char_width('é'), 556);
        assert_eq!(char_width('Æ'), 1000);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = text_width_mm("Resultados", FontStyle::Regular, 10.0);
        let w20 = text_width_mm("Resultados", FontStyle::Regular, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-9);
        assert!(text_width_mm("Resultados", FontStyle::Bold, 10.0) > w10);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(
            wrap_text("Sin observaciones.", FontStyle::Regular, 10.0, 188.0),
            vec!["Sin observaciones.".to_string()]
        );
    }

    #[test]
    fn test_wrap_long_text() {
        let text = "muestra ".repeat(60);
        let lines = wrap_text(text.trim_end(), FontStyle::Regular, 10.0, 188.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, FontStyle::Regular, 10.0) <= 188.0);
        }
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = wrap_text("a\n\nb", FontStyle::Regular, 10.0, 188.0);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, FontStyle::Regular, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
