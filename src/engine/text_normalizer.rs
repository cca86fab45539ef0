// ==========================================
// LTS 化验分析系统 - 报告文本规范化
// ==========================================
// 职责: 把报告字体编码（WinAnsi / Latin-1）不支持的字符替换为等价 ASCII
// 规则: 静态有序替换表,单遍逐字符处理,替换结果不再参与匹配
// 兜底: 替换表之外仍无法编码的字符直接丢弃,不中断报告生成
// ==========================================

/// 替换表（字符 -> ASCII 等价文本）
///
/// 所有替换结果均为纯 ASCII,而所有 key 均为非 ASCII,
/// 因此任何替换结果都不会命中其他规则,规范化幂等。
pub static REPLACEMENTS: &[(char, &str)] = &[
    // 判定标记
    ('✅', "OK"),
    ('✔', "OK"),
    ('✓', "OK"),
    ('☑', "OK"),
    ('❌', "NO"),
    ('❎', "NO"),
    ('✖', "NO"),
    ('✗', "NO"),
    ('✘', "NO"),
    // 下标数字
    ('₀', "0"),
    ('₁', "1"),
    ('₂', "2"),
    ('₃', "3"),
    ('₄', "4"),
    ('₅', "5"),
    ('₆', "6"),
    ('₇', "7"),
    ('₈', "8"),
    ('₉', "9"),
    ('₊', "+"),
    ('₋', "-"),
    // 上标数字（¹²³ 虽在 Latin-1 内,仍统一为普通数字）
    ('⁰', "0"),
    ('¹', "1"),
    ('²', "2"),
    ('³', "3"),
    ('⁴', "4"),
    ('⁵', "5"),
    ('⁶', "6"),
    ('⁷', "7"),
    ('⁸', "8"),
    ('⁹', "9"),
    ('⁺', "+"),
    ('⁻', "-"),
    // 连字符与破折号
    ('‐', "-"),
    ('‑', "-"),
    ('‒', "-"),
    ('–', "-"),
    ('—', "-"),
    ('―', "-"),
    ('−', "-"),
    // 箭头
    ('→', "->"),
    ('←', "<-"),
    ('↔', "<->"),
    ('⇒', "=>"),
    // 引号
    ('‘', "'"),
    ('’', "'"),
    ('‚', "'"),
    ('‛', "'"),
    ('“', "\""),
    ('”', "\""),
    ('„', "\""),
    // 比较符号
    ('≤', "<="),
    ('≥', ">="),
    ('≠', "!="),
    ('≈', "~"),
    // 其他
    ('°', " degrees "),
    ('…', "..."),
    ('•', "-"),
    ('€', "EUR"),
    ('\u{00A0}', " "),
];

/// 报告字体能否直接编码该字符
///
/// 允许: 换行、制表符、ASCII 可打印字符、Latin-1 补充区 (0xA1..=0xFF)
pub fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' '..='~' | '\u{00A1}'..='\u{00FF}')
}

fn replacement_for(c: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, value)| *value)
}

/// 规范化报告文本
///
/// # 示例
/// ```
/// use lts_lab_analyzer::engine::text_normalizer::normalize;
/// assert_eq!(normalize("H₂S: 2.1 - ✅"), "H2S: 2.1 - OK");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dropped = 0usize;

    for c in text.chars() {
        if let Some(replacement) = replacement_for(c) {
            out.push_str(replacement);
        } else if is_encodable(c) {
            out.push(c);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "规范化丢弃了无法编码的字符");
    }
    out
}
