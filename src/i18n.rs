// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持西班牙语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 报告渲染使用显式 locale 参数,不依赖全局 locale,
// 避免并发会话之间互相影响
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "es";

/// 报告支持的语言（报告字体为 Latin-1,仅提供拉丁字母语言）
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

/// 规范化语言代码,不支持的语言回退为默认语言
///
/// # 示例
/// ```
/// use lts_lab_analyzer::i18n::resolve_locale;
/// assert_eq!(resolve_locale("EN"), "en");
/// assert_eq!(resolve_locale("fr"), "es");
/// ```
pub fn resolve_locale(locale: &str) -> &'static str {
    let lower = locale.trim().to_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or("");
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| *l == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言（命令行启动时使用）
///
/// # 参数
/// - locale: 语言代码（"es" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(resolve_locale(locale));
}

/// 翻译消息（当前语言）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（指定语言）
///
/// # 示例
/// ```no_run
/// use lts_lab_analyzer::i18n::tr;
/// let title = tr("en", "report.section.results");
/// ```
pub fn tr(locale: &str, key: &str) -> String {
    let locale = resolve_locale(locale);
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（指定语言,带参数）
///
/// # 示例
/// ```no_run
/// use lts_lab_analyzer::i18n::tr_with_args;
/// let msg = tr_with_args("es", "import.file_not_found", &[("path", "/tmp/muestra.csv")]);
/// ```
pub fn tr_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = tr(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态,且 Rust 测试默认并行执行;
    // 涉及全局 locale 的测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale("es"), "es");
        assert_eq!(resolve_locale("en-US"), "en");
        assert_eq!(resolve_locale("es_AR"), "es");
        assert_eq!(resolve_locale(""), "es");
        assert_eq!(resolve_locale("zh-CN"), "es");
    }

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");
        assert_eq!(t("common.success"), "Operation successful");

        set_locale("es");
        assert_eq!(current_locale(), "es");
        assert_eq!(t("common.success"), "Operación exitosa");
    }

    #[test]
    fn test_translate_explicit_locale() {
        assert_eq!(tr("es", "report.section.operator"), "Operador");
        assert_eq!(tr("en", "report.section.operator"), "Operator");
        assert_eq!(tr("en", "report.no_observations"), "No observations.");
        assert_eq!(tr("es", "report.no_observations"), "Sin observaciones.");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = tr_with_args("es", "report.date", &[("date", "2025-06-01 08:30")]);
        assert_eq!(msg, "Fecha: 2025-06-01 08:30");

        let msg = tr_with_args("en", "import.file_not_found", &[("path", "/tmp/a.csv")]);
        assert!(msg.contains("/tmp/a.csv"));
        assert!(msg.contains("File not found"));
    }
}
