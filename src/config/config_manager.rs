// ==========================================
// LTS 化验分析系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写与保存
// 存储: JSON 键值文件（key -> value 字符串）
// 规则: 文件不存在时全部使用默认值;保存时整体覆写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::report_assembler::ReportSettings;
use crate::i18n::{resolve_locale, DEFAULT_LOCALE};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "LTS_LAB_ANALYZER_CONFIG";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 默认 Logo 文件
pub const DEFAULT_LOGO_PATH: &str = "logopetrogas.png";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl ConfigManager {
    /// 从配置文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径（不存在时视为空配置）
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            tracing::debug!(path = %path.display(), "配置文件不存在,使用默认配置");
            BTreeMap::new()
        };

        tracing::info!(path = %path.display(), keys = values.len(), "配置加载完成");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// 从默认路径加载
    pub fn from_default_path() -> ConfigResult<Self> {
        Self::load(default_config_path())
    }

    /// 配置文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值（空白值视为未配置）
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self.values.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        Ok(values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（仅内存,调用 save 后落盘）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut values = self.values.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// 保存到配置文件
    pub fn save(&self) -> ConfigResult<()> {
        let json = self.get_config_snapshot()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式,按 key 排序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self.values.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        Ok(serde_json::to_string_pretty(&*values)?)
    }

    /// 从配置快照恢复配置（覆盖同名 key）
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let snapshot: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        let mut values = self.values.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let count = snapshot.len();
        values.extend(snapshot);
        Ok(count)
    }

    // ===== 报告配置 =====

    /// Logo 图片路径
    pub fn get_logo_path(&self) -> ConfigResult<PathBuf> {
        Ok(PathBuf::from(
            self.get_config_or_default(config_keys::LOGO_PATH, DEFAULT_LOGO_PATH)?,
        ))
    }

    /// 报告输出目录（默认: 用户文档目录,取不到时为当前目录）
    pub fn get_output_dir(&self) -> ConfigResult<PathBuf> {
        Ok(match self.get_config_value(config_keys::OUTPUT_DIR)? {
            Some(dir) => PathBuf::from(dir),
            None => default_output_dir(),
        })
    }

    /// 报告语言（不支持的语言回退为默认语言）
    pub fn get_locale(&self) -> ConfigResult<String> {
        let locale = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)?;
        Ok(resolve_locale(&locale).to_string())
    }

    /// 报告标题覆写
    pub fn get_report_title(&self) -> ConfigResult<Option<String>> {
        self.get_config_value(config_keys::REPORT_TITLE)
    }

    /// 页脚文本覆写
    pub fn get_footer_text(&self) -> ConfigResult<Option<String>> {
        self.get_config_value(config_keys::FOOTER_TEXT)
    }

    /// 组装报告外观配置
    pub fn report_settings(&self) -> ConfigResult<ReportSettings> {
        Ok(ReportSettings {
            logo_path: Some(self.get_logo_path()?),
            title: self.get_report_title()?,
            footer: self.get_footer_text()?,
        })
    }
}

// ==========================================
// 默认路径
// ==========================================

/// 获取默认配置文件路径
///
/// 优先级: 环境变量 LTS_LAB_ANALYZER_CONFIG > 用户配置目录 > 当前目录
pub fn default_config_path() -> PathBuf {
    // 允许通过环境变量显式指定配置路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("lts-lab-analyzer").join(CONFIG_FILE_NAME),
        None => PathBuf::from(".").join(CONFIG_FILE_NAME),
    }
}

/// 默认报告输出目录
pub fn default_output_dir() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 报告外观
    pub const LOGO_PATH: &str = "logo_path";
    pub const REPORT_TITLE: &str = "report_title";
    pub const FOOTER_TEXT: &str = "footer_text";

    // 输出
    pub const OUTPUT_DIR: &str = "output_dir";

    // 语言
    pub const LOCALE: &str = "locale";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::load(dir.path().join("config.json")).unwrap();

        assert_eq!(config.get_logo_path().unwrap(), PathBuf::from(DEFAULT_LOGO_PATH));
        assert_eq!(config.get_locale().unwrap(), "es");
        assert_eq!(config.get_report_title().unwrap(), None);
        assert_eq!(config.get_output_dir().unwrap(), default_output_dir());
    }

    #[test]
    fn test_load_and_typed_getters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"locale": "en-US", "logo_path": "/opt/logo.png", "footer_text": "  "}"#,
        )
        .unwrap();

        let config = ConfigManager::load(&path).unwrap();
        assert_eq!(config.get_locale().unwrap(), "en");
        assert_eq!(config.get_logo_path().unwrap(), PathBuf::from("/opt/logo.png"));
        // 空白值视为未配置
        assert_eq!(config.get_footer_text().unwrap(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ConfigManager::load(&path).unwrap();
        config
            .set_config_value(config_keys::REPORT_TITLE, "INFORME LTS")
            .unwrap();
        config.save().unwrap();

        let reloaded = ConfigManager::load(&path).unwrap();
        assert_eq!(
            reloaded.get_report_title().unwrap(),
            Some("INFORME LTS".to_string())
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(ConfigManager::load(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_snapshot_restore() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::load(dir.path().join("config.json")).unwrap();
        let restored = config
            .restore_config_from_snapshot(r#"{"locale": "en", "output_dir": "/tmp/informes"}"#)
            .unwrap();

        assert_eq!(restored, 2);
        assert_eq!(config.get_output_dir().unwrap(), PathBuf::from("/tmp/informes"));
        assert!(config.get_config_snapshot().unwrap().contains("\"locale\""));
    }
}
