// ==========================================
// LTS 化验分析系统 - 配置层
// ==========================================
// 职责: 报告外观、输出目录、语言等系统配置
// 存储: JSON 键值文件
// ==========================================

pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, default_output_dir, ConfigManager};
pub use error::{ConfigError, ConfigResult};
