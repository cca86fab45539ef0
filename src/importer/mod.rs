// ==========================================
// LTS 化验分析系统 - 导入层
// ==========================================
// 职责: 外部化验样品表（Excel / CSV）-> 测量值
// 红线: 导入层只产出 Measurements,判定交给引擎层
// ==========================================

pub mod error;
pub mod file_parser;
pub mod sample_sheet;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use sample_sheet::{parse_measurement, SampleSheetImporter};
