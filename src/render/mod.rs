// ==========================================
// LTS 化验分析系统 - 渲染层
// ==========================================
// 职责: 结构化报告 -> PDF 字节流 / 纯文本
// 红线: 不写持久化存储,字节流交给调用方下载或保存
// ==========================================

pub mod error;
pub mod font_metrics;
pub mod logo;
pub mod pdf_renderer;
pub mod pdf_writer;
pub mod text_renderer;

// 重导出核心类型
pub use error::{RenderError, RenderResult};
pub use logo::load_logo;
pub use pdf_renderer::PdfRenderer;
pub use pdf_writer::{FontStyle, PdfImage, PdfWriter};
pub use text_renderer::TextRenderer;
