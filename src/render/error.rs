// ==========================================
// LTS 化验分析系统 - 渲染层错误类型
// ==========================================

use thiserror::Error;

/// 渲染层错误类型
///
/// Logo 缺失/损坏不属于错误,渲染器降级为无 Logo 输出
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("报告写出失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("图像解码失败: {path}: {message}")]
    ImageDecode { path: String, message: String },
}

/// Result 类型别名
pub type RenderResult<T> = Result<T, RenderError>;
