// ==========================================
// LTS 化验分析系统 - PDF 写出器
// ==========================================
// 输出: PDF 1.4,A4 纵向,Helvetica 三种字形（WinAnsiEncoding）
// 支持: 文本定位、单个 RGB 图像（Logo）、多页
// 坐标: 对外使用毫米、左上角原点,内部换算为 PDF 磅坐标
// ==========================================

use crate::render::error::RenderResult;
use crate::render::font_metrics::PT_PER_MM;
use std::io::Write;

/// A4 纸张尺寸（毫米）
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// 字形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }

    const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];
}

/// 未压缩 RGB 图像（每像素 3 字节）
#[derive(Debug, Clone, PartialEq)]
pub struct PdfImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl PdfImage {
    /// 按宽度等比缩放后的高度（毫米）
    pub fn height_for_width(&self, width_mm: f64) -> f64 {
        if self.width_px == 0 {
            return 0.0;
        }
        width_mm * self.height_px as f64 / self.width_px as f64
    }
}

// ==========================================
// PdfWriter
// ==========================================
pub struct PdfWriter {
    pages: Vec<Vec<u8>>,
    image: Option<PdfImage>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            image: None,
        }
    }

    /// 注册图像（全文档共用一个 XObject）
    pub fn set_image(&mut self, image: PdfImage) {
        self.image = Some(image);
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 新建页面,之后的绘制落在该页
    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn current_page(&mut self) -> &mut Vec<u8> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// 绘制单行文本
    ///
    /// # 参数
    /// - `x_mm`: 左边距（毫米）
    /// - `baseline_mm`: 基线到页面顶部的距离（毫米）
    pub fn text(&mut self, x_mm: f64, baseline_mm: f64, style: FontStyle, size_pt: f64, text: &str) {
        let x = x_mm * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - baseline_mm) * PT_PER_MM;
        let page = self.current_page();
        page.extend_from_slice(
            format!(
                "BT /{} {:.2} Tf {:.2} {:.2} Td (",
                style.resource_name(),
                size_pt,
                x,
                y
            )
            .as_bytes(),
        );
        page.extend_from_slice(&encode_text(text));
        page.extend_from_slice(b") Tj ET\n");
    }

    /// 绘制已注册的图像,未注册时忽略
    ///
    /// # 参数
    /// - `x_mm` / `top_mm`: 图像左上角位置
    /// - `width_mm` / `height_mm`: 显示尺寸
    pub fn draw_image(&mut self, x_mm: f64, top_mm: f64, width_mm: f64, height_mm: f64) {
        if self.image.is_none() {
            return;
        }
        let w = width_mm * PT_PER_MM;
        let h = height_mm * PT_PER_MM;
        let x = x_mm * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - top_mm - height_mm) * PT_PER_MM;
        let page = self.current_page();
        page.extend_from_slice(
            format!("q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im1 Do Q\n", w, h, x, y).as_bytes(),
        );
    }

    /// 输出完整 PDF 字节流
    pub fn finish(mut self) -> RenderResult<Vec<u8>> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }

        // 对象编号: 1 Catalog, 2 Pages, 3..=5 字体, [6 图像], 之后每页 (Page, Contents)
        let font_base = 3;
        let image_id = self.image.as_ref().map(|_| font_base + FontStyle::ALL.len());
        let first_page_id = font_base + FontStyle::ALL.len() + usize::from(image_id.is_some());
        let page_ids: Vec<usize> = (0..self.pages.len())
            .map(|i| first_page_id + i * 2)
            .collect();
        let total_objects = first_page_id + self.pages.len() * 2;

        let mut out: Vec<u8> = Vec::new();
        let mut offsets = vec![0usize; total_objects];

        out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        // Catalog
        offsets[1] = out.len();
        write!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        // Pages
        offsets[2] = out.len();
        let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
        write!(
            out,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            page_ids.len()
        )?;

        // 字体
        for (i, style) in FontStyle::ALL.iter().enumerate() {
            let id = font_base + i;
            offsets[id] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                id,
                style.base_font()
            )?;
        }

        // 图像
        if let (Some(id), Some(image)) = (image_id, self.image.as_ref()) {
            offsets[id] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Length {} >>\nstream\n",
                id,
                image.width_px,
                image.height_px,
                image.rgb.len()
            )?;
            out.write_all(&image.rgb)?;
            out.write_all(b"\nendstream\nendobj\n")?;
        }

        // 页面
        let font_refs: String = FontStyle::ALL
            .iter()
            .enumerate()
            .map(|(i, style)| format!("/{} {} 0 R", style.resource_name(), font_base + i))
            .collect::<Vec<_>>()
            .join(" ");
        let xobject = image_id
            .map(|id| format!(" /XObject << /Im1 {} 0 R >>", id))
            .unwrap_or_default();

        for (page_id, content) in page_ids.iter().zip(self.pages.iter()) {
            let content_id = page_id + 1;

            offsets[*page_id] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << {} >>{} >> /Contents {} 0 R >>\nendobj\n",
                page_id,
                PAGE_WIDTH_MM * PT_PER_MM,
                PAGE_HEIGHT_MM * PT_PER_MM,
                font_refs,
                xobject,
                content_id
            )?;

            offsets[content_id] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Length {} >>\nstream\n",
                content_id,
                content.len()
            )?;
            out.write_all(content)?;
            out.write_all(b"\nendstream\nendobj\n")?;
        }

        // 交叉引用表
        let xref_offset = out.len();
        write!(out, "xref\n0 {}\n", total_objects)?;
        out.write_all(b"0000000000 65535 f \n")?;
        for offset in offsets.iter().skip(1) {
            write!(out, "{:010} 00000 n \n", offset)?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            total_objects, xref_offset
        )?;

        Ok(out)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// PDF 字符串编码: Latin-1 单字节 + 转义
///
/// 输入应已规范化;超出 Latin-1 的字符输出为 '?'
fn encode_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(c as u8);
            }
            '\t' => bytes.push(b' '),
            c if (c as u32) <= 0xFF && !c.is_control() => bytes.push(c as u32 as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}
