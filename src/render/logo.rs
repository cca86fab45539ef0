// ==========================================
// LTS 化验分析系统 - 报告 Logo 加载
// ==========================================
// 解码: image crate（PNG / JPEG 等）
// 处理: 透明像素以白底合成,过宽图像等比缩小
// 降级: 文件缺失或无法解码时返回 None,报告照常生成
// ==========================================

use crate::render::error::{RenderError, RenderResult};
use crate::render::pdf_writer::PdfImage;
use image::imageops::FilterType;
use std::path::Path;

/// Logo 最大像素宽度（33 mm 宽约 300 dpi）
pub const MAX_LOGO_WIDTH_PX: u32 = 400;

/// 加载 Logo,失败时降级为 None
pub fn load_logo(path: &Path) -> Option<PdfImage> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Logo 文件不存在,报告不含 Logo");
        return None;
    }

    match decode_logo(path) {
        Ok(image) => {
            tracing::debug!(
                path = %path.display(),
                width_px = image.width_px,
                height_px = image.height_px,
                "Logo 加载完成"
            );
            Some(image)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Logo 解码失败,报告不含 Logo");
            None
        }
    }
}

/// 解码图像为 RGB 像素
pub fn decode_logo(path: &Path) -> RenderResult<PdfImage> {
    let decoded = image::open(path).map_err(|e| RenderError::ImageDecode {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let decoded = if decoded.width() > MAX_LOGO_WIDTH_PX {
        decoded.resize(MAX_LOGO_WIDTH_PX, u32::MAX, FilterType::Triangle)
    } else {
        decoded
    };

    let rgba = decoded.to_rgba8();
    let (width_px, height_px) = rgba.dimensions();
    let mut rgb = Vec::with_capacity(width_px as usize * height_px as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.push(blend_on_white(r, a));
        rgb.push(blend_on_white(g, a));
        rgb.push(blend_on_white(b, a));
    }

    Ok(PdfImage {
        width_px,
        height_px,
        rgb,
    })
}

fn blend_on_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_blend_on_white() {
        assert_eq!(blend_on_white(0, 255), 0);
        assert_eq!(blend_on_white(0, 0), 255);
        assert_eq!(blend_on_white(200, 255), 200);
    }

    #[test]
    fn test_missing_logo_is_none() {
        assert!(load_logo(Path::new("no_existe/logopetrogas.png")).is_none());
    }

    #[test]
    fn test_corrupt_logo_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_logo(&path).is_none());
        assert!(decode_logo(&path).is_err());
    }

    #[test]
    fn test_png_logo_decoded_and_downsized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        let mut img = RgbaImage::new(800, 200);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 0]));
        img.save(&path).unwrap();

        let logo = load_logo(&path).unwrap();
        assert_eq!(logo.width_px, MAX_LOGO_WIDTH_PX);
        assert_eq!(logo.height_px, 100);
        assert_eq!(logo.rgb.len(), (logo.width_px * logo.height_px * 3) as usize);
    }

    #[test]
    fn test_small_logo_keeps_size_and_flattens_alpha() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 0]));
        img.save(&path).unwrap();

        let logo = decode_logo(&path).unwrap();
        assert_eq!((logo.width_px, logo.height_px), (2, 1));
        assert_eq!(logo.rgb, vec![10, 20, 30, 255, 255, 255]);
    }
}
