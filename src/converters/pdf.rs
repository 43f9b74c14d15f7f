//! # PDF 页面生成
//!
//! 每张图像占一页 A4，放置在固定 10 mm 边距内，宽度撑满版心，
//! 超高时按版心高度等比缩小。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 的 PDF 路由调用
//! - 使用 `lopdf` 构造文档对象

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// A4 页面宽度（pt）
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 页面高度（pt）
pub const PAGE_HEIGHT: f32 = 841.89;
/// 页边距（10 mm，单位 pt）
pub const MARGIN: f32 = 10.0 * 72.0 / 25.4;

/// 图像在页面上的位置（PDF 坐标系，原点在左下角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 计算图像放置位置：贴齐左上边距
pub fn place(image_width: u32, image_height: u32) -> Placement {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN;
    let max_height = PAGE_HEIGHT - 2.0 * MARGIN;
    let aspect = image_height.max(1) as f32 / image_width.max(1) as f32;

    let (width, height) = if max_width * aspect > max_height {
        (max_height / aspect, max_height)
    } else {
        (max_width, max_width * aspect)
    };

    Placement {
        x: MARGIN,
        y: PAGE_HEIGHT - MARGIN - height,
        width,
        height,
    }
}

/// 多页 PDF 文档构造器
pub struct PdfPages {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl Default for PdfPages {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfPages {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// 添加一页，页面上放置一张图像
    pub fn add_image(&mut self, img: &DynamicImage) -> Result<(), lopdf::Error> {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(w),
                "Height" => i64::from(h),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            rgb.into_raw(),
        ));

        let slot = place(w, h);
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        slot.width.into(),
                        0.into(),
                        0.into(),
                        slot.height.into(),
                        slot.x.into(),
                        slot.y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        });
        self.kids.push(page_id.into());

        Ok(())
    }

    /// 完成文档并序列化
    pub fn into_bytes(mut self) -> Result<Vec<u8>, lopdf::Error> {
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
impl PdfPages {
    pub fn len(&self) -> usize {
        self.kids.len()
    }
}

/// 单页 PDF 编码（转换路由使用）
pub fn encode_page(img: &DynamicImage) -> Result<Vec<u8>, String> {
    let mut pages = PdfPages::new();
    pages.add_image(img).map_err(|e| e.to_string())?;
    pages.into_bytes().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_place_wide_image_fills_width() {
        let slot = place(2000, 1000);
        assert!((slot.x - MARGIN).abs() < 1e-3);
        assert!((slot.width - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 1e-3);
        assert!((slot.height - slot.width / 2.0).abs() < 1e-3);
        // 顶部贴齐上边距
        assert!((slot.y + slot.height - (PAGE_HEIGHT - MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn test_place_tall_image_fits_height() {
        let slot = place(100, 1000);
        assert!((slot.height - (PAGE_HEIGHT - 2.0 * MARGIN)).abs() < 1e-3);
        assert!(slot.width < PAGE_WIDTH - 2.0 * MARGIN);
        assert!((slot.y - MARGIN).abs() < 1e-3);
    }

    #[test]
    fn test_encode_page_produces_loadable_pdf() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([0, 128, 255])));
        let bytes = encode_page(&img).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_multiple_pages() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(3, 3));
        let mut pages = PdfPages::new();
        pages.add_image(&img).unwrap();
        pages.add_image(&img).unwrap();
        assert_eq!(pages.len(), 2);

        let doc = Document::load_mem(&pages.into_bytes().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
