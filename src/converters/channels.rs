//! # 通道模式调整
//!
//! 编码前的像素模式转换，全部为纯函数。
//!
//! - `flatten_onto_white`: 透明度合成到不透明白色背景（JPEG/PDF）
//! - `png_layout`: RGBA8 / LA8 / RGB8 原样保留，其余提升为 RGBA8
//! - `identity`: 不做调整（TIFF 及其他格式）

use image::{DynamicImage, Rgb, RgbImage};

/// 不做任何调整
pub fn identity(img: DynamicImage) -> DynamicImage {
    img
}

/// 将带透明度的图像合成到白色背景上
///
/// 无透明通道的 8 位灰度和 RGB 图像原样返回，其它无透明通道的布局降为 8 位。
pub fn flatten_onto_white(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
    }

    let rgba = img.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = u32::from(px[3]);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        flat.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }

    DynamicImage::ImageRgb8(flat)
}

/// PNG 通道布局：支持的布局原样保留，其余转为 RGBA8
pub fn png_layout(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgba8(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageRgb8(_) => {
            img
        }
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_flatten_transparent_pixels_become_white() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        src.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        src.put_pixel(0, 1, Rgba([10, 20, 30, 255]));
        src.put_pixel(1, 1, Rgba([0, 0, 0, 128]));

        let flat = flatten_onto_white(DynamicImage::ImageRgba8(src)).to_rgb8();

        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(0, 1), &Rgb([10, 20, 30]));
        // 半透明黑色 -> 中灰
        let grey = flat.get_pixel(1, 1)[0];
        assert!((126..=128).contains(&grey), "got {grey}");
    }

    #[test]
    fn test_flatten_luma_alpha() {
        let mut src = image::GrayAlphaImage::new(1, 2);
        src.put_pixel(0, 0, LumaA([0, 0]));
        src.put_pixel(0, 1, LumaA([40, 255]));

        let flat = flatten_onto_white(DynamicImage::ImageLumaA8(src));
        assert_eq!(flat.color(), image::ColorType::Rgb8);
        let flat = flat.to_rgb8();
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(0, 1), &Rgb([40, 40, 40]));
    }

    #[test]
    fn test_flatten_keeps_opaque_layouts() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([7])));
        assert_eq!(flatten_onto_white(gray).color(), image::ColorType::L8);

        let rgb = DynamicImage::ImageRgb8(RgbImage::new(3, 3));
        assert_eq!(flatten_onto_white(rgb).color(), image::ColorType::Rgb8);

        let rgb16 = DynamicImage::ImageRgb16(image::ImageBuffer::new(3, 3));
        assert_eq!(flatten_onto_white(rgb16).color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_png_layout_passthrough() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        assert_eq!(png_layout(rgba).color(), image::ColorType::Rgba8);

        let la = DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(2, 2));
        assert_eq!(png_layout(la).color(), image::ColorType::La8);

        let rgb = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert_eq!(png_layout(rgb).color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_png_layout_promotes_others() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([90])));
        let promoted = png_layout(gray);
        assert_eq!(promoted.color(), image::ColorType::Rgba8);
        assert_eq!(promoted.to_rgba8().get_pixel(1, 1), &Rgba([90, 90, 90, 255]));

        let rgba16 = DynamicImage::ImageRgba16(image::ImageBuffer::new(2, 2));
        assert_eq!(png_layout(rgba16).color(), image::ColorType::Rgba8);
    }
}
