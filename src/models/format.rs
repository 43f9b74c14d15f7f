//! # 图像格式定义
//!
//! 源格式选择器、目标格式，以及每种格式对应的 glob 模式。
//!
//! ## 依赖关系
//! - 被 `cli/`, `batch/`, `converters/` 使用
//! - 使用 `image` crate 的 `ImageFormat`

use clap::ValueEnum;

/// 源格式选择器
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SourceFormat {
    /// JPEG (.jpg / .jpeg, any case)
    Jpeg,
    /// Portable Network Graphics
    Png,
    /// WebP
    Webp,
    /// TIFF (.tif / .tiff)
    Tiff,
    /// GIF (first frame)
    Gif,
    /// Windows bitmap
    Bmp,
    /// AVIF (decoded through ImageMagick)
    Avif,
    /// Apple HEIC/HEIF photo container (decoded through ImageMagick)
    Heic,
    /// Every raster format above
    All,
    /// Files named `pdf_*`, intended for the PDF target
    PdfPrefixed,
}

impl SourceFormat {
    /// 该选择器对应的 glob 模式（大小写两种扩展名）
    pub fn patterns(&self) -> Vec<String> {
        let suffixes: &[&str] = match self {
            SourceFormat::Jpeg => &["jpg", "jpeg"],
            SourceFormat::Png => &["png"],
            SourceFormat::Webp => &["webp"],
            SourceFormat::Tiff => &["tif", "tiff"],
            SourceFormat::Gif => &["gif"],
            SourceFormat::Bmp => &["bmp"],
            SourceFormat::Avif => &["avif"],
            SourceFormat::Heic => &["heic", "heif"],
            SourceFormat::PdfPrefixed => return vec!["pdf_*".to_string()],
            SourceFormat::All => {
                return Self::raster()
                    .iter()
                    .flat_map(|f| f.patterns())
                    .collect();
            }
        };

        suffixes
            .iter()
            .flat_map(|s| [format!("*.{}", s), format!("*.{}", s.to_uppercase())])
            .collect()
    }

    /// 所有具体的光栅源格式
    pub fn raster() -> &'static [SourceFormat] {
        &[
            SourceFormat::Jpeg,
            SourceFormat::Png,
            SourceFormat::Webp,
            SourceFormat::Tiff,
            SourceFormat::Gif,
            SourceFormat::Bmp,
            SourceFormat::Avif,
            SourceFormat::Heic,
        ]
    }

    /// 是否与目标格式相同（同格式重编码）
    pub fn overlaps(&self, target: TargetFormat) -> bool {
        match self {
            SourceFormat::All => target != TargetFormat::Pdf,
            SourceFormat::PdfPrefixed => false,
            _ => target.source() == Some(*self),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Jpeg => write!(f, "jpeg"),
            SourceFormat::Png => write!(f, "png"),
            SourceFormat::Webp => write!(f, "webp"),
            SourceFormat::Tiff => write!(f, "tiff"),
            SourceFormat::Gif => write!(f, "gif"),
            SourceFormat::Bmp => write!(f, "bmp"),
            SourceFormat::Avif => write!(f, "avif"),
            SourceFormat::Heic => write!(f, "heic"),
            SourceFormat::All => write!(f, "all"),
            SourceFormat::PdfPrefixed => write!(f, "pdf_*"),
        }
    }
}

/// 目标格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// JPEG, alpha flattened onto white
    Jpeg,
    /// PNG, RGBA/LA/RGB kept, other layouts promoted to RGBA
    Png,
    /// TIFF, encoded as decoded
    Tiff,
    /// WebP (lossless)
    Webp,
    /// GIF
    Gif,
    /// Windows bitmap
    Bmp,
    /// One-page PDF document per image
    Pdf,
}

impl TargetFormat {
    /// 输出文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::Tiff => "tiff",
            TargetFormat::Webp => "webp",
            TargetFormat::Gif => "gif",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Pdf => "pdf",
        }
    }

    /// 对应的 `image` crate 编码格式（PDF 不经过 `image`）
    pub fn image_format(&self) -> Option<image::ImageFormat> {
        match self {
            TargetFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            TargetFormat::Png => Some(image::ImageFormat::Png),
            TargetFormat::Tiff => Some(image::ImageFormat::Tiff),
            TargetFormat::Webp => Some(image::ImageFormat::WebP),
            TargetFormat::Gif => Some(image::ImageFormat::Gif),
            TargetFormat::Bmp => Some(image::ImageFormat::Bmp),
            TargetFormat::Pdf => None,
        }
    }

    /// 同一格式作为源时的选择器
    pub fn source(&self) -> Option<SourceFormat> {
        match self {
            TargetFormat::Jpeg => Some(SourceFormat::Jpeg),
            TargetFormat::Png => Some(SourceFormat::Png),
            TargetFormat::Tiff => Some(SourceFormat::Tiff),
            TargetFormat::Webp => Some(SourceFormat::Webp),
            TargetFormat::Gif => Some(SourceFormat::Gif),
            TargetFormat::Bmp => Some(SourceFormat::Bmp),
            TargetFormat::Pdf => None,
        }
    }

    /// 编码策略说明
    pub fn policy(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "flatten alpha onto white, quality 95",
            TargetFormat::Png => "keep RGBA/LA/RGB, promote others to RGBA",
            TargetFormat::Tiff => "encode as decoded",
            TargetFormat::Webp | TargetFormat::Gif | TargetFormat::Bmp => "codec default",
            TargetFormat::Pdf => "A4 page, 10 mm margin, alpha flattened",
        }
    }

    pub fn all() -> &'static [TargetFormat] {
        &[
            TargetFormat::Jpeg,
            TargetFormat::Png,
            TargetFormat::Tiff,
            TargetFormat::Webp,
            TargetFormat::Gif,
            TargetFormat::Bmp,
            TargetFormat::Pdf,
        ]
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 需要外部解码器（ImageMagick）的扩展名
pub fn needs_external_decoder(extension: &str) -> bool {
    matches!(
        extension.to_ascii_lowercase().as_str(),
        "heic" | "heif" | "avif"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_include_case_variants() {
        let patterns = SourceFormat::Heic.patterns();
        assert!(patterns.contains(&"*.heic".to_string()));
        assert!(patterns.contains(&"*.HEIC".to_string()));

        let jpeg = SourceFormat::Jpeg.patterns();
        assert_eq!(jpeg, vec!["*.jpg", "*.JPG", "*.jpeg", "*.JPEG"]);
    }

    #[test]
    fn test_all_covers_every_raster_format() {
        let all = SourceFormat::All.patterns();
        assert!(all.contains(&"*.png".to_string()));
        assert!(all.contains(&"*.TIFF".to_string()));
        assert!(!all.iter().any(|p| p.starts_with("pdf_")));
    }

    #[test]
    fn test_overlaps() {
        assert!(SourceFormat::Png.overlaps(TargetFormat::Png));
        assert!(!SourceFormat::Png.overlaps(TargetFormat::Tiff));
        assert!(SourceFormat::All.overlaps(TargetFormat::Jpeg));
        assert!(!SourceFormat::PdfPrefixed.overlaps(TargetFormat::Pdf));
    }

    #[test]
    fn test_external_decoder() {
        assert!(needs_external_decoder("HEIC"));
        assert!(needs_external_decoder("avif"));
        assert!(!needs_external_decoder("png"));
    }
}
