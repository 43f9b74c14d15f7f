//! # 转换器模块
//!
//! 单个文件的转换：解码 → 通道模式调整 → 编码 → 写出。
//!
//! ## 路由表
//! 以 (源扩展名, 目标格式) 为键映射到转换路由；未登记源扩展名时
//! 回退到仅按目标格式登记的默认路由。新增转换对只需登记路由，
//! 不需要改动分派逻辑。
//!
//! | 目标 | 通道调整 | 编码 |
//! |------|----------|------|
//! | jpeg | 合成到白色背景 | JPEG 质量 95 |
//! | png  | RGBA/LA/RGB 保留，其余转 RGBA | 默认 |
//! | tiff | 无 | 默认 |
//! | pdf  | 合成到白色背景 | A4 单页 |
//! | 其他 | 无 | 默认 |
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 和 `batch/runner.rs` 使用
//! - 子模块: channels, decode, pdf

pub mod channels;
pub mod decode;
pub mod pdf;

pub use decode::Decoder;

use crate::error::{ImgBatchError, Result};
use crate::models::{output_path_for, ConflictPolicy, ConversionResult, Outcome, TargetFormat};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// JPEG 编码质量
pub const JPEG_QUALITY: u8 = 95;

/// 通道调整函数
pub type Transform = fn(DynamicImage) -> DynamicImage;

/// 编码函数
pub type Encode = Box<dyn Fn(&DynamicImage) -> std::result::Result<Vec<u8>, String> + Send + Sync>;

/// 一条转换路由
pub struct Route {
    transform: Transform,
    encode: Encode,
}

impl Route {
    pub fn new<E>(transform: Transform, encode: E) -> Self
    where
        E: Fn(&DynamicImage) -> std::result::Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        Self {
            transform,
            encode: Box::new(encode),
        }
    }

    /// 使用 `image` crate 对该格式的默认编码
    fn with_default_encoder(transform: Transform, format: image::ImageFormat) -> Self {
        Self::new(transform, move |img| encode_default(img, format))
    }
}

/// 路由键：(小写源扩展名, 目标格式)
type RouteKey = (Option<String>, TargetFormat);

/// 单文件转换器
pub struct Converter {
    decoder: Decoder,
    routes: HashMap<RouteKey, Route>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Decoder::default())
    }
}

impl Converter {
    /// 创建带默认路由表的转换器
    pub fn new(decoder: Decoder) -> Self {
        let mut converter = Self {
            decoder,
            routes: HashMap::new(),
        };

        converter.register(None, TargetFormat::Jpeg, Route::new(channels::flatten_onto_white, encode_jpeg));
        converter.register(
            None,
            TargetFormat::Png,
            Route::with_default_encoder(channels::png_layout, image::ImageFormat::Png),
        );
        converter.register(None, TargetFormat::Pdf, Route::new(channels::flatten_onto_white, pdf::encode_page));

        for target in [
            TargetFormat::Tiff,
            TargetFormat::Webp,
            TargetFormat::Gif,
            TargetFormat::Bmp,
        ] {
            if let Some(format) = target.image_format() {
                converter.register(None, target, Route::with_default_encoder(channels::identity, format));
            }
        }

        converter
    }

    /// 按源扩展名覆盖默认路由
    #[cfg(test)]
    pub fn with_route(mut self, source_ext: &str, target: TargetFormat, route: Route) -> Self {
        self.register(Some(source_ext), target, route);
        self
    }

    /// 登记一条路由；`source_ext` 为 `None` 时作为该目标格式的默认路由
    fn register(&mut self, source_ext: Option<&str>, target: TargetFormat, route: Route) {
        let key = (source_ext.map(|s| s.to_ascii_lowercase()), target);
        self.routes.insert(key, route);
    }

    /// 查找路由：先精确匹配源扩展名，再回退到目标格式默认路由
    fn route(&self, item: &Path, target: TargetFormat) -> Result<&Route> {
        let ext = item
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        self.routes
            .get(&(ext, target))
            .or_else(|| self.routes.get(&(None, target)))
            .ok_or_else(|| ImgBatchError::InvalidArgument(format!("no conversion route to {}", target)))
    }

    /// 转换单个文件，错误被捕获为 `Outcome::Failure`
    pub fn convert(&self, item: &Path, target: TargetFormat, policy: ConflictPolicy) -> ConversionResult {
        let outcome = match self.try_convert(item, target, policy) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %item.display(), error = %e, "conversion failed");
                Outcome::Failure(e.to_string())
            }
        };

        ConversionResult {
            item: item.to_path_buf(),
            outcome,
        }
    }

    fn try_convert(&self, item: &Path, target: TargetFormat, policy: ConflictPolicy) -> Result<Outcome> {
        let output = output_path_for(item, target);

        if output.exists() {
            match policy {
                ConflictPolicy::Overwrite => {
                    debug!(path = %output.display(), "overwriting existing output");
                }
                ConflictPolicy::Skip => {
                    return Ok(Outcome::Skipped(format!("{} already exists", file_name(&output))));
                }
                ConflictPolicy::Error => {
                    return Err(ImgBatchError::OutputExists {
                        path: output.display().to_string(),
                    });
                }
            }
        }

        let route = self.route(item, target)?;
        let decoded = self.decoder.decode(item)?;
        debug!(
            path = %item.display(),
            color = ?decoded.color(),
            width = decoded.width(),
            height = decoded.height(),
            "decoded"
        );

        let prepared = (route.transform)(decoded);
        let bytes = (route.encode)(&prepared).map_err(|e| ImgBatchError::encode(item, e))?;
        write_output(&output, &bytes)?;

        Ok(Outcome::Success(output))
    }
}

/// JPEG 编码（固定质量）
fn encode_jpeg(img: &DynamicImage) -> std::result::Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(bytes)
}

/// `image` crate 的默认编码
fn encode_default(img: &DynamicImage, format: image::ImageFormat) -> std::result::Result<Vec<u8>, String> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format).map_err(|e| e.to_string())?;
    Ok(cursor.into_inner())
}

/// 写出编码结果；写入失败时只清理本次新建的残留文件
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let existed = path.exists();
    if let Err(e) = fs::write(path, bytes) {
        if !existed {
            let _ = fs::remove_file(path);
        }
        return Err(ImgBatchError::encode(path, e));
    }
    Ok(())
}

/// 文件名（用于消息）
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
