//! # 解码器
//!
//! 将源文件解码为 `DynamicImage`。
//!
//! ## 解码路径
//! - 常规光栅格式：`image` crate（按内容猜测格式，回退到扩展名）
//! - HEIC/HEIF/AVIF：调用外部 ImageMagick，经由 PNG 管道读回
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `models/format.rs` 判断是否需要外部解码器

use crate::error::{ImgBatchError, Result};
use crate::models::format::needs_external_decoder;

use image::DynamicImage;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// 默认的 ImageMagick 命令
pub const DEFAULT_MAGICK: &str = "magick";

/// 源文件解码器
#[derive(Debug, Clone)]
pub struct Decoder {
    magick: String,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAGICK)
    }
}

impl Decoder {
    pub fn new(magick: impl Into<String>) -> Self {
        Self {
            magick: magick.into(),
        }
    }

    /// 解码单个文件
    pub fn decode(&self, path: &Path) -> Result<DynamicImage> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        if needs_external_decoder(ext) {
            return self.decode_external(path);
        }

        let reader = image::ImageReader::open(path)
            .map_err(|e| ImgBatchError::decode(path, e))?
            .with_guessed_format()
            .map_err(|e| ImgBatchError::decode(path, e))?;

        debug!(path = %path.display(), format = ?reader.format(), "decoding");

        reader.decode().map_err(|e| ImgBatchError::decode(path, e))
    }

    /// 通过 ImageMagick 解码（只取第一帧）
    fn decode_external(&self, path: &Path) -> Result<DynamicImage> {
        debug!(path = %path.display(), command = %self.magick, "decoding externally");

        let output = Command::new(&self.magick)
            .arg(format!("{}[0]", path.display()))
            .arg("png:-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ImgBatchError::CommandNotFound {
                    command: self.magick.clone(),
                },
                _ => ImgBatchError::decode(path, format!("cannot run {}: {}", self.magick, e)),
            })?;

        if !output.status.success() {
            return Err(ImgBatchError::decode(
                path,
                ImgBatchError::CommandFailed {
                    command: self.magick.clone(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                },
            ));
        }

        image::load_from_memory_with_format(&output.stdout, image::ImageFormat::Png)
            .map_err(|e| ImgBatchError::decode(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(4, 3, Rgb([255, 0, 0])).save(&path).unwrap();

        let img = Decoder::default().decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"this is not a jpeg").unwrap();

        let err = Decoder::default().decode(&path).unwrap_err();
        assert!(matches!(err, ImgBatchError::DecodeError { .. }));
        assert!(err.to_string().starts_with("decode error: "));
    }

    #[test]
    fn test_missing_external_decoder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.HEIC");
        std::fs::write(&path, b"heic").unwrap();

        let decoder = Decoder::new("imgbatch-no-such-magick-binary");
        let err = decoder.decode(&path).unwrap_err();
        assert!(matches!(err, ImgBatchError::CommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unrunnable_external_decoder_is_decode_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.heic");
        std::fs::write(&path, b"heic").unwrap();

        let magick = dir.path().join("magick");
        std::fs::write(&magick, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&magick, std::fs::Permissions::from_mode(0o644)).unwrap();

        let decoder = Decoder::new(magick.display().to_string());
        let err = decoder.decode(&path).unwrap_err();
        assert!(matches!(err, ImgBatchError::DecodeError { .. }), "{err}");
        assert!(err.to_string().contains("cannot run"));
    }
}
