//! HTML → PNG rasterization.

use std::io::Cursor;
use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use printpdf::image_crate::io::Reader as ImageReader;
use tokio::process::Command;
use tracing::debug;

use crate::export::ExportError;
use crate::render::html::PAGE_WIDTH_PX;

/// Device pixels per CSS pixel used for export.
pub const EXPORT_SCALE: f32 = 2.0;

/// A PNG bitmap with its pixel dimensions.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub png: Bytes,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    /// Wraps PNG bytes, reading the dimensions from the image header.
    pub fn from_png(png: impl Into<Bytes>) -> Result<Self, ExportError> {
        let png = png.into();
        let (width, height) = ImageReader::new(Cursor::new(png.as_ref()))
            .with_guessed_format()
            .map_err(|e| ExportError::Rasterize(e.to_string()))?
            .into_dimensions()
            .map_err(|e| ExportError::Rasterize(e.to_string()))?;
        Ok(Self { png, width, height })
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, html: &str, scale: f32) -> Result<RasterImage, ExportError>;
}

/// Rasterizes by running an external HTML-to-image program
/// (`wkhtmltoimage`-compatible arguments) in a scratch directory.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Rasterizer for CommandRasterizer {
    async fn rasterize(&self, html: &str, scale: f32) -> Result<RasterImage, ExportError> {
        let workdir = tempfile::tempdir().map_err(|e| ExportError::Rasterize(e.to_string()))?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.png");
        tokio::fs::write(&input, html)
            .await
            .map_err(|e| ExportError::Rasterize(e.to_string()))?;

        let width = (PAGE_WIDTH_PX as f32 * scale).round() as u32;
        debug!("Running {} (width {width}px, zoom {scale})", self.program);

        let result = Command::new(&self.program)
            .arg("--quiet")
            .arg("--format")
            .arg("png")
            .arg("--width")
            .arg(width.to_string())
            .arg("--zoom")
            .arg(scale.to_string())
            .arg(&input)
            .arg(&output)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExportError::Rasterize(format!("failed to run {}: {e}", self.program)))?;

        if !result.status.success() {
            return Err(ExportError::Rasterize(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let png = tokio::fs::read(&output)
            .await
            .map_err(|e| ExportError::Rasterize(e.to_string()))?;
        RasterImage::from_png(png)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use printpdf::image_crate::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Encodes a solid white PNG of the given size.
    pub(crate) fn white_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    /// Returns a fixed image and counts how often it was asked to rasterize.
    pub(crate) struct FakeRasterizer {
        pub calls: AtomicUsize,
        width: u32,
        height: u32,
    }

    impl FakeRasterizer {
        pub(crate) fn new(width: u32, height: u32) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                width,
                height,
            }
        }
    }

    #[async_trait]
    impl Rasterizer for FakeRasterizer {
        async fn rasterize(&self, _html: &str, _scale: f32) -> Result<RasterImage, ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RasterImage::from_png(white_png(self.width, self.height))
        }
    }

    #[test]
    fn test_from_png_reads_dimensions() {
        let image = RasterImage::from_png(white_png(40, 60)).unwrap();
        assert_eq!((image.width, image.height), (40, 60));
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        assert!(matches!(
            RasterImage::from_png(b"not an image".to_vec()),
            Err(ExportError::Rasterize(_))
        ));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_abandoned_rasterizer_process_is_killed() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = dir.path().join("slow-rasterizer");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho $$ > '{}'\nexec sleep 30\n", pid_file.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let rasterizer = CommandRasterizer::new(script.to_string_lossy());
        let result = tokio::time::timeout(
            Duration::from_millis(500),
            rasterizer.rasterize("<html></html>", EXPORT_SCALE),
        )
        .await;
        assert!(result.is_err(), "rasterizer should still be running");

        let pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();
        let stat = format!("/proc/{pid}/stat");
        let mut alive = true;
        for _ in 0..50 {
            // Gone, or a zombie waiting to be reaped.
            alive = match std::fs::read_to_string(&stat) {
                Ok(line) => !line.rsplit(')').next().unwrap_or("").trim_start().starts_with('Z'),
                Err(_) => false,
            };
            if !alive {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(!alive, "process {pid} outlived the export");
    }

    #[tokio::test]
    async fn test_missing_program_is_rasterize_error() {
        let rasterizer = CommandRasterizer::new("resumaster-no-such-rasterizer");
        let result = rasterizer.rasterize("<html></html>", EXPORT_SCALE).await;
        assert!(matches!(result, Err(ExportError::Rasterize(_))));
    }
}
