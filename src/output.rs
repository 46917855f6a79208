//! Encoding a composed scene to disk.
//!
//! The SVG document is the single source of truth; raster formats are
//! produced by rasterizing it with resvg at `dpi / 72` pixels per point.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tiny_skia::{Pixmap, Transform};

use crate::errors::OutputWriteError;
use crate::render::{RenderConfig, Scene, generate_svg};
use crate::types::Scaler;

/// Encoding chosen from the output path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Unknown or missing extensions encode as PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => OutputFormat::Svg,
            "jpg" | "jpeg" => OutputFormat::Jpeg,
            "bmp" => OutputFormat::Bmp,
            "tif" | "tiff" => OutputFormat::Tiff,
            _ => OutputFormat::Png,
        }
    }

    fn image_format(self) -> Option<ImageFormat> {
        match self {
            OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(ImageFormat::Bmp),
            OutputFormat::Tiff => Some(ImageFormat::Tiff),
            OutputFormat::Svg | OutputFormat::Png => None,
        }
    }
}

/// System fonts, loaded on first raster output and shared afterwards.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            crate::log::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document at the given resolution.
pub fn rasterize(svg: &str, dpi: f64) -> Result<Pixmap, OutputWriteError> {
    let scaler = Scaler::for_dpi(dpi).map_err(|_| OutputWriteError::InvalidDpi { value: dpi })?;

    let options = usvg::Options { fontdb: font_database(), ..usvg::Options::default() };
    let tree = usvg::Tree::from_str(svg, &options)?;

    let size = tree.size();
    let width = scaler.px_ceil(size.width() as f64);
    let height = scaler.px_ceil(size.height() as f64);
    let mut pixmap = Pixmap::new(width, height).ok_or(OutputWriteError::Surface { width, height })?;

    let scale = scaler.px_per_pt as f32;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Write `scene` to `path`, choosing the encoding from the extension.
///
/// Returns the path written. Nothing is written when encoding fails.
pub fn write(scene: &Scene, path: &Path, config: &RenderConfig) -> Result<PathBuf, OutputWriteError> {
    let format = OutputFormat::from_path(path);
    let svg = generate_svg(scene, config)?;

    let bytes = match format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => {
            let pixmap = rasterize(&svg, config.dpi)?;
            pixmap
                .encode_png()
                .map_err(|e| OutputWriteError::Encode { message: e.to_string() })?
        }
        other => {
            let pixmap = rasterize(&svg, config.dpi)?;
            let image_format = other.image_format().unwrap_or(ImageFormat::Png);
            return save_with_image(&pixmap, path, image_format);
        }
    };

    std::fs::write(path, bytes).map_err(|source| OutputWriteError::Io { path: path.to_path_buf(), source })?;
    crate::log::info!(path = %path.display(), ?format, "wrote scene");
    Ok(path.to_path_buf())
}

fn save_with_image(pixmap: &Pixmap, path: &Path, format: ImageFormat) -> Result<PathBuf, OutputWriteError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let pixels: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let rgba = RgbaImage::from_raw(width, height, pixels).ok_or(OutputWriteError::Surface { width, height })?;

    // JPEG has no alpha channel
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => DynamicImage::ImageRgba8(rgba),
    };

    image.save_with_format(path, format).map_err(|err| match err {
        image::ImageError::IoError(source) => OutputWriteError::Io { path: path.to_path_buf(), source },
        other => OutputWriteError::Encode { message: other.to_string() },
    })?;
    crate::log::info!(path = %path.display(), ?format, "wrote scene");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("a.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPEG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.tif")), OutputFormat::Tiff);
        assert_eq!(OutputFormat::from_path(Path::new("a.bmp")), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path(Path::new("layout")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("layout.webp")), OutputFormat::Png);
    }

    #[test]
    fn rasterize_scales_by_dpi() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 72 36" width="72" height="36"><rect width="72" height="36" fill="#ff0000"/></svg>"##;
        let pixmap = rasterize(svg, 144.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (144, 72));
        let center = pixmap.pixel(72, 36).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (255, 0, 0));
    }

    #[test]
    fn rasterize_rejects_bad_dpi() {
        let err = rasterize("<svg/>", 0.0).unwrap_err();
        assert!(matches!(err, OutputWriteError::InvalidDpi { .. }));
    }

    #[test]
    fn rasterize_rejects_bad_svg() {
        let err = rasterize("not svg", 72.0).unwrap_err();
        assert!(matches!(err, OutputWriteError::Svg(_)));
    }
}
