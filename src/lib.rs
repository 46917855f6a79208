//! Render structured room descriptions into 2D layout diagrams.
//!
//! A scene description (JSON) names a room and its furnishings, each placed
//! with compass tokens such as `north-northeast`. Rendering resolves every
//! token to a fixed anchor in the room's unit square, draws each visible
//! item with its variant's shape, adds a compass rose, title and info box,
//! and encodes the result as SVG or a raster image.
//!
//! ```no_run
//! use std::path::Path;
//! use roomplot::render::RenderConfig;
//!
//! let report = roomplot::render_file(
//!     Path::new("room_description.json"),
//!     Path::new("room_layout.png"),
//!     &RenderConfig::default(),
//! )?;
//! println!("Image saved to: {}", report.output.display());
//! # Ok::<(), roomplot::Error>(())
//! ```

pub mod compass;
pub mod errors;
pub mod loader;
pub mod log;
pub mod model;
pub mod output;
pub mod render;
pub mod types;

use std::path::{Path, PathBuf};

pub use errors::{Error, OutputWriteError, SchemaError};
pub use loader::LoadOrigin;
pub use model::{Item, Room, SceneDescription};
pub use render::{RenderConfig, Scene, compose};

/// What a successful [`render_file`] produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub output: PathBuf,
    pub origin: LoadOrigin,
    pub fallback_dimensions: bool,
}

/// Load (or initialize) `input`, compose its room, and write it to `output`.
pub fn render_file(input: &Path, output: &Path, config: &RenderConfig) -> Result<RenderReport, Error> {
    let loaded = loader::load_or_init(input)?;
    let scene = compose(loaded.room(), config);
    let written = output::write(&scene, output, config)?;

    Ok(RenderReport {
        output: written,
        origin: loaded.origin,
        fallback_dimensions: scene.uses_fallback_dimensions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roomplot-lib-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_input_is_synthesized_and_rendered() {
        let dir = scratch("missing");
        let input = dir.join("room_description.json");
        let _ = std::fs::remove_file(&input);
        let output = dir.join("room_layout.svg");

        let report = render_file(&input, &output, &RenderConfig::default()).unwrap();
        assert_eq!(report.origin, LoadOrigin::Synthesized);
        assert!(!report.fallback_dimensions);
        assert!(input.exists());
        assert!(std::fs::read_to_string(&output).unwrap().contains("Bedroom 001"));
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = scratch("malformed");
        let input = dir.join("scene.json");
        std::fs::write(&input, "{ not json").unwrap();
        let output = dir.join("out.svg");
        let _ = std::fs::remove_file(&output);

        let err = render_file(&input, &output, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::Parse { .. })));
        assert!(!output.exists());
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "{ not json");
    }
}
