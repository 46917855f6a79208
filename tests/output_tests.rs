//! Loader recovery and output writing against the filesystem
//!
//! Run with: cargo test --test output_tests

use camino::{Utf8Path, Utf8PathBuf};
use roomplot::loader::{self, LoadOrigin};
use roomplot::output::{self, OutputFormat};
use roomplot::render::{RenderConfig, compose};
use roomplot::{Error, OutputWriteError, SchemaError, render_file};

/// A fresh scratch directory per test.
fn scratch(name: &str) -> Utf8PathBuf {
    let base = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("temp dir is UTF-8");
    let dir = base.join(format!("roomplot-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn default_room() -> roomplot::Room {
    loader::default_scene().room_description
}

#[test]
fn missing_input_writes_default_scene() {
    let dir = scratch("missing-input");
    let input = dir.join("room_description.json");

    let loaded = loader::load_or_init(input.as_std_path()).unwrap();
    assert_eq!(loaded.origin, LoadOrigin::Synthesized);
    assert_eq!(loaded.room().visible_items().count(), 5);

    // the persisted file is pretty-printed and loads back to the same scene
    let text = std::fs::read_to_string(&input).unwrap();
    assert!(text.starts_with("{\n  \"room_description\": {\n"));
    let reloaded = loader::load_or_init(input.as_std_path()).unwrap();
    assert_eq!(reloaded.origin, LoadOrigin::Loaded);
    assert_eq!(reloaded.scene, loaded.scene);
}

#[test]
fn existing_input_is_left_untouched() {
    let dir = scratch("existing-input");
    let input = dir.join("scene.json");
    let source = r#"{"room_description": {"name": "Den", "items": [{"type": "Desk", "align": "north", "display": "block"}]}, "role": "designer"}"#;
    std::fs::write(&input, source).unwrap();

    let room = loader::load(input.as_std_path()).unwrap();
    assert_eq!(room.name, "Den");
    assert_eq!(room.items.len(), 1);
    assert_eq!(std::fs::read_to_string(&input).unwrap(), source);
}

#[test]
fn malformed_input_is_a_parse_error() {
    let dir = scratch("malformed");
    let input = dir.join("scene.json");
    std::fs::write(&input, "{\n  \"room_description\": {\n    \"items\": [ { \"align\": \"north\" } ]\n  }\n}").unwrap();

    let err = loader::load_or_init(input.as_std_path()).unwrap_err();
    let SchemaError::Parse { message, .. } = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert!(message.contains("type"), "{message}");
}

#[test]
fn unreadable_input_is_a_read_error() {
    let dir = scratch("unreadable");
    // a directory exists at the path but cannot be read as a file
    let input = dir.join("scene.json");
    std::fs::create_dir_all(&input).unwrap();

    let err = loader::load_or_init(input.as_std_path()).unwrap_err();
    assert!(matches!(err, SchemaError::Read { .. }), "{err:?}");
}

#[test]
fn writes_png() {
    let dir = scratch("png");
    let path = dir.join("room_layout.png");
    let config = RenderConfig::default().with_dpi(72.0);
    let scene = compose(&default_room(), &config);

    let written = output::write(&scene, path.as_std_path(), &config).unwrap();
    assert_eq!(written, path.as_std_path());

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let image = image::load_from_memory(&bytes).unwrap();
    // the title pushes the canvas above the 504pt plot square
    assert!(image.height() > 504);
    assert!(image.width() > 400);
}

#[test]
fn dpi_scales_raster_size() {
    let dir = scratch("dpi");
    let scene_at = |dpi: f64, name: &str| {
        let config = RenderConfig::default().with_dpi(dpi);
        let scene = compose(&default_room(), &config);
        let path = dir.join(name);
        output::write(&scene, path.as_std_path(), &config).unwrap();
        image::open(&path).unwrap()
    };
    let small = scene_at(72.0, "small.png");
    let large = scene_at(144.0, "large.png");
    assert!(large.width().abs_diff(small.width() * 2) <= 1);
    assert!(large.height().abs_diff(small.height() * 2) <= 1);
}

#[test]
fn writes_svg_and_jpeg() {
    let dir = scratch("formats");
    let config = RenderConfig::default().with_dpi(36.0);
    let scene = compose(&default_room(), &config);

    let svg = dir.join("layout.svg");
    output::write(&scene, svg.as_std_path(), &config).unwrap();
    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("Bedroom 001"));

    let jpeg = dir.join("layout.jpg");
    assert_eq!(OutputFormat::from_path(jpeg.as_std_path()), OutputFormat::Jpeg);
    output::write(&scene, jpeg.as_std_path(), &config).unwrap();
    let bytes = std::fs::read(&jpeg).unwrap();
    assert_eq!(&bytes[..2], b"\xff\xd8");
}

#[test]
fn unwritable_output_is_an_io_error() {
    let dir = scratch("unwritable");
    let path: &Utf8Path = &dir.join("no/such/dir/room.png");
    let config = RenderConfig::default().with_dpi(36.0);
    let scene = compose(&default_room(), &config);

    let err = output::write(&scene, path.as_std_path(), &config).unwrap_err();
    assert!(matches!(err, OutputWriteError::Io { .. }), "{err:?}");
    assert!(!path.exists());
}

#[test]
fn invalid_dpi_is_rejected() {
    let dir = scratch("bad-dpi");
    let config = RenderConfig::default().with_dpi(f64::NAN);
    let scene = compose(&default_room(), &config);
    let err = output::write(&scene, dir.join("x.png").as_std_path(), &config).unwrap_err();
    assert!(matches!(err, OutputWriteError::InvalidDpi { .. }));
}

#[test]
fn render_file_end_to_end() {
    let dir = scratch("end-to-end");
    let input = dir.join("room_description.json");
    let output = dir.join("room_layout.svg");

    let report = render_file(input.as_std_path(), output.as_std_path(), &RenderConfig::default()).unwrap();
    assert_eq!(report.origin, LoadOrigin::Synthesized);
    assert!(!report.fallback_dimensions);
    assert!(output.exists());

    let again = render_file(input.as_std_path(), output.as_std_path(), &RenderConfig::default()).unwrap();
    assert_eq!(again.origin, LoadOrigin::Loaded);
}

#[test]
fn render_file_reports_output_failure() {
    let dir = scratch("end-to-end-failure");
    let input = dir.join("room_description.json");
    let output = dir.join("missing/room_layout.svg");

    let err = render_file(input.as_std_path(), output.as_std_path(), &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Output(OutputWriteError::Io { .. })));
}
