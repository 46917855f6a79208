//! Loading scene descriptions, with recovery for a missing input file.
//!
//! A missing file is not an error: the canonical default scene is
//! synthesized, written to the requested path so the user has something to
//! edit, and returned. A file that exists but cannot be read or parsed is an
//! error and nothing is written.

use std::io::ErrorKind;
use std::path::Path;

use crate::errors::SchemaError;
use crate::model::{Room, SceneDescription};

/// How a [`LoadedScene`] came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read from the input file
    Loaded,
    /// The input was missing; the default scene was written in its place
    Synthesized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedScene {
    pub scene: SceneDescription,
    pub origin: LoadOrigin,
}

impl LoadedScene {
    pub fn room(&self) -> &Room {
        &self.scene.room_description
    }
}

/// Read and parse `path`; `Ok(None)` when the file does not exist.
pub fn try_load(path: &Path) -> Result<Option<SceneDescription>, SchemaError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SchemaError::Read { path: path.to_path_buf(), source }),
    };
    parse(&path.display().to_string(), &text).map(Some)
}

/// Parse scene JSON; `name` labels the source in diagnostics.
pub fn parse(name: &str, text: &str) -> Result<SceneDescription, SchemaError> {
    serde_json::from_str(text).map_err(|err| SchemaError::parse(name, text, &err))
}

/// The canonical bedroom written when no input exists.
pub fn default_scene() -> SceneDescription {
    use crate::model::Item;

    let room = Room {
        id: "room_20251209_001".into(),
        name: "Bedroom 001".into(),
        description: "User's bedroom".into(),
        shape: "rectangular".into(),
        dimensions: serde_json::json!([3.2, 3.1, 2.2]),
        style: "Feng Shui".into(),
        theme: "calm".into(),
        items: vec![
            Item::new("Door").aligned("west-southwest").displayed("none"),
            Item::new("Bookcase").aligned("west-northwest").displayed("block"),
            Item::new("Wardrobe").aligned("north").displayed("none"),
            Item::new("Bed").aligned("north-northeast").displayed("block"),
            Item::new("Window").aligned("east").displayed("block").with_attribute("plants", true),
            Item::new("Desk").aligned("south-southeast").displayed("block").with_attribute("chair", true),
            Item::new("Nightstand").aligned("south").displayed("block"),
        ],
    };
    SceneDescription::new(room)
}

/// Write a scene as pretty-printed JSON.
pub fn persist(path: &Path, scene: &SceneDescription) -> Result<(), SchemaError> {
    let mut text = serde_json::to_string_pretty(scene)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| SchemaError::Persist { path: path.to_path_buf(), source })
}

/// Load `path`, or synthesize and persist the default scene when it is missing.
pub fn load_or_init(path: &Path) -> Result<LoadedScene, SchemaError> {
    if let Some(scene) = try_load(path)? {
        crate::log::info!(path = %path.display(), items = scene.room_description.items.len(), "loaded scene");
        return Ok(LoadedScene { scene, origin: LoadOrigin::Loaded });
    }

    crate::log::warn!(path = %path.display(), "scene description not found, writing default scene");
    let scene = default_scene();
    persist(path, &scene)?;
    Ok(LoadedScene { scene, origin: LoadOrigin::Synthesized })
}

/// The room of [`load_or_init`].
pub fn load(path: &Path) -> Result<Room, SchemaError> {
    load_or_init(path).map(|loaded| loaded.scene.room_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_has_five_visible_items() {
        let scene = default_scene();
        let room = &scene.room_description;
        assert_eq!(room.items.len(), 7);
        let visible: Vec<&str> = room.visible_items().map(|(_, item)| item.kind.as_str()).collect();
        assert_eq!(visible, vec!["Bookcase", "Bed", "Window", "Desk", "Nightstand"]);
        assert!(!room.resolved_dimensions().is_fallback());
    }

    #[test]
    fn default_scene_json_shape() {
        let value = serde_json::to_value(default_scene()).unwrap();
        let items = &value["room_description"]["items"];
        assert_eq!(items[4]["plants"], serde_json::json!(true));
        assert_eq!(items[5]["chair"], serde_json::json!(true));
        assert_eq!(value["room_description"]["dimensions"], serde_json::json!([3.2, 3.1, 2.2]));
        assert!(value.get("role").is_none());
    }

    #[test]
    fn parse_reports_malformed_json() {
        let err = parse("broken.json", "{ \"room_description\": ").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        let err = parse("list.json", "[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn parse_accepts_minimal_room() {
        let scene = parse("min.json", r#"{"room_description": {}}"#).unwrap();
        assert!(scene.room_description.items.is_empty());
        assert!(scene.room_description.resolved_dimensions().is_fallback());
    }
}
