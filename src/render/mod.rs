//! Scene composition for room layouts
//!
//! This module is organized into submodules:
//! - `config`: Sizes, palette and the process-wide [`RenderConfig`]
//! - `furniture`: Per-variant item drawing
//! - `scene`: The composed drawable list
//! - `shapes`: Drawable primitives
//! - `svg`: SVG generation
//! - `text`: Text extent estimation

pub mod config;
pub mod furniture;
pub mod scene;
pub mod shapes;
pub mod svg;
pub mod text;

pub use config::{Palette, RenderConfig};
pub use scene::{CompassPart, Drawable, Part, Role, Scene};
pub use svg::generate_svg;

use glam::{DVec2, dvec2};

use config::{
    BALANCE_POINT_RADIUS_PT, COMPASS_CENTER, COMPASS_FONT_PT, COMPASS_HEAD, COMPASS_SIZE,
    DETAIL_STROKE_PT, INFO_ANCHOR, INFO_FONT_PT, TITLE_FONT_PT, TITLE_PAD_PT, WALL_INSET,
    WALL_STROKE_PT, pt,
};
use shapes::{
    CircleShape, HAlign, LineShape, PolygonShape, RectShape, Stroke, Style, TextPanel, TextShape,
    VAlign,
};

use crate::compass::CENTER;
use crate::model::Room;
use crate::types::{PtN, pn};

const BALANCE_POINT_ALPHA: f64 = 0.3;
const DIAL_OPACITY: f64 = 0.8;
const INFO_PANEL_ALPHA: f64 = 0.8;

/// Compose the full picture of a room.
///
/// Paint order is fixed: walls and balance point, visible items in
/// declaration order, compass rose, then title and info box.
pub fn compose(room: &Room, config: &RenderConfig) -> Scene {
    let mut scene = Scene::new(room.resolved_dimensions());

    draw_room(&mut scene, config);

    for (index, item) in room.visible_items() {
        for anchor in config.compass.resolve(item.align.as_ref()) {
            furniture::render(item, index, anchor, &mut scene, &config.palette);
        }
    }

    draw_compass(&mut scene, config);
    draw_overlay(&mut scene, room, config);

    crate::log::info!(
        drawables = scene.drawables().len(),
        items = scene.count_parts(Part::Body),
        "composed scene"
    );
    crate::log::debug!(outline = %scene.outline(), "scene outline");
    scene
}

fn draw_room(scene: &mut Scene, config: &RenderConfig) {
    let palette = &config.palette;
    let span = 1.0 - 2.0 * WALL_INSET;
    let walls = RectShape::from_corner(
        pn(WALL_INSET, WALL_INSET),
        span,
        span,
        Style::stroked(Stroke::new(palette.wall, WALL_STROKE_PT)),
    );
    scene.push(Role::Boundary, walls);

    let marker = CircleShape::new(
        CENTER,
        pt(BALANCE_POINT_RADIUS_PT),
        Style::filled(palette.balance_point).with_opacity(BALANCE_POINT_ALPHA),
    );
    scene.push(Role::BalancePoint, marker);
}

fn draw_compass(scene: &mut Scene, config: &RenderConfig) {
    let palette = &config.palette;
    let center = dvec2(COMPASS_CENTER.0, COMPASS_CENTER.1);
    let at = |v: DVec2| PtN::from_dvec2(v);

    let dial = CircleShape::new(
        at(center),
        COMPASS_SIZE / 2.0,
        Style::filled(palette.panel)
            .with_stroke(Stroke::new(palette.detail, DETAIL_STROKE_PT))
            .with_opacity(DIAL_OPACITY),
    );
    scene.push(Role::Compass(CompassPart::Dial), dial);

    let reach = COMPASS_SIZE / 3.0;
    for (letter, dir) in [('N', DVec2::Y), ('E', DVec2::X), ('S', DVec2::NEG_Y), ('W', DVec2::NEG_X)] {
        let text = TextShape::new(at(center + dir * reach), &letter.to_string(), COMPASS_FONT_PT, palette.compass_accent)
            .bold()
            .aligned(HAlign::Center, VAlign::Center);
        scene.push(Role::Compass(CompassPart::Letter(letter)), text);
    }

    // north arrow: shaft through the center, head beyond the shaft end
    let tail = center - DVec2::Y * (COMPASS_SIZE / 6.0);
    let head_base = tail + DVec2::Y * reach;
    let shaft = LineShape::new(at(tail), at(head_base), Stroke::new(palette.compass_accent, DETAIL_STROKE_PT));
    scene.push(Role::Compass(CompassPart::ArrowShaft), shaft);

    let side = DVec2::Y.perp() * (COMPASS_HEAD / 2.0);
    let head = PolygonShape {
        points: vec![at(head_base + side), at(head_base + DVec2::Y * COMPASS_HEAD), at(head_base - side)],
        style: Style::filled(palette.compass_accent),
    };
    scene.push(Role::Compass(CompassPart::ArrowHead), head);
}

fn draw_overlay(scene: &mut Scene, room: &Room, config: &RenderConfig) {
    let palette = &config.palette;

    let name = if room.name.trim().is_empty() { "Room" } else { room.name.as_str() };
    let mut title = TextShape::new(pn(0.5, 1.0 + pt(TITLE_PAD_PT)), name, TITLE_FONT_PT, palette.text)
        .bold()
        .aligned(HAlign::Center, VAlign::Bottom);
    if !room.description.is_empty() {
        title.lines.extend(room.description.lines().map(str::to_string));
    }
    scene.push(Role::Title, title);

    let info = info_lines(room, scene).join("\n");
    let info = TextShape::new(pn(INFO_ANCHOR.0, INFO_ANCHOR.1), &info, INFO_FONT_PT, palette.text)
        .aligned(HAlign::Left, VAlign::Bottom)
        .with_panel(TextPanel {
            fill: palette.panel.with_alpha(INFO_PANEL_ALPHA),
            pad_pt: 0.3 * INFO_FONT_PT,
            corner_pt: 0.3 * INFO_FONT_PT,
        });
    scene.push(Role::Info, info);
}

/// `Dimensions`, `Style` and `ID` lines of the info box.
pub fn info_lines(room: &Room, scene: &Scene) -> Vec<String> {
    vec![
        format!("Dimensions: {}", scene.dimensions()),
        format!("Style: {}", room.style),
        format!("ID: {}", room.id),
    ]
}
