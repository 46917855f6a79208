//! Item renderer: one drawing routine per furnishing variant.
//!
//! A variant produces a primary shape at the anchor, optional decoration,
//! and a label above the primary shape. Geometry is in normalized room units
//! scaled by the variant's nominal size `s`.

use enum_dispatch::enum_dispatch;

use super::config::{
    BED_SIZE, BOOKCASE_SIZE, DESK_SIZE, DETAIL_STROKE_PT, DOOR_SIZE, FALLBACK_SIZE, LABEL_FONT_PT,
    NIGHTSTAND_SIZE, OUTLINE_STROKE_PT, Palette, WARDROBE_SIZE, WINDOW_SIZE,
};
use super::scene::{Part, Role, Scene};
use super::shapes::{
    CircleShape, EllipseShape, HAlign, LineShape, RectShape, ShapeEnum, Stroke, Style, TextPanel,
    TextShape, VAlign,
};
use crate::model::Item;
use crate::types::{PtN, pn};

const BODY_OPACITY: f64 = 0.8;
const WINDOW_OPACITY: f64 = 0.6;
const LAMP_ALPHA: f64 = 0.7;
const LABEL_PANEL_ALPHA: f64 = 0.7;

/// Writes the drawables of one item instance into the scene
pub struct ItemPen<'a> {
    scene: &'a mut Scene,
    pub palette: &'a Palette,
    pub index: usize,
    pub anchor: PtN,
    variant: &'static str,
}

impl<'a> ItemPen<'a> {
    pub fn new(scene: &'a mut Scene, palette: &'a Palette, index: usize, anchor: PtN, variant: &'static str) -> Self {
        Self { scene, palette, index, anchor, variant }
    }

    pub fn draw(&mut self, part: Part, shape: impl Into<ShapeEnum>) {
        let role = Role::Item { index: self.index, anchor: self.anchor, variant: self.variant, part };
        self.scene.push(role, shape);
    }

    fn outline(&self, width_pt: f64) -> Stroke {
        Stroke::new(self.palette.wall, width_pt)
    }

    fn detail(&self, width_pt: f64) -> Stroke {
        Stroke::new(self.palette.detail, width_pt)
    }
}

/// How one furnishing variant draws itself
#[enum_dispatch]
pub trait Furnishing {
    fn name(&self) -> &'static str;

    /// Nominal size `s` in normalized units
    fn nominal_size(&self) -> f64;

    /// The primary shape centered on `at`
    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum;

    /// Variant-specific extras drawn over the body
    fn decorate(&self, _item: &Item, _pen: &mut ItemPen<'_>) {}
}

/// Rectangular body with the wall-colored outline shared by most variants
fn solid_body(at: PtN, w: f64, h: f64, fill: crate::types::Color, palette: &Palette) -> ShapeEnum {
    let style = Style::filled(fill)
        .with_stroke(Stroke::new(palette.wall, OUTLINE_STROKE_PT))
        .with_opacity(BODY_OPACITY);
    RectShape::new(at, w, h, style).into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bed;

impl Furnishing for Bed {
    fn name(&self) -> &'static str {
        "bed"
    }

    fn nominal_size(&self) -> f64 {
        BED_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        solid_body(at, s, s / 2.0, palette.bed, palette)
    }

    fn decorate(&self, _item: &Item, pen: &mut ItemPen<'_>) {
        let s = self.nominal_size();
        let style = Style::filled(pen.palette.pillow)
            .with_stroke(Stroke::new(pen.palette.pillow_edge, DETAIL_STROKE_PT));
        let pillow = EllipseShape::new(pen.anchor.shifted(-s / 3.0, 0.0), s / 4.0, s / 6.0, style);
        pen.draw(Part::Pillow, pillow);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wardrobe;

impl Furnishing for Wardrobe {
    fn name(&self) -> &'static str {
        "wardrobe"
    }

    fn nominal_size(&self) -> f64 {
        WARDROBE_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        solid_body(at, s, s, palette.wardrobe, palette)
    }

    fn decorate(&self, _item: &Item, pen: &mut ItemPen<'_>) {
        let s = self.nominal_size();
        let stroke = pen.detail(OUTLINE_STROKE_PT);
        for dx in [-s / 4.0, s / 4.0] {
            let door = LineShape::new(
                pen.anchor.shifted(dx, -s / 2.0),
                pen.anchor.shifted(dx, s / 2.0),
                stroke,
            );
            pen.draw(Part::WardrobeDoor, door);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Desk;

impl Furnishing for Desk {
    fn name(&self) -> &'static str {
        "desk"
    }

    fn nominal_size(&self) -> f64 {
        DESK_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        solid_body(at, 2.0 * s, s / 1.5, palette.desk, palette)
    }

    fn decorate(&self, item: &Item, pen: &mut ItemPen<'_>) {
        if !item.flag("chair") {
            return;
        }
        let s = self.nominal_size();
        let style = Style::filled(pen.palette.furniture).with_stroke(pen.outline(DETAIL_STROKE_PT));
        let chair = RectShape::from_corner(pen.anchor.shifted(0.0, -s / 1.5), s / 2.0, s / 2.0, style);
        pen.draw(Part::Chair, chair);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookcase;

impl Furnishing for Bookcase {
    fn name(&self) -> &'static str {
        "bookcase"
    }

    fn nominal_size(&self) -> f64 {
        BOOKCASE_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        solid_body(at, s, s, palette.bookcase, palette)
    }

    fn decorate(&self, _item: &Item, pen: &mut ItemPen<'_>) {
        let s = self.nominal_size();
        let stroke = pen.detail(DETAIL_STROKE_PT);
        for i in 1..=3 {
            let dy = -s / 2.0 + i as f64 * s / 4.0;
            let shelf = LineShape::new(
                pen.anchor.shifted(-s / 2.0, dy),
                pen.anchor.shifted(s / 2.0, dy),
                stroke,
            );
            pen.draw(Part::Shelf, shelf);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nightstand;

impl Furnishing for Nightstand {
    fn name(&self) -> &'static str {
        "nightstand"
    }

    fn nominal_size(&self) -> f64 {
        NIGHTSTAND_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        solid_body(at, s, s, palette.nightstand, palette)
    }

    fn decorate(&self, _item: &Item, pen: &mut ItemPen<'_>) {
        let s = self.nominal_size();
        let lamp = CircleShape::new(
            pen.anchor,
            s / 4.0,
            Style::filled(pen.palette.lamp.with_alpha(LAMP_ALPHA)),
        );
        pen.draw(Part::Lamp, lamp);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Door;

impl Furnishing for Door {
    fn name(&self) -> &'static str {
        "door"
    }

    fn nominal_size(&self) -> f64 {
        DOOR_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        let style = Style::filled(palette.door_fill)
            .with_stroke(Stroke::new(palette.door, OUTLINE_STROKE_PT))
            .with_opacity(BODY_OPACITY);
        RectShape::new(at, s / 1.5, s, style).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window;

impl Furnishing for Window {
    fn name(&self) -> &'static str {
        "window"
    }

    fn nominal_size(&self) -> f64 {
        WINDOW_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        let s = self.nominal_size();
        let style = Style::filled(palette.window_fill)
            .with_stroke(Stroke::new(palette.window, OUTLINE_STROKE_PT))
            .with_opacity(WINDOW_OPACITY);
        RectShape::new(at, 2.0 * s, s / 1.5, style).into()
    }

    fn decorate(&self, item: &Item, pen: &mut ItemPen<'_>) {
        let s = self.nominal_size();
        let stroke = pen.detail(DETAIL_STROKE_PT);
        let at = pen.anchor;
        pen.draw(Part::Pane, LineShape::new(at.shifted(0.0, -s / 3.0), at.shifted(0.0, s / 3.0), stroke));
        pen.draw(Part::Pane, LineShape::new(at.shifted(-s, 0.0), at.shifted(s, 0.0), stroke));

        if item.flag("plants") {
            for i in 0..3 {
                let center = at.shifted(-s / 2.0 + i as f64 * s / 2.0, -s / 2.0);
                let plant = CircleShape::new(center, s / 6.0, Style::filled(pen.palette.plants));
                pen.draw(Part::Plant, plant);
            }
        }
    }
}

/// Any type tag without a dedicated variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback;

impl Furnishing for Fallback {
    fn name(&self) -> &'static str {
        "default"
    }

    fn nominal_size(&self) -> f64 {
        FALLBACK_SIZE
    }

    fn body(&self, at: PtN, palette: &Palette) -> ShapeEnum {
        CircleShape::new(at, self.nominal_size() / 2.0, Style::filled(palette.furniture)).into()
    }
}

#[enum_dispatch(Furnishing)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Bed,
    Wardrobe,
    Desk,
    Bookcase,
    Nightstand,
    Door,
    Window,
    Fallback,
}

impl Variant {
    /// Look up a normalized (trimmed, lowercase) type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bed" => Bed.into(),
            "wardrobe" => Wardrobe.into(),
            "desk" => Desk.into(),
            "bookcase" => Bookcase.into(),
            "nightstand" => Nightstand.into(),
            "door" => Door.into(),
            "window" => Window.into(),
            _ => Fallback.into(),
        }
    }

    pub fn for_item(item: &Item) -> Self {
        let variant = Self::from_tag(&item.tag());
        if matches!(variant, Variant::Fallback(_)) {
            crate::log::debug!(kind = %item.kind, "unknown item type, drawing default marker");
        }
        variant
    }
}

/// Draw one instance of `item` at `anchor`: body, decoration, then label.
pub fn render(item: &Item, index: usize, anchor: PtN, scene: &mut Scene, palette: &Palette) {
    let variant = Variant::for_item(item);
    let s = variant.nominal_size();
    let mut pen = ItemPen::new(scene, palette, index, anchor, variant.name());

    pen.draw(Part::Body, variant.body(anchor, palette));
    variant.decorate(item, &mut pen);

    let label = TextShape::new(pn(anchor.x.raw(), anchor.y.raw() + 0.8 * s), &item.kind, LABEL_FONT_PT, palette.text)
        .aligned(HAlign::Center, VAlign::Bottom)
        .with_panel(TextPanel {
            fill: palette.panel.with_alpha(LABEL_PANEL_ALPHA),
            pad_pt: 0.3 * LABEL_FONT_PT,
            corner_pt: 0.3 * LABEL_FONT_PT,
        });
    pen.draw(Part::Label, label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dimensions;
    use crate::render::shapes::Shape;

    fn draw(item: &Item, anchor: PtN) -> Scene {
        let mut scene = Scene::new(Dimensions::FALLBACK);
        render(item, 0, anchor, &mut scene, &Palette::default());
        scene
    }

    fn parts(scene: &Scene) -> Vec<&'static str> {
        scene
            .drawables()
            .iter()
            .filter_map(|d| d.role.part())
            .map(Part::name)
            .collect()
    }

    #[test]
    fn tags_select_variants() {
        assert_eq!(Variant::from_tag("bed"), Variant::Bed(Bed));
        assert_eq!(Variant::for_item(&Item::new(" Window ")), Variant::Window(Window));
        assert_eq!(Variant::from_tag("sofa"), Variant::Fallback(Fallback));
        assert_eq!(Variant::from_tag("beds"), Variant::Fallback(Fallback));
    }

    #[test]
    fn bed_has_pillow_left_of_center() {
        let scene = draw(&Item::new("Bed"), pn(0.5, 0.5));
        assert_eq!(parts(&scene), vec!["body", "pillow", "label"]);
        let ShapeEnum::Ellipse(pillow) = &scene.drawables()[1].shape else {
            panic!("pillow should be an ellipse");
        };
        assert!((pillow.center.x.raw() - (0.5 - BED_SIZE / 3.0)).abs() < 1e-12);
        assert_eq!(pillow.center.y.raw(), 0.5);
    }

    #[test]
    fn desk_chair_depends_on_flag() {
        let plain = draw(&Item::new("Desk"), pn(0.5, 0.5));
        assert_eq!(plain.count_parts(Part::Chair), 0);

        let with_chair = draw(&Item::new("Desk").with_attribute("chair", true), pn(0.5, 0.5));
        assert_eq!(with_chair.count_parts(Part::Chair), 1);
        let chair = with_chair.drawables()[1].shape.bounds();
        // lower-left corner at (x, y - s/1.5), within stroke tolerance
        assert!((chair.min.x.raw() - 0.5).abs() < 0.01);
        assert!((chair.min.y.raw() - (0.5 - DESK_SIZE / 1.5)).abs() < 0.01);
    }

    #[test]
    fn window_plants_sit_below_the_sill() {
        let scene = draw(&Item::new("Window").with_attribute("plants", true), pn(0.9, 0.5));
        assert_eq!(scene.count_parts(Part::Pane), 2);
        assert_eq!(scene.count_parts(Part::Plant), 3);
        for d in scene.drawables().iter().filter(|d| d.role.part() == Some(Part::Plant)) {
            let ShapeEnum::Circle(c) = &d.shape else { panic!("plant should be a circle") };
            assert!((c.center.y.raw() - (0.5 - WINDOW_SIZE / 2.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn bookcase_has_three_shelves() {
        let scene = draw(&Item::new("Bookcase"), pn(0.125, 0.75));
        assert_eq!(scene.count_parts(Part::Shelf), 3);
    }

    #[test]
    fn wardrobe_and_nightstand_decorations() {
        assert_eq!(draw(&Item::new("Wardrobe"), pn(0.5, 0.9)).count_parts(Part::WardrobeDoor), 2);
        assert_eq!(draw(&Item::new("Nightstand"), pn(0.5, 0.1)).count_parts(Part::Lamp), 1);
    }

    #[test]
    fn unknown_type_is_a_labelled_circle() {
        let scene = draw(&Item::new("Sofa"), pn(0.5, 0.5));
        assert_eq!(parts(&scene), vec!["body", "label"]);
        assert_eq!(scene.drawables()[0].shape.kind(), "circle");
        let ShapeEnum::Text(label) = &scene.drawables()[1].shape else { panic!("label should be text") };
        assert_eq!(label.lines, vec!["Sofa".to_string()]);
    }

    #[test]
    fn label_sits_above_the_body() {
        let scene = draw(&Item::new("Door"), pn(0.125, 0.25));
        let label = scene.drawables().last().unwrap().shape.bounds();
        assert!(label.min.y.raw() >= 0.25 + 0.8 * DOOR_SIZE - 1e-12);
    }
}
