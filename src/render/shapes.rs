//! Drawable primitives for a scene
//!
//! Each primitive knows how to:
//! - Report its bounding box in normalized room units
//! - Render itself to SVG nodes

use enum_dispatch::enum_dispatch;
use facet_svg::{Circle as SvgCircle, Ellipse as SvgEllipse, Path, PathData, Points, Polygon, SvgNode, Text};

use super::config::{LINE_HEIGHT, pt};
use super::svg::{Frame, fmt_num};
use super::text::block_size_pt;
use crate::types::{BBox, Color, Norm, PtN, Size, pn};

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Shape {
    /// Bounding box, including half the stroke width
    fn bounds(&self) -> BBox<Norm>;

    /// SVG nodes for this primitive, in paint order
    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode>;
}

/// A primitive wrapping all shape types
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    Rect(RectShape),
    Ellipse(EllipseShape),
    Circle(CircleShape),
    Line(LineShape),
    Polygon(PolygonShape),
    Text(TextShape),
}

impl ShapeEnum {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeEnum::Rect(_) => "rect",
            ShapeEnum::Ellipse(_) => "ellipse",
            ShapeEnum::Circle(_) => "circle",
            ShapeEnum::Line(_) => "line",
            ShapeEnum::Polygon(_) => "polygon",
            ShapeEnum::Text(_) => "text",
        }
    }
}

// ============================================================================
// Style
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width_pt: f64,
}

impl Stroke {
    pub fn new(color: Color, width_pt: f64) -> Self {
        Self { color, width_pt }
    }
}

/// Paint for a primitive; `opacity` applies to fill and stroke together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, opacity: 1.0 }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroked(stroke: Stroke) -> Self {
        Self { stroke: Some(stroke), ..Self::default() }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    fn half_stroke(&self) -> f64 {
        self.stroke.map_or(0.0, |s| pt(s.width_pt) / 2.0)
    }

    /// Presentation attributes; `opacity` is folded into the paint alpha.
    pub fn paint(&self) -> Paint {
        let fade = |color: Color| color.with_alpha(color.a * self.opacity).paint();
        Paint {
            fill: Some(self.fill.map_or_else(|| "none".to_string(), fade)),
            stroke: self.stroke.map(|s| fade(s.color)),
            stroke_width: self.stroke.map(|s| fmt_num(s.width_pt)),
        }
    }
}

/// `fill`, `stroke` and `stroke-width` attribute values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
}

fn box_around(center: PtN, w: Norm, h: Norm, grow: f64) -> BBox<Norm> {
    let mut bb = BBox::new();
    bb.expand_rect(center, Size::new(w.raw() + 2.0 * grow, h.raw() + 2.0 * grow));
    bb
}

/// Closed outline of a canvas box, with arc corners when `r > 0`.
fn box_path(x1: f64, y1: f64, x2: f64, y2: f64, r: f64) -> PathData {
    let r = r.min((x2 - x1) / 2.0).min((y2 - y1) / 2.0);
    if r <= 0.0 {
        return PathData::new().m(x1, y1).l(x2, y1).l(x2, y2).l(x1, y2).z();
    }
    PathData::new()
        .m(x1 + r, y2)
        .l(x2 - r, y2)
        .a(r, r, 0.0, false, false, x2, y2 - r)
        .l(x2, y1 + r)
        .a(r, r, 0.0, false, false, x2 - r, y1)
        .l(x1 + r, y1)
        .a(r, r, 0.0, false, false, x1, y1 + r)
        .l(x1, y2 - r)
        .a(r, r, 0.0, false, false, x1 + r, y2)
        .z()
}

// ============================================================================
// Shape Types
// ============================================================================

/// An axis-aligned rectangle, optionally with rounded corners
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub center: PtN,
    pub width: Norm,
    pub height: Norm,
    pub corner_pt: f64,
    pub style: Style,
}

impl RectShape {
    pub fn new(center: PtN, width: f64, height: f64, style: Style) -> Self {
        Self { center, width: Norm(width), height: Norm(height), corner_pt: 0.0, style }
    }

    /// Rectangle given by its lower-left (south-west) corner.
    pub fn from_corner(corner: PtN, width: f64, height: f64, style: Style) -> Self {
        Self::new(corner.shifted(width / 2.0, height / 2.0), width, height, style)
    }

    pub fn rounded(mut self, corner_pt: f64) -> Self {
        self.corner_pt = corner_pt;
        self
    }

    /// Canvas corners `(left, top, right, bottom)`.
    pub fn canvas_box(&self, frame: &Frame) -> (f64, f64, f64, f64) {
        (
            frame.x(self.center.x - self.width / 2.0),
            frame.y(self.center.y + self.height / 2.0),
            frame.x(self.center.x + self.width / 2.0),
            frame.y(self.center.y - self.height / 2.0),
        )
    }
}

impl Shape for RectShape {
    fn bounds(&self) -> BBox<Norm> {
        box_around(self.center, self.width, self.height, self.style.half_stroke())
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let (x1, y1, x2, y2) = self.canvas_box(frame);
        let Paint { fill, stroke, stroke_width } = self.style.paint();
        vec![SvgNode::Path(Path {
            d: Some(box_path(x1, y1, x2, y2, self.corner_pt)),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })]
    }
}

/// An axis-aligned ellipse
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub center: PtN,
    pub width: Norm,
    pub height: Norm,
    pub style: Style,
}

impl EllipseShape {
    pub fn new(center: PtN, width: f64, height: f64, style: Style) -> Self {
        Self { center, width: Norm(width), height: Norm(height), style }
    }
}

impl Shape for EllipseShape {
    fn bounds(&self) -> BBox<Norm> {
        box_around(self.center, self.width, self.height, self.style.half_stroke())
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let Paint { fill, stroke, stroke_width } = self.style.paint();
        vec![SvgNode::Ellipse(SvgEllipse {
            cx: Some(frame.x(self.center.x)),
            cy: Some(frame.y(self.center.y)),
            rx: Some(frame.len(self.width / 2.0)),
            ry: Some(frame.len(self.height / 2.0)),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })]
    }
}

/// A circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: PtN,
    pub radius: Norm,
    pub style: Style,
}

impl CircleShape {
    pub fn new(center: PtN, radius: f64, style: Style) -> Self {
        Self { center, radius: Norm(radius), style }
    }
}

impl Shape for CircleShape {
    fn bounds(&self) -> BBox<Norm> {
        let d = self.radius * 2.0;
        box_around(self.center, d, d, self.style.half_stroke())
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let Paint { fill, stroke, stroke_width } = self.style.paint();
        vec![SvgNode::Circle(SvgCircle {
            cx: Some(frame.x(self.center.x)),
            cy: Some(frame.y(self.center.y)),
            r: Some(frame.len(self.radius)),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })]
    }
}

/// A straight segment
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: PtN,
    pub to: PtN,
    pub stroke: Stroke,
}

impl LineShape {
    pub fn new(from: PtN, to: PtN, stroke: Stroke) -> Self {
        Self { from, to, stroke }
    }
}

impl Shape for LineShape {
    fn bounds(&self) -> BBox<Norm> {
        let grow = pt(self.stroke.width_pt) / 2.0;
        let mut bb = BBox::new();
        bb.expand_point(self.from);
        bb.expand_point(self.to);
        bb.padded(Norm(grow))
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let d = PathData::new()
            .m(frame.x(self.from.x), frame.y(self.from.y))
            .l(frame.x(self.to.x), frame.y(self.to.y));
        let Paint { fill, stroke, stroke_width } = Style::stroked(self.stroke).paint();
        vec![SvgNode::Path(Path { d: Some(d), fill, stroke, stroke_width, ..Default::default() })]
    }
}

/// A closed polygon (arrowheads)
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<PtN>,
    pub style: Style,
}

impl Shape for PolygonShape {
    fn bounds(&self) -> BBox<Norm> {
        let mut bb = BBox::new();
        for p in &self.points {
            bb.expand_point(*p);
        }
        bb.padded(Norm(self.style.half_stroke()))
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let points = self
            .points
            .iter()
            .fold(Points::new(), |acc, p| acc.push(frame.x(p.x), frame.y(p.y)));
        let Paint { fill, stroke, stroke_width } = self.style.paint();
        vec![SvgNode::Polygon(Polygon { points, fill, stroke, stroke_width, ..Default::default() })]
    }
}

/// Horizontal placement of a text block relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

/// Vertical placement of a text block relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Bottom,
    Center,
}

/// Rounded backing box drawn behind text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPanel {
    pub fill: Color,
    pub pad_pt: f64,
    pub corner_pt: f64,
}

/// One or more lines of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub anchor: PtN,
    pub lines: Vec<String>,
    pub font_pt: f64,
    pub bold: bool,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub panel: Option<TextPanel>,
}

impl TextShape {
    pub fn new(anchor: PtN, text: &str, font_pt: f64, color: Color) -> Self {
        Self {
            anchor,
            lines: text.lines().map(str::to_string).collect(),
            font_pt,
            bold: false,
            color,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            panel: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn with_panel(mut self, panel: TextPanel) -> Self {
        self.panel = Some(panel);
        self
    }

    /// The text block itself, without the panel.
    fn text_box(&self) -> BBox<Norm> {
        let (w, h) = block_size_pt(&self.lines, self.font_pt, self.bold);
        let pad = self.panel.map_or(0.0, |p| p.pad_pt);
        let (w, h) = (pt(w), pt(h));
        let left = match self.h_align {
            HAlign::Left => self.anchor.x.raw() + pt(pad),
            HAlign::Center => self.anchor.x.raw() - w / 2.0,
        };
        let bottom = match self.v_align {
            VAlign::Bottom => self.anchor.y.raw() + pt(pad),
            VAlign::Center => self.anchor.y.raw() - h / 2.0,
        };
        let mut bb = BBox::new();
        bb.expand_point(pn(left, bottom));
        bb.expand_point(pn(left + w, bottom + h));
        bb
    }
}

impl Shape for TextShape {
    fn bounds(&self) -> BBox<Norm> {
        let pad = self.panel.map_or(0.0, |p| pt(p.pad_pt));
        self.text_box().padded(Norm(pad))
    }

    fn render_svg(&self, frame: &Frame) -> Vec<SvgNode> {
        let block = self.text_box();
        let mut nodes = Vec::new();
        if let Some(panel) = self.panel {
            let backing = RectShape::new(
                block.center(),
                block.width().raw() + 2.0 * pt(panel.pad_pt),
                block.height().raw() + 2.0 * pt(panel.pad_pt),
                Style::filled(panel.fill),
            )
            .rounded(panel.corner_pt);
            nodes.extend(backing.render_svg(frame));
        }

        let (x, anchor) = match self.h_align {
            HAlign::Left => (frame.x(block.min.x), "start"),
            HAlign::Center => (frame.x(block.center().x), "middle"),
        };
        let top = frame.y(block.max.y);
        let line_height = self.font_pt * LINE_HEIGHT;
        for (i, line) in self.lines.iter().enumerate() {
            nodes.push(SvgNode::Text(Text {
                x: Some(x),
                y: Some(top + (i as f64 + 0.5) * line_height),
                fill: Some(self.color.paint()),
                font_family: Some(frame.font_family.clone()),
                font_weight: self.bold.then(|| "bold".to_string()),
                font_size: Some(fmt_num(self.font_pt)),
                text_anchor: Some(anchor.to_string()),
                dominant_baseline: Some("central".to_string()),
                content: line.clone(),
                ..Default::default()
            }));
        }
        nodes
    }
}

// ============================================================================
// Tests
// ============================================================================
