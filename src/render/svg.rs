//! SVG generation

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Path, PathData, Svg, SvgNode, facet_xml};

use super::config::{CONTENT_PAD_PT, PLOT_SIDE_PT, RenderConfig};
use super::scene::Scene;
use super::shapes::{Paint, Shape, Style};
use crate::errors::OutputWriteError;
use crate::types::{BBox, Norm, pn};

/// Maps normalized room coordinates onto the SVG canvas.
///
/// The plot square spans `0..PLOT_SIDE_PT` on both axes with y flipped, so
/// the room's north wall is at the top. Overlay text above the plot gets
/// negative canvas y; the viewBox accounts for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub font_family: String,
}

impl Frame {
    pub fn new(font_family: &str) -> Self {
        Self { font_family: font_family.to_string() }
    }

    #[inline]
    pub fn x(&self, x: Norm) -> f64 {
        x.raw() * PLOT_SIDE_PT
    }

    #[inline]
    pub fn y(&self, y: Norm) -> f64 {
        (1.0 - y.raw()) * PLOT_SIDE_PT
    }

    #[inline]
    pub fn len(&self, len: Norm) -> f64 {
        len.raw() * PLOT_SIDE_PT
    }
}

/// Canvas rectangle `(x, y, width, height)` covering the scene plus padding.
pub fn view_box(scene: &Scene) -> (f64, f64, f64, f64) {
    let mut bounds = scene.bounds();
    if bounds.is_empty() {
        bounds = BBox::new();
        bounds.expand_point(pn(0.0, 0.0));
        bounds.expand_point(pn(1.0, 1.0));
    }
    let frame = Frame::new("");
    (
        frame.x(bounds.min.x) - CONTENT_PAD_PT,
        frame.y(bounds.max.y) - CONTENT_PAD_PT,
        frame.len(bounds.width()) + 2.0 * CONTENT_PAD_PT,
        frame.len(bounds.height()) + 2.0 * CONTENT_PAD_PT,
    )
}

/// Build the SVG document for a composed scene.
///
/// User units are points; `width`/`height` carry no unit suffix so a
/// rasterizer scales them by `dpi / 72`.
pub fn build_svg(scene: &Scene, config: &RenderConfig) -> Svg {
    let frame = Frame::new(&config.font_family);
    let (x, y, w, h) = view_box(scene);

    let Paint { fill, .. } = Style::filled(config.palette.background).paint();
    let background = Path {
        d: Some(PathData::new().m(x, y).l(x + w, y).l(x + w, y + h).l(x, y + h).z()),
        fill,
        ..Default::default()
    };

    let mut children = vec![SvgNode::Path(background)];
    for drawable in scene.drawables() {
        children.extend(drawable.shape.render_svg(&frame));
    }

    Svg {
        width: Some(fmt_num(w)),
        height: Some(fmt_num(h)),
        view_box: Some(format!("{} {} {} {}", fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h))),
        children,
    }
}

/// Serialize a composed scene as a standalone SVG document.
pub fn generate_svg(scene: &Scene, config: &RenderConfig) -> Result<String, OutputWriteError> {
    fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
        write!(writer, "{}", fmt_num(value))
    }

    let svg = build_svg(scene, config);
    let options = SerializeOptions { float_formatter: Some(format_float), ..Default::default() };
    let out = facet_xml::to_string_with_options(&svg, &options)
        .map_err(|e| OutputWriteError::Serialize { message: e.to_string() })?;
    crate::log::debug!(bytes = out.len(), "generated svg");
    Ok(out)
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s.as_str() };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dimensions;
    use crate::render::scene::Role;
    use crate::render::shapes::{RectShape, Stroke};
    use crate::types::Color;

    fn walled_scene() -> Scene {
        let mut scene = Scene::new(Dimensions::FALLBACK);
        scene.push(
            Role::Boundary,
            RectShape::new(pn(0.5, 0.5), 0.5, 0.5, Style::stroked(Stroke::new(Color::BLACK, 0.0))),
        );
        scene
    }

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(126.0), "126");
        assert_eq!(fmt_num(0.7), "0.7");
        assert_eq!(fmt_num(-7.2), "-7.2");
        assert_eq!(fmt_num(504.0), "504");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(-0.0000001), "-0.0000001");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn frame_flips_y() {
        let frame = Frame::new("serif");
        assert_eq!(frame.x(Norm(0.25)), 126.0);
        assert_eq!(frame.y(Norm(1.0)), 0.0);
        assert_eq!(frame.y(Norm(0.0)), PLOT_SIDE_PT);
    }

    #[test]
    fn view_box_is_padded_content() {
        let (x, y, w, h) = view_box(&walled_scene());
        assert_eq!((x, y), (126.0 - 7.2, 126.0 - 7.2));
        assert_eq!((w, h), (252.0 + 14.4, 252.0 + 14.4));
        // an empty scene still frames the plot square
        assert_eq!(view_box(&Scene::new(Dimensions::FALLBACK)).2, PLOT_SIDE_PT + 14.4);
    }

    #[test]
    fn document_has_background_first() {
        let svg = build_svg(&walled_scene(), &RenderConfig::default());
        assert_eq!(svg.children.len(), 2);
        let SvgNode::Path(background) = &svg.children[0] else { panic!("expected background path") };
        assert_eq!(background.fill.as_deref(), Some("#f5f0e6"));
        let SvgNode::Path(wall) = &svg.children[1] else { panic!("expected wall path") };
        assert_eq!(wall.fill.as_deref(), Some("none"));
        assert_eq!(svg.view_box.as_deref(), Some("118.8 118.8 266.4 266.4"));
        assert_eq!(svg.width.as_deref(), Some("266.4"));
    }

    #[test]
    fn serialized_document_carries_view_box() {
        let text = generate_svg(&walled_scene(), &RenderConfig::default()).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("118.8 118.8 266.4 266.4"));
        assert!(text.contains("#f5f0e6"));
    }
}
