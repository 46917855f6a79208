//! Rendering defaults and the process-wide rendering configuration.
//!
//! Lengths suffixed `_PT` are canvas points (1/72 inch); item sizes are in
//! normalized room units.

use crate::compass::{CompassTable, DEFAULT_MARGIN};
use crate::types::Color;

// Nominal item sizes
pub const BED_SIZE: f64 = 0.15;
pub const WARDROBE_SIZE: f64 = 0.12;
pub const DESK_SIZE: f64 = 0.10;
pub const BOOKCASE_SIZE: f64 = 0.12;
pub const NIGHTSTAND_SIZE: f64 = 0.08;
pub const DOOR_SIZE: f64 = 0.08;
pub const WINDOW_SIZE: f64 = 0.10;
pub const FALLBACK_SIZE: f64 = 0.10;

// Canvas
pub const PLOT_SIDE_PT: f64 = 504.0;
pub const CONTENT_PAD_PT: f64 = 7.2;
pub const TITLE_PAD_PT: f64 = 20.0;
pub const WALL_INSET: f64 = 0.05;

// Strokes
pub const WALL_STROKE_PT: f64 = 3.0;
pub const OUTLINE_STROKE_PT: f64 = 2.0;
pub const DETAIL_STROKE_PT: f64 = 1.0;

// Text
pub const LABEL_FONT_PT: f64 = 9.0;
pub const COMPASS_FONT_PT: f64 = 10.0;
pub const TITLE_FONT_PT: f64 = 14.0;
pub const INFO_FONT_PT: f64 = 9.0;
pub const LINE_HEIGHT: f64 = 1.25;

// Fixed decorations
pub const BALANCE_POINT_RADIUS_PT: f64 = 10.0;
pub const COMPASS_CENTER: (f64, f64) = (0.1, 0.9);
pub const COMPASS_SIZE: f64 = 0.15;
pub const COMPASS_HEAD: f64 = 0.02;
pub const INFO_ANCHOR: (f64, f64) = (0.02, 0.02);

pub const DEFAULT_DPI: f64 = 300.0;
pub const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Convert canvas points to normalized room units.
pub fn pt(points: f64) -> f64 {
    points / PLOT_SIDE_PT
}

/// Every color the renderer uses
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub wall: Color,
    pub door: Color,
    pub window: Color,
    pub furniture: Color,
    pub text: Color,
    pub plants: Color,
    pub bed: Color,
    pub desk: Color,
    pub wardrobe: Color,
    pub bookcase: Color,
    pub nightstand: Color,
    pub door_fill: Color,
    pub window_fill: Color,
    pub pillow: Color,
    pub pillow_edge: Color,
    pub lamp: Color,
    pub detail: Color,
    pub balance_point: Color,
    pub compass_accent: Color,
    pub panel: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xf5, 0xf0, 0xe6),
            wall: Color::rgb(0x8b, 0x73, 0x55),
            door: Color::rgb(0x8b, 0x45, 0x13),
            window: Color::rgb(0x87, 0xce, 0xeb),
            furniture: Color::rgb(0xd2, 0xb4, 0x8c),
            text: Color::rgb(0x2f, 0x4f, 0x4f),
            plants: Color::rgb(0x22, 0x8b, 0x22),
            bed: Color::rgb(0x93, 0x70, 0xdb),
            desk: Color::rgb(0xde, 0xb8, 0x87),
            wardrobe: Color::rgb(0xbc, 0x8f, 0x8f),
            bookcase: Color::rgb(0xa0, 0x52, 0x2d),
            nightstand: Color::rgb(0xcd, 0x85, 0x3f),
            door_fill: Color::rgb(0xf5, 0xde, 0xb3),
            window_fill: Color::rgb(0xe0, 0xff, 0xff),
            pillow: Color::WHITE,
            pillow_edge: Color::rgb(0x80, 0x80, 0x80),
            lamp: Color::rgb(0xff, 0xff, 0x00),
            detail: Color::BLACK,
            balance_point: Color::rgb(0xff, 0xd7, 0x00),
            compass_accent: Color::rgb(0xff, 0x00, 0x00),
            panel: Color::WHITE,
        }
    }
}

/// Read-only configuration shared by every render in the process.
///
/// Build it once at startup and pass it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub compass: CompassTable,
    pub palette: Palette,
    /// Raster resolution; SVG output is resolution independent.
    pub dpi: f64,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            compass: CompassTable::new(DEFAULT_MARGIN),
            palette: Palette::default(),
            dpi: DEFAULT_DPI,
            font_family: FONT_FAMILY.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.compass = CompassTable::new(margin);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::CompassPoint;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.dpi, 300.0);
        assert_eq!(config.compass.anchor(CompassPoint::West).x.raw(), 0.1);
        assert_eq!(config.palette.wall.hex(), "#8b7355");
    }

    #[test]
    fn builders_replace_fields() {
        let config = RenderConfig::default().with_margin(0.2).with_dpi(96.0);
        assert_eq!(config.compass.anchor(CompassPoint::West).x.raw(), 0.2);
        assert_eq!(config.dpi, 96.0);
    }

    #[test]
    fn points_to_normalized() {
        assert_eq!(pt(PLOT_SIDE_PT), 1.0);
        assert_eq!(pt(252.0), 0.5);
    }
}
