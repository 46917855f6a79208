//! Strongly-typed numeric primitives for roomplot (zero-cost newtypes).
//!
//! Scene geometry lives in the room's normalized square: `(0, 0)` is the
//! south-west corner and `(1, 1)` the north-east corner, y grows north.
//! Conversions to canvas points and raster pixels happen only in `svg` and
//! `output`, through [`Scaler`].

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate that a value is finite and strictly positive.
pub fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Length in the room's normalized coordinate space (1.0 = one wall-to-wall span)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Norm(pub f64);

impl Norm {
    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn min(self, other: Norm) -> Norm {
        Norm(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Norm) -> Norm {
        Norm(self.0.max(other.0))
    }
}

impl Add for Norm {
    type Output = Norm;
    fn add(self, rhs: Norm) -> Norm { Norm(self.0 + rhs.0) }
}
impl Sub for Norm {
    type Output = Norm;
    fn sub(self, rhs: Norm) -> Norm { Norm(self.0 - rhs.0) }
}
impl Mul<f64> for Norm {
    type Output = Norm;
    fn mul(self, rhs: f64) -> Norm { Norm(self.0 * rhs) }
}
impl Div<f64> for Norm {
    type Output = Norm;
    fn div(self, rhs: f64) -> Norm { Norm(self.0 / rhs) }
}
impl Neg for Norm {
    type Output = Norm;
    fn neg(self) -> Norm { Norm(-self.0) }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

/// A point in the room's normalized space
pub type PtN = Point<Norm>;

/// Shorthand for a normalized point from raw coordinates.
pub fn pn(x: f64, y: f64) -> PtN {
    Point::new(Norm(x), Norm(y))
}

impl Point<Norm> {
    pub fn from_dvec2(v: DVec2) -> Self {
        pn(v.x, v.y)
    }

    /// Translate by raw normalized deltas.
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Point { x: self.x + Norm(dx), y: self.y + Norm(dy) }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl Size<Norm> {
    pub fn new(w: f64, h: f64) -> Self {
        Size { w: Norm(w), h: Norm(h) }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl Default for BBox<Norm> {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox<Norm> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Norm(f64::MAX), y: Norm(f64::MAX) },
            max: Point { x: Norm(f64::MIN), y: Norm(f64::MIN) },
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: PtN) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include a rectangle defined by center and size
    pub fn expand_rect(&mut self, center: PtN, size: Size<Norm>) {
        let hw = size.w / 2.0;
        let hh = size.h / 2.0;
        self.expand_point(Point { x: center.x - hw, y: center.y - hh });
        self.expand_point(Point { x: center.x + hw, y: center.y + hh });
    }

    /// Expand to include another box
    pub fn expand_box(&mut self, other: &BBox<Norm>) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    /// Grow every side by `pad`
    pub fn padded(&self, pad: Norm) -> Self {
        BBox {
            min: Point { x: self.min.x - pad, y: self.min.y - pad },
            max: Point { x: self.max.x + pad, y: self.max.y + pad },
        }
    }

    pub fn width(&self) -> Norm { self.max.x - self.min.x }

    pub fn height(&self) -> Norm { self.max.y - self.min.y }

    pub fn center(&self) -> PtN {
        Point {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
        }
    }
}

/// Convert canvas points (1/72 inch) to raster pixels for a target DPI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    pub px_per_pt: f64,
}

impl Scaler {
    /// Points per inch on the SVG canvas.
    pub const POINTS_PER_INCH: f64 = 72.0;

    /// Create a Scaler for a DPI with validation (rejects NaN, infinite, zero, negative)
    pub fn for_dpi(dpi: f64) -> Result<Self, NumericError> {
        let dpi = positive(dpi)?;
        Ok(Scaler { px_per_pt: dpi / Self::POINTS_PER_INCH })
    }

    /// Convert a length in points to pixels.
    #[inline]
    pub fn px(&self, pt: f64) -> f64 { pt * self.px_per_pt }

    /// Pixel extent of a canvas length, rounded up so nothing is clipped.
    pub fn px_ceil(&self, pt: f64) -> u32 {
        self.px(pt).ceil().max(1.0) as u32
    }
}

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Same color with a different opacity (clamped to 0..=1).
    pub fn with_alpha(self, a: f64) -> Self {
        Color { a: a.clamp(0.0, 1.0), ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// `#rrggbb`, without the alpha channel.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// SVG paint value; `rgba()` once the color is translucent.
    pub fn paint(&self) -> String {
        if self.is_opaque() {
            self.hex()
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}
