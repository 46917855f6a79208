//! Compass-token to room-coordinate resolution.
//!
//! Sixteen points sit on a ring inset from the walls by `margin`. North is
//! the top wall (y = 1 − margin), east the right wall (x = 1 − margin). The
//! north and south walls carry the points from north-west to north-east
//! (and south-west to south-east) at quarter and eighth steps; the east and
//! west walls carry the remaining points at y = 0.25 / 0.5 / 0.75.
//!
//! | token | x | y |
//! |---|---|---|
//! | north | 0.5 | 1−m |
//! | north-northeast | 0.625 | 1−m |
//! | northeast | 0.75 | 1−m |
//! | east-northeast | 0.875 | 0.75 |
//! | east | 1−m | 0.5 |
//! | east-southeast | 0.875 | 0.25 |
//! | southeast | 0.75 | m |
//! | south-southeast | 0.625 | m |
//! | south | 0.5 | m |
//! | south-southwest | 0.375 | m |
//! | southwest | 0.25 | m |
//! | west-southwest | 0.125 | 0.25 |
//! | west | m | 0.5 |
//! | west-northwest | 0.125 | 0.75 |
//! | northwest | 0.25 | 1−m |
//! | north-northwest | 0.375 | 1−m |
//!
//! Anything that is not one of these tokens (or its abbreviation) lands on
//! [`CENTER`].

use crate::model::Align;
use crate::types::{Norm, Point, PtN, pn};

/// The room's geometric center; the anchor for every unresolvable token.
pub const CENTER: PtN = Point { x: Norm(0.5), y: Norm(0.5) };

/// Default inset of the anchor ring from the walls.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// The sixteen named compass points, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    North,
    NorthNortheast,
    Northeast,
    EastNortheast,
    East,
    EastSoutheast,
    Southeast,
    SouthSoutheast,
    South,
    SouthSouthwest,
    Southwest,
    WestSouthwest,
    West,
    WestNorthwest,
    Northwest,
    NorthNorthwest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::North,
        CompassPoint::NorthNortheast,
        CompassPoint::Northeast,
        CompassPoint::EastNortheast,
        CompassPoint::East,
        CompassPoint::EastSoutheast,
        CompassPoint::Southeast,
        CompassPoint::SouthSoutheast,
        CompassPoint::South,
        CompassPoint::SouthSouthwest,
        CompassPoint::Southwest,
        CompassPoint::WestSouthwest,
        CompassPoint::West,
        CompassPoint::WestNorthwest,
        CompassPoint::Northwest,
        CompassPoint::NorthNorthwest,
    ];

    /// Canonical hyphenated token, as written in scene descriptions.
    pub fn token(self) -> &'static str {
        match self {
            CompassPoint::North => "north",
            CompassPoint::NorthNortheast => "north-northeast",
            CompassPoint::Northeast => "northeast",
            CompassPoint::EastNortheast => "east-northeast",
            CompassPoint::East => "east",
            CompassPoint::EastSoutheast => "east-southeast",
            CompassPoint::Southeast => "southeast",
            CompassPoint::SouthSoutheast => "south-southeast",
            CompassPoint::South => "south",
            CompassPoint::SouthSouthwest => "south-southwest",
            CompassPoint::Southwest => "southwest",
            CompassPoint::WestSouthwest => "west-southwest",
            CompassPoint::West => "west",
            CompassPoint::WestNorthwest => "west-northwest",
            CompassPoint::Northwest => "northwest",
            CompassPoint::NorthNorthwest => "north-northwest",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::North => "n",
            CompassPoint::NorthNortheast => "nne",
            CompassPoint::Northeast => "ne",
            CompassPoint::EastNortheast => "ene",
            CompassPoint::East => "e",
            CompassPoint::EastSoutheast => "ese",
            CompassPoint::Southeast => "se",
            CompassPoint::SouthSoutheast => "sse",
            CompassPoint::South => "s",
            CompassPoint::SouthSouthwest => "ssw",
            CompassPoint::Southwest => "sw",
            CompassPoint::WestSouthwest => "wsw",
            CompassPoint::West => "w",
            CompassPoint::WestNorthwest => "wnw",
            CompassPoint::Northwest => "nw",
            CompassPoint::NorthNorthwest => "nnw",
        }
    }

    /// Match a token ignoring case, whitespace, `-` and `_`.
    pub fn parse(token: &str) -> Option<Self> {
        let key: String = token
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        if key.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|point| {
            point.abbreviation() == key || point.token().replace('-', "") == key
        })
    }

    /// Fixed anchor for this point given the ring inset.
    pub fn anchor(self, margin: f64) -> PtN {
        let near = margin;
        let far = 1.0 - margin;
        match self {
            CompassPoint::North => pn(0.5, far),
            CompassPoint::NorthNortheast => pn(0.625, far),
            CompassPoint::Northeast => pn(0.75, far),
            CompassPoint::EastNortheast => pn(0.875, 0.75),
            CompassPoint::East => pn(far, 0.5),
            CompassPoint::EastSoutheast => pn(0.875, 0.25),
            CompassPoint::Southeast => pn(0.75, near),
            CompassPoint::SouthSoutheast => pn(0.625, near),
            CompassPoint::South => pn(0.5, near),
            CompassPoint::SouthSouthwest => pn(0.375, near),
            CompassPoint::Southwest => pn(0.25, near),
            CompassPoint::WestSouthwest => pn(0.125, 0.25),
            CompassPoint::West => pn(near, 0.5),
            CompassPoint::WestNorthwest => pn(0.125, 0.75),
            CompassPoint::Northwest => pn(0.25, far),
            CompassPoint::NorthNorthwest => pn(0.375, far),
        }
    }
}

/// The sixteen anchors, computed once for a given margin.
#[derive(Debug, Clone, PartialEq)]
pub struct CompassTable {
    anchors: [PtN; 16],
}

impl Default for CompassTable {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN)
    }
}

impl CompassTable {
    /// Margins outside `0.0..=0.5` are clamped; non-finite margins use the default.
    pub fn new(margin: f64) -> Self {
        let margin = if margin.is_finite() { margin.clamp(0.0, 0.5) } else { DEFAULT_MARGIN };
        let anchors = CompassPoint::ALL.map(|point| point.anchor(margin));
        Self { anchors }
    }

    pub fn anchor(&self, point: CompassPoint) -> PtN {
        self.anchors[point as usize]
    }

    /// Resolve one token; unknown or empty tokens give [`CENTER`].
    pub fn resolve_token(&self, token: &str) -> PtN {
        match CompassPoint::parse(token) {
            Some(point) => self.anchor(point),
            None => {
                crate::log::debug!(token, "unknown alignment token, anchoring at center");
                CENTER
            }
        }
    }

    /// One anchor per declared token; absent or empty alignment gives a single center anchor.
    pub fn resolve(&self, align: Option<&Align>) -> Vec<PtN> {
        let tokens = align.map(Align::tokens).unwrap_or_default();
        if tokens.is_empty() {
            return vec![CENTER];
        }
        tokens.into_iter().map(|token| self.resolve_token(token)).collect()
    }
}

/// Resolve an alignment against a freshly built table.
///
/// Prefer holding a [`CompassTable`] (see `RenderConfig`) when resolving many items.
pub fn resolve(align: Option<&Align>, margin: f64) -> Vec<PtN> {
    CompassTable::new(margin).resolve(align)
}
