//! The composed scene: an ordered list of drawables with their roles

use std::fmt;

use super::shapes::{Shape, ShapeEnum};
use crate::model::Dimensions;
use crate::types::{BBox, Norm, PtN};

/// Sub-part of a rendered item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The primary shape
    Body,
    Pillow,
    WardrobeDoor,
    Chair,
    Shelf,
    Lamp,
    Pane,
    Plant,
    Label,
}

impl Part {
    pub fn name(self) -> &'static str {
        match self {
            Part::Body => "body",
            Part::Pillow => "pillow",
            Part::WardrobeDoor => "wardrobe-door",
            Part::Chair => "chair",
            Part::Shelf => "shelf",
            Part::Lamp => "lamp",
            Part::Pane => "pane",
            Part::Plant => "plant",
            Part::Label => "label",
        }
    }
}

/// Sub-part of the compass rose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPart {
    Dial,
    Letter(char),
    ArrowShaft,
    ArrowHead,
}

/// What a drawable represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// The wall outline
    Boundary,
    /// Marker at the room center
    BalancePoint,
    Item {
        /// Position in the room's item list
        index: usize,
        anchor: PtN,
        variant: &'static str,
        part: Part,
    },
    Compass(CompassPart),
    Title,
    Info,
}

impl Role {
    pub fn part(&self) -> Option<Part> {
        match self {
            Role::Item { part, .. } => Some(*part),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Boundary => write!(f, "boundary"),
            Role::BalancePoint => write!(f, "balance-point"),
            Role::Item { index, anchor, variant, part } => write!(
                f,
                "item[{index}] {variant} {} @ ({}, {})",
                part.name(),
                anchor.x,
                anchor.y
            ),
            Role::Compass(CompassPart::Dial) => write!(f, "compass dial"),
            Role::Compass(CompassPart::Letter(c)) => write!(f, "compass letter {c}"),
            Role::Compass(CompassPart::ArrowShaft) => write!(f, "compass arrow-shaft"),
            Role::Compass(CompassPart::ArrowHead) => write!(f, "compass arrow-head"),
            Role::Title => write!(f, "title"),
            Role::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub role: Role,
    pub shape: ShapeEnum,
}

/// A fully composed, not yet encoded, picture of one room.
///
/// Drawables are kept in paint order: later entries cover earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    drawables: Vec<Drawable>,
    dimensions: Dimensions,
}

impl Scene {
    pub fn new(dimensions: Dimensions) -> Self {
        Self { drawables: Vec::new(), dimensions }
    }

    pub fn push(&mut self, role: Role, shape: impl Into<ShapeEnum>) {
        self.drawables.push(Drawable { role, shape: shape.into() });
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// True when the room declared no usable dimensions.
    pub fn uses_fallback_dimensions(&self) -> bool {
        self.dimensions.is_fallback()
    }

    /// Union of all drawable bounds
    pub fn bounds(&self) -> BBox<Norm> {
        let mut bb = BBox::new();
        for d in &self.drawables {
            bb.expand_box(&d.shape.bounds());
        }
        bb
    }

    /// Number of drawables for a given item part
    pub fn count_parts(&self, part: Part) -> usize {
        self.drawables.iter().filter(|d| d.role.part() == Some(part)).count()
    }

    /// One line per drawable: role and primitive kind.
    pub fn outline(&self) -> String {
        self.drawables
            .iter()
            .map(|d| format!("{} {}", d.role, d.shape.kind()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
