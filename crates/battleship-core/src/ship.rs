//! Ships and the parts they are made of.
//!
//! A [`Ship`] is built once from a validated, straight run of cells and
//! never grows again: every confirmed hit removes one [`ShipPart`], and
//! the ship counts as destroyed when no parts remain.

use std::collections::BTreeMap;

use crate::coordinate::Coordinate;
use crate::ship_class::ShipClass;

/// Rendering hint for one ship cell: which segment image to draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PartTag {
    EndLeft,
    MidHorizontal,
    EndRight,
    EndTop,
    MidVertical,
    EndBottom,
}

impl PartTag {
    /// Name handed to the renderer.
    pub fn as_str(self) -> &'static str {
        match self {
            PartTag::EndLeft => "end_left",
            PartTag::MidHorizontal => "mid_h",
            PartTag::EndRight => "end_right",
            PartTag::EndTop => "end_top",
            PartTag::MidVertical => "mid_v",
            PartTag::EndBottom => "end_bottom",
        }
    }

    /// Tag for position `index` of a ship `len` cells long.
    fn for_position(horizontal: bool, index: usize, len: usize) -> Self {
        let first = index == 0;
        let last = index + 1 == len;
        match (horizontal, first, last) {
            (true, true, _) => PartTag::EndLeft,
            (true, _, true) => PartTag::EndRight,
            (true, _, _) => PartTag::MidHorizontal,
            (false, true, _) => PartTag::EndTop,
            (false, _, true) => PartTag::EndBottom,
            (false, _, _) => PartTag::MidVertical,
        }
    }
}

/// One occupied cell of a ship.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShipPart {
    pub pos: Coordinate,
    pub tag: PartTag,
}

/// A ship of a fixed class with its remaining (unhit) parts.
#[derive(Debug, Clone)]
pub struct Ship {
    class: ShipClass,

    /// Sequence index (0 = bow) -> part still afloat.
    parts: BTreeMap<usize, ShipPart>,
}

impl Ship {
    /// Build a ship from a validated straight run of cells.
    ///
    /// The run is horizontal when its first two cells share a row, so a
    /// run that wraps into the next row is tagged as vertical.
    pub fn new(class: ShipClass, cells: &[Coordinate]) -> Self {
        let horizontal = match cells {
            [first, second, ..] => second.row() == first.row(),
            _ => true,
        };

        let parts = cells
            .iter()
            .enumerate()
            .map(|(index, &pos)| {
                let tag = PartTag::for_position(horizontal, index, cells.len());
                (index, ShipPart { pos, tag })
            })
            .collect();

        Ship { class, parts }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// Parts not yet hit, in bow-to-stern order.
    pub fn parts(&self) -> impl Iterator<Item = &ShipPart> {
        self.parts.values()
    }

    /// Number of parts still afloat.
    pub fn remaining(&self) -> usize {
        self.parts.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns `true` if a part of this ship sits on `target`.
    pub fn occupies(&self, target: Coordinate) -> bool {
        self.parts.values().any(|part| part.pos == target)
    }

    /// Remove the part sitting on `target`, if any, and return it.
    pub fn take_hit(&mut self, target: Coordinate) -> Option<ShipPart> {
        let index = self
            .parts
            .iter()
            .find(|(_, part)| part.pos == target)
            .map(|(index, _)| *index)?;
        self.parts.remove(&index)
    }
}
