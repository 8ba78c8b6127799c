//! Geometric validation of a fleet placement.
//!
//! Input is one comma-separated list of two-digit cell codes per ship
//! class. Validation is pure and collects every failure per form field:
//!
//! - each token must decode to a cell (`0..=99`),
//! - each list must have exactly the class length,
//! - each list must be a run stepping by `+1` (horizontal) or `+10`
//!   (vertical) from its first cell,
//! - no cell may be claimed by two lists; every repeat is reported
//!   against the field that repeated it.
//!
//! Ships are only built (see [`FleetPlacement::into_fleet`]) once the
//! whole submission is valid.

use std::collections::{BTreeMap, HashMap};

use crate::coordinate::{Coordinate, CoordinateError};
use crate::ship::Ship;
use crate::ship_class::{ShipClass, FLEET};

pub const MSG_BLANK: &str = "This field cannot be blank";
pub const MSG_INVALID: &str = "This field is invalid";
pub const MSG_NOT_STRAIGHT: &str = "Ship must be placed horizontally or vertically";

/// Validation failures keyed by form field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.by_field
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded against `field` (empty if none).
    pub fn get(&self, field: &str) -> &[String] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// `(field, message)` pairs, fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_field
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| (field.as_str(), m.as_str())))
    }

    /// Fold in `other`'s messages for fields that have no errors here yet.
    pub fn merge_new_fields(&mut self, other: FieldErrors) {
        for (field, msgs) in other.by_field {
            self.by_field.entry(field).or_insert(msgs);
        }
    }
}

/// A fully validated placement: one straight run of cells per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetPlacement {
    runs: Vec<(ShipClass, Vec<Coordinate>)>,
}

impl FleetPlacement {
    /// `(class, cells)` in fleet slot order.
    pub fn runs(&self) -> impl Iterator<Item = (ShipClass, &[Coordinate])> {
        self.runs.iter().map(|(class, cells)| (*class, cells.as_slice()))
    }

    /// Build the ships, keyed by fleet slot `0..5`.
    pub fn into_fleet(self) -> BTreeMap<usize, Ship> {
        self.runs
            .into_iter()
            .enumerate()
            .map(|(slot, (class, cells))| (slot, Ship::new(class, &cells)))
            .collect()
    }
}

/// Split and decode a comma-separated list of cell codes.
pub fn parse_cells(raw: &str) -> Result<Vec<Coordinate>, CoordinateError> {
    raw.split(',').map(str::parse).collect()
}

/// `true` iff `codes` steps from its first element by exactly `+1` or
/// exactly `+10` at every position.
pub fn is_straight_line(codes: &[u8]) -> bool {
    let Some(&first) = codes.first() else {
        return false;
    };
    let progression = |step: u32| {
        codes
            .iter()
            .enumerate()
            .all(|(i, &code)| code as u32 == first as u32 + step * i as u32)
    };
    progression(1) || progression(10)
}

/// Validate one class's placement string on its own (no overlap check).
pub fn check_run(class: ShipClass, raw: &str) -> Result<Vec<Coordinate>, String> {
    if raw.trim().is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    let cells = parse_cells(raw).map_err(|_| MSG_INVALID.to_string())?;
    if cells.len() != class.length() {
        return Err(format!(
            "The {} must occupy exactly {} squares",
            class.name(),
            class.length()
        ));
    }
    let codes: Vec<u8> = cells.iter().map(|c| c.code()).collect();
    if !is_straight_line(&codes) {
        return Err(MSG_NOT_STRAIGHT.to_string());
    }
    Ok(cells)
}

/// Validate the whole fleet. `value_of` yields the raw placement string
/// submitted for each class (or `None` if the field was absent).
pub fn validate_fleet<'a, F>(mut value_of: F) -> Result<FleetPlacement, FieldErrors>
where
    F: FnMut(ShipClass) -> Option<&'a str>,
{
    let mut errors = FieldErrors::new();
    let mut runs = Vec::with_capacity(FLEET.len());
    let mut seen: HashMap<Coordinate, usize> = HashMap::new();

    for class in FLEET {
        let raw = value_of(class).unwrap_or("");

        // Overlaps are counted over every decodable list, even one that
        // fails the shape checks.
        if let Ok(cells) = parse_cells(raw) {
            for cell in &cells {
                let count = seen.entry(*cell).or_insert(0);
                *count += 1;
                if *count >= 2 {
                    errors.add(class.field(), format!("{} is overlapping", cell));
                }
            }
        }

        match check_run(class, raw) {
            Ok(cells) => runs.push((class, cells)),
            Err(msg) => errors.add(class.field(), msg),
        }
    }

    if errors.is_empty() {
        Ok(FleetPlacement { runs })
    } else {
        Err(errors)
    }
}
