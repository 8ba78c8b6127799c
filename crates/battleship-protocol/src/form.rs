// crates/battleship-protocol/src/form.rs

//! Submitted forms and their field validators.
//!
//! A form body on the wire is `key=value` pairs joined by `&`:
//!
//! `username=alice&btlship=00,01,02,03,04&cruiser=10,11,12,13&...`
//!
//! Values are taken literally (they may contain `,` and spaces). When a
//! key repeats, the first value wins.
//!
//! Validators never stop at the first failure; each records its message
//! against the field and the caller checks [`Form::is_valid`] at the end.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use battleship_core::placement::{MSG_BLANK, MSG_INVALID};
use battleship_core::{validate_fleet, Coordinate, FieldErrors, FleetPlacement, ShipClass, FLEET};

pub const USERNAME: &str = "username";
pub const TARGET_POS: &str = "target_pos";

pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 10;

static BATTLESHIP_RX: Lazy<Regex> = Lazy::new(|| run_pattern(5));
static CRUISER_RX: Lazy<Regex> = Lazy::new(|| run_pattern(4));
static FRIGATE_RX: Lazy<Regex> = Lazy::new(|| run_pattern(3));
static DESTROYER_RX: Lazy<Regex> = Lazy::new(|| run_pattern(3));
static PATROL_BOAT_RX: Lazy<Regex> = Lazy::new(|| run_pattern(2));
static FIRE_POS_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{2}\s*$").expect("fire position pattern compiles"));

/// `n` two-digit codes separated by commas, blanks allowed around each.
fn run_pattern(n: usize) -> Regex {
    let pattern = format!(r"^(\s*\d{{2}}\s*,){{{}}}\s*\d{{2}}\s*$", n - 1);
    Regex::new(&pattern).expect("ship pattern compiles")
}

/// The placement pattern for one ship class.
pub fn ship_pattern(class: ShipClass) -> &'static Regex {
    match class {
        ShipClass::Battleship => &BATTLESHIP_RX,
        ShipClass::Cruiser => &CRUISER_RX,
        ShipClass::Frigate => &FRIGATE_RX,
        ShipClass::Destroyer => &DESTROYER_RX,
        ShipClass::PatrolBoat => &PATROL_BOAT_RX,
    }
}

/// What a valid create/join form yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameSubmission {
    pub username: String,
    pub placement: FleetPlacement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: HashMap<String, String>,
    errors: FieldErrors,
}

impl Form {
    pub fn new() -> Self {
        Form::default()
    }

    /// Decode a `key=value&key=value` body.
    pub fn parse(body: &str) -> Self {
        let mut values = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values
                .entry(key.trim().to_string())
                .or_insert_with(|| value.to_string());
        }
        Form {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// Builder used by clients and tests.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    /// Value of `field`, or `""` if absent.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    // -------------------------------------------------------------------------
    // Generic validators
    // -------------------------------------------------------------------------

    pub fn required(&mut self, fields: &[&str]) {
        for &field in fields {
            if self.get(field).trim().is_empty() {
                self.errors.add(field, MSG_BLANK);
            }
        }
    }

    pub fn min_length(&mut self, field: &str, min: usize) {
        let value = self.get(field);
        if !value.is_empty() && value.chars().count() < min {
            let msg = format!("This field is too short (minimum is {} characters)", min);
            self.errors.add(field, msg);
        }
    }

    pub fn max_length(&mut self, field: &str, max: usize) {
        let value = self.get(field);
        if !value.is_empty() && value.chars().count() > max {
            let msg = format!("This field is too long (maximum is {} characters)", max);
            self.errors.add(field, msg);
        }
    }

    pub fn matches_pattern(&mut self, field: &str, pattern: &Regex) {
        let value = self.get(field);
        if !value.trim().is_empty() && !pattern.is_match(value) {
            self.errors.add(field, MSG_INVALID);
        }
    }

    // -------------------------------------------------------------------------
    // Whole forms
    // -------------------------------------------------------------------------

    /// Check the create/join form.
    ///
    /// The generic checks run first; fleet geometry is reported only for
    /// fields those checks passed, so a field shows one kind of complaint.
    pub fn validate_new_game(&mut self) -> Option<NewGameSubmission> {
        let mut required = vec![USERNAME];
        required.extend(FLEET.iter().map(|class| class.field()));
        self.required(&required);
        self.min_length(USERNAME, USERNAME_MIN);
        self.max_length(USERNAME, USERNAME_MAX);
        for class in FLEET {
            self.matches_pattern(class.field(), ship_pattern(class));
        }

        let fleet = validate_fleet(|class| self.values.get(class.field()).map(String::as_str));
        match fleet {
            Ok(placement) if self.is_valid() => Some(NewGameSubmission {
                username: self.get(USERNAME).to_string(),
                placement,
            }),
            Ok(_) => None,
            Err(geometry) => {
                self.errors.merge_new_fields(geometry);
                None
            }
        }
    }

    /// Check the fire form and decode the target.
    pub fn validate_fire(&mut self) -> Option<Coordinate> {
        self.required(&[TARGET_POS]);
        self.matches_pattern(TARGET_POS, &FIRE_POS_RX);
        if !self.is_valid() {
            return None;
        }
        match self.get(TARGET_POS).parse() {
            Ok(target) => Some(target),
            Err(_) => {
                self.errors.add(TARGET_POS, MSG_INVALID);
                None
            }
        }
    }
}
