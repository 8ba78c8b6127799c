//! The five ship classes that make up every fleet.

/// Ship class. Each class has a fixed length and a form field name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShipClass {
    Battleship,
    Cruiser,
    Frigate,
    Destroyer,
    PatrolBoat,
}

/// Every fleet holds exactly one ship of each class, in this slot order.
pub const FLEET: [ShipClass; 5] = [
    ShipClass::Battleship,
    ShipClass::Cruiser,
    ShipClass::Frigate,
    ShipClass::Destroyer,
    ShipClass::PatrolBoat,
];

impl ShipClass {
    /// Number of cells the ship occupies.
    pub fn length(self) -> usize {
        match self {
            ShipClass::Battleship => 5,
            ShipClass::Cruiser => 4,
            ShipClass::Frigate => 3,
            ShipClass::Destroyer => 3,
            ShipClass::PatrolBoat => 2,
        }
    }

    /// Name used in status messages ("You have lost a cruiser.").
    pub fn name(self) -> &'static str {
        match self {
            ShipClass::Battleship => "battleship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Frigate => "frigate",
            ShipClass::Destroyer => "destroyer",
            ShipClass::PatrolBoat => "patrolboat",
        }
    }

    /// Form field carrying this class's placement string.
    pub fn field(self) -> &'static str {
        match self {
            ShipClass::Battleship => "btlship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Frigate => "frigate",
            ShipClass::Destroyer => "destroyer",
            ShipClass::PatrolBoat => "patrolboat",
        }
    }
}
