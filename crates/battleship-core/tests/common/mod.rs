// Shared fixtures for the battleship-core integration tests.
#![allow(dead_code)]

use battleship_core::{validate_fleet, FleetPlacement, Game, GameId, Player, PlayerId};

pub const FLEET_A: [(&str, &str); 5] = [
    ("btlship", "00,01,02,03,04"),
    ("cruiser", "10,11,12,13"),
    ("frigate", "20,21,22"),
    ("destroyer", "30,31,32"),
    ("patrolboat", "40,41"),
];

pub const FLEET_B: [(&str, &str); 5] = [
    ("btlship", "00,10,20,30,40"),
    ("cruiser", "02,12,22,32"),
    ("frigate", "04,14,24"),
    ("destroyer", "06,16,26"),
    ("patrolboat", "08,18"),
];

pub fn placement(fields: &[(&str, &str)]) -> FleetPlacement {
    validate_fleet(|class| {
        fields
            .iter()
            .find(|(name, _)| *name == class.field())
            .map(|(_, value)| *value)
    })
    .expect("fixture fleet must be valid")
}

pub fn player(id: &str, name: &str, fields: &[(&str, &str)]) -> Player {
    Player::with_id(PlayerId::from(id), name, placement(fields))
}

pub fn alice() -> PlayerId {
    PlayerId::from("alice-id")
}

pub fn bob() -> PlayerId {
    PlayerId::from("bob-id")
}

/// An active game: Alice created it, Bob joined, Alice fires first.
pub fn active_game() -> Game {
    let mut game = Game::new(
        GameId::from("game-1"),
        player("alice-id", "alice", &FLEET_A),
    );
    game.join(player("bob-id", "bobby", &FLEET_B))
        .expect("join must succeed");
    game
}

pub fn cell(code: u8) -> battleship_core::Coordinate {
    battleship_core::Coordinate::from_code(code).expect("valid code")
}
