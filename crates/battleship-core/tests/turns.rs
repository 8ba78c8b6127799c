// crates/battleship-core/tests/turns.rs
mod common;

use battleship_core::{
    FireResult, Game, GameError, GameId, GameStatus, IgnoreReason, ShipClass, ShotMark,
};
use common::{active_game, alice, bob, cell, player, FLEET_A, FLEET_B};

fn resolved(result: FireResult) -> battleship_core::FireReport {
    match result {
        FireResult::Resolved(report) => report,
        other => panic!("expected a resolved shot, got {:?}", other),
    }
}

#[test]
fn new_game_is_forming_with_invite() {
    let game = Game::new(GameId::from("g-42"), player("alice-id", "alice", &FLEET_A));

    assert_eq!(game.status(), GameStatus::Forming);
    assert_eq!(game.status().code(), 0);
    assert_eq!(game.next_to_play(), &alice());
    assert_eq!(game.host_name(), Some("alice"));

    let host = game.player(&alice()).unwrap();
    assert_eq!(
        host.messages(),
        [
            "Invite opponent to /join/g-42.".to_string(),
            "Waiting for opponent to join.".to_string(),
        ]
    );
    // 17 ship cells projected onto the own board
    assert_eq!(host.board().occupied(), 17);
    assert_eq!(host.shots().occupied(), 0);
}

#[test]
fn join_links_players_and_signals_creator() {
    let game = active_game();

    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.player_count(), 2);
    assert_eq!(game.next_to_play(), &alice());

    let a = game.player(&alice()).unwrap();
    let b = game.player(&bob()).unwrap();
    assert_eq!(a.opponent(), Some(&bob()));
    assert_eq!(b.opponent(), Some(&alice()));
    assert_eq!(
        a.messages(),
        [
            "bobby has joined the game".to_string(),
            "It's your turn to play.".to_string(),
        ]
    );
    assert_eq!(b.messages(), ["Waiting for alice to play.".to_string()]);
    assert!(a.signal().is_pending());
    assert!(!b.signal().is_pending());
}

#[test]
fn join_is_rejected_once_active() {
    let mut game = active_game();
    let err = game
        .join(player("carol-id", "carol", &FLEET_B))
        .unwrap_err();
    assert!(matches!(err, GameError::NotForming));
    assert!(!game.can_join());
    assert_eq!(game.player_count(), 2);
}

#[test]
fn scenario_hit_then_stale_fire_then_miss() {
    let mut game = active_game();

    // A fires at 00, the bow of B's battleship.
    let report = resolved(game.fire(&alice(), cell(0)));
    assert!(report.hit);
    assert_eq!(report.destroyed, None);
    assert_eq!(game.next_to_play(), &bob());

    let a = game.player(&alice()).unwrap();
    assert_eq!(a.shots().get(cell(0)), Some(ShotMark::Hit));
    assert_eq!(a.messages()[0], "You have HIT a ship.");
    assert_eq!(a.messages().last().unwrap(), "Waiting for bobby to play.");

    let b = game.player(&bob()).unwrap();
    assert_eq!(
        b.messages(),
        ["You have been hit.".to_string(), "Your turn to play.".to_string()]
    );
    assert!(b.board().get(cell(0)).unwrap().on_fire);
    assert_eq!(b.board().get(cell(0)).unwrap().render(), "end_top_fire");
    assert!(b.signal().is_pending());

    // A fires again immediately: not A's turn, nothing changes.
    let before = game.player(&alice()).unwrap().messages().to_vec();
    assert_eq!(
        game.fire(&alice(), cell(10)),
        FireResult::Ignored(IgnoreReason::NotYourTurn)
    );
    assert_eq!(game.next_to_play(), &bob());
    assert_eq!(game.player(&alice()).unwrap().messages(), before.as_slice());
    assert_eq!(game.player(&alice()).unwrap().shots().get(cell(10)), None);
    assert_eq!(game.player(&bob()).unwrap().fleet()[&0].remaining(), 4);

    // B misses on an empty cell; turn reverts to A.
    let report = resolved(game.fire(&bob(), cell(99)));
    assert!(!report.hit);
    assert_eq!(game.next_to_play(), &alice());

    let b = game.player(&bob()).unwrap();
    assert_eq!(b.shots().get(cell(99)), Some(ShotMark::Miss));
    assert_eq!(
        b.messages(),
        ["You missed.".to_string(), "Waiting for alice to play.".to_string()]
    );
    let a = game.player(&alice()).unwrap();
    assert_eq!(
        a.messages(),
        [
            "bobby has missed. No casualty.".to_string(),
            "Your turn to play.".to_string(),
        ]
    );
}

#[test]
fn repeated_miss_leaves_board_unchanged() {
    let mut game = active_game();

    resolved(game.fire(&alice(), cell(99)));
    let after_first = game.player(&alice()).unwrap().shots().clone();

    // Second fire is out of turn and rejected.
    assert_eq!(
        game.fire(&alice(), cell(99)),
        FireResult::Ignored(IgnoreReason::NotYourTurn)
    );
    assert_eq!(game.player(&alice()).unwrap().shots(), &after_first);
    assert_eq!(game.next_to_play(), &bob());

    // Once it is A's turn again, the same cell is an ordinary miss.
    resolved(game.fire(&bob(), cell(98)));
    let report = resolved(game.fire(&alice(), cell(99)));
    assert!(!report.hit);
    assert_eq!(game.player(&alice()).unwrap().shots(), &after_first);
}

#[test]
fn each_hit_removes_exactly_one_part() {
    let mut game = active_game();
    let cruiser_cells = [2u8, 12, 22, 32];

    for (i, &code) in cruiser_cells.iter().enumerate() {
        let report = resolved(game.fire(&alice(), cell(code)));
        assert!(report.hit);

        let fleet = game.player(&bob()).unwrap().fleet();
        if i + 1 < cruiser_cells.len() {
            assert_eq!(report.destroyed, None);
            assert_eq!(fleet[&1].remaining(), cruiser_cells.len() - i - 1);
        } else {
            assert_eq!(report.destroyed, Some(ShipClass::Cruiser));
            assert!(!fleet.contains_key(&1));
            assert_eq!(fleet.len(), 4);
        }

        // hand the turn back with a miss
        resolved(game.fire(&bob(), cell(90 + i as u8)));
    }

    // The last exchange was B's miss, so A's queue narrates that.
    let a = game.player(&alice()).unwrap();
    assert_eq!(a.messages()[0], "bobby has missed. No casualty.");
    assert_eq!(game.player(&bob()).unwrap().fleet().len(), 4);
}

#[test]
fn sinking_reports_destroyed_class_to_both() {
    let mut game = active_game();

    resolved(game.fire(&alice(), cell(8)));
    resolved(game.fire(&bob(), cell(99)));
    let report = resolved(game.fire(&alice(), cell(18)));
    assert_eq!(report.destroyed, Some(ShipClass::PatrolBoat));

    let a = game.player(&alice()).unwrap();
    assert_eq!(
        a.messages(),
        [
            "You have HIT a ship.".to_string(),
            "You have destroyed a patrolboat.".to_string(),
            "Waiting for bobby to play.".to_string(),
        ]
    );
    let b = game.player(&bob()).unwrap();
    assert_eq!(
        b.messages(),
        [
            "You have been hit.".to_string(),
            "You have lost a patrolboat.".to_string(),
            "Your turn to play.".to_string(),
        ]
    );
}

#[test]
fn last_ship_finishes_game_and_freezes_turn() {
    let mut game = active_game();
    let targets: Vec<u8> = FLEET_B
        .iter()
        .flat_map(|(_, cells)| cells.split(','))
        .map(|c| c.parse().unwrap())
        .collect();
    let misses: Vec<u8> = (50..99).filter(|c| c % 10 >= 5).collect();

    let last = targets.len() - 1;
    for (i, &target) in targets.iter().enumerate() {
        let report = resolved(game.fire(&alice(), cell(target)));
        assert!(report.hit);
        if i < last {
            assert!(!report.game_over);
            assert_eq!(game.status(), GameStatus::Active);
            resolved(game.fire(&bob(), cell(misses[i])));
        } else {
            assert!(report.game_over);
        }
    }

    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.status().code(), 2);
    // No swap after the winning shot.
    assert_eq!(game.next_to_play(), &alice());
    assert!(game.player(&bob()).unwrap().is_defeated());

    let a = game.player(&alice()).unwrap();
    assert_eq!(
        &a.messages()[a.messages().len() - 2..],
        [
            "You have destroyed all your opponent's ships.".to_string(),
            "You are the WINNER!".to_string(),
        ]
    );
    let b = game.player(&bob()).unwrap();
    assert_eq!(
        &b.messages()[b.messages().len() - 2..],
        [
            "You have lost all your ships.".to_string(),
            "You have lost the game.".to_string(),
        ]
    );
    assert!(b.signal().is_pending());

    // Nobody can fire any more.
    assert_eq!(
        game.fire(&alice(), cell(0)),
        FireResult::Ignored(IgnoreReason::NotActive)
    );
    assert_eq!(
        game.fire(&bob(), cell(0)),
        FireResult::Ignored(IgnoreReason::NotActive)
    );
}

#[test]
fn forming_game_ignores_fire() {
    let mut game = Game::new(GameId::from("g"), player("alice-id", "alice", &FLEET_A));
    assert_eq!(
        game.fire(&alice(), cell(0)),
        FireResult::Ignored(IgnoreReason::NotActive)
    );
}

#[test]
fn view_snapshots_the_viewer_seat() {
    let mut game = active_game();
    resolved(game.fire(&alice(), cell(0)));

    let view = game.view(&bob()).unwrap();
    assert_eq!(view.status, GameStatus::Active);
    assert!(view.my_turn);
    assert_eq!(view.opponent.as_deref(), Some("alice"));
    assert_eq!(view.board[0][0].as_deref(), Some("end_top_fire"));
    assert_eq!(view.board[1][0].as_deref(), Some("mid_v"));
    assert_eq!(view.board[0][1], None);

    let view = game.view(&alice()).unwrap();
    assert!(!view.my_turn);
    assert_eq!(view.shots[0][0].as_deref(), Some("hit_bomb"));
    assert_eq!(view.shots[0][1], None);

    assert!(game.view(&battleship_core::PlayerId::from("nobody")).is_none());
}

#[test]
fn invalid_fire_note_keeps_turn() {
    let mut game = active_game();
    game.note_invalid_fire(&alice());
    let a = game.player(&alice()).unwrap();
    assert_eq!(
        a.messages().last().unwrap(),
        "You have entered an invalid firing position. Try again."
    );
    assert_eq!(game.next_to_play(), &alice());
}
