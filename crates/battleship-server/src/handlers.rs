//! Request handlers.
//!
//! Each handler takes the shared state, the connection's current session,
//! and one parsed request, and produces the response lines plus the
//! session the connection should hold afterwards. Handlers never touch
//! the socket, so the connection task can run them on their own task and
//! survive a panic.
//!
//! Admission checks run before a handler touches a game:
//! - game exists (join, view, fire),
//! - game can still be joined (join),
//! - session belongs to the game (view, fire).

use std::sync::Arc;

use battleship_core::{
    FireResult, GameError, GameId, GameStatus, Player, PlayerId, SharedGame, TurnSignal,
};
use battleship_protocol::{render_view, Form, Request, Response};
use tracing::{debug, error, info};

use crate::types::{AppState, Session};

pub const CAPACITY_REACHED: &str = "Sorry, too many games right now. Please try after a while.";
pub const NO_SUCH_GAME: &str = "No such game or game has expired. Create a new game.";
pub const GAME_FULL: &str = "Game is full. Start another.";
pub const NOT_YOUR_GAME: &str = "No such game or you are not a part of the game. Start another.";
pub const NOT_A_PLAYER: &str = "You are not a part of this game. Create a new game.";
pub const INTERNAL_ERROR: &str = "internal server error";

/// What a handler hands back to the connection loop.
#[derive(Debug)]
pub struct Reply {
    pub session: Option<Session>,
    pub responses: Vec<Response>,
}

impl Reply {
    fn new(session: Option<Session>, responses: Vec<Response>) -> Self {
        Reply { session, responses }
    }
}

/// Route one request. `Session`, `Events` and `Quit` belong to the
/// connection loop and are answered there.
pub async fn dispatch(state: AppState, session: Option<Session>, request: Request) -> Reply {
    match request {
        Request::StartForm => Reply::new(session, start_form(&state).await),
        Request::Start(form) => start_game(&state, session, form).await,
        Request::JoinForm(game) => Reply::new(session, join_form(&state, &game).await),
        Request::Join(game, form) => join_game(&state, session, &game, form).await,
        Request::View(game) => view_game(&state, session, &game).await,
        Request::Fire(game, form) => {
            let responses = fire(&state, session.as_ref(), &game, form).await;
            Reply::new(session, responses)
        }
        Request::Home => {
            let to = match &session {
                Some(s) => Response::to_game(&s.game),
                None => Response::to_start(),
            };
            Reply::new(session, vec![to])
        }
        Request::Session { .. } | Request::Events | Request::Quit => {
            Reply::new(session, vec![Response::Error("not a routed request".to_string())])
        }
    }
}

// -----------------------------------------------------------------------------
// Create
// -----------------------------------------------------------------------------

async fn start_form(state: &AppState) -> Vec<Response> {
    if state.games.is_full().await {
        return vec![Response::Reject(CAPACITY_REACHED.to_string())];
    }
    vec![Response::StartForm]
}

async fn start_game(state: &AppState, session: Option<Session>, mut form: Form) -> Reply {
    if state.games.is_full().await {
        return Reply::new(session, vec![Response::Reject(CAPACITY_REACHED.to_string())]);
    }

    let Some(submission) = form.validate_new_game() else {
        let mut out = vec![Response::StartForm];
        out.extend(invalid_fields(&form));
        return Reply::new(session, out);
    };

    let creator = match Player::new(submission.username, submission.placement) {
        Ok(player) => player,
        Err(e) => return Reply::new(session, internal_error(&e)),
    };
    let player = creator.id().clone();

    match state.games.create(creator).await {
        Ok(game) => {
            let responses = vec![
                Response::Session {
                    game: game.clone(),
                    player: player.clone(),
                },
                Response::to_game(&game),
            ];
            Reply::new(Some(Session { game, player }), responses)
        }
        Err(GameError::CapacityExceeded { .. }) => {
            Reply::new(session, vec![Response::Reject(CAPACITY_REACHED.to_string())])
        }
        Err(e) => Reply::new(session, internal_error(&e)),
    }
}

// -----------------------------------------------------------------------------
// Join
// -----------------------------------------------------------------------------

async fn join_form(state: &AppState, game_id: &GameId) -> Vec<Response> {
    let game = match joinable_game(state, game_id).await {
        Ok(game) => game,
        Err(refusal) => return refusal,
    };

    let host = game.lock().await.host_name().map(str::to_string);
    let mut out = vec![Response::JoinForm(game_id.clone())];
    out.extend(host.map(Response::Opponent));
    out
}

async fn join_game(
    state: &AppState,
    session: Option<Session>,
    game_id: &GameId,
    mut form: Form,
) -> Reply {
    let game = match joinable_game(state, game_id).await {
        Ok(game) => game,
        Err(refusal) => return Reply::new(session, refusal),
    };
    let mut game = game.lock().await;

    let Some(submission) = form.validate_new_game() else {
        let mut out = vec![Response::JoinForm(game_id.clone())];
        out.extend(game.host_name().map(|name| Response::Opponent(name.to_string())));
        out.extend(invalid_fields(&form));
        return Reply::new(session, out);
    };

    let joiner = match Player::new(submission.username, submission.placement) {
        Ok(player) => player,
        Err(e) => return Reply::new(session, internal_error(&e)),
    };
    let player = joiner.id().clone();

    match game.join(joiner) {
        Ok(()) => {
            let responses = vec![
                Response::Session {
                    game: game_id.clone(),
                    player: player.clone(),
                },
                Response::to_game(game_id),
            ];
            let session = Session {
                game: game_id.clone(),
                player,
            };
            Reply::new(Some(session), responses)
        }
        Err(GameError::NotForming | GameError::GameFull) => {
            Reply::new(session, flash_to_start(GAME_FULL))
        }
        Err(e) => Reply::new(session, internal_error(&e)),
    }
}

/// Game-exists and can-join checks. Only a forming game with a free
/// seat takes a joiner; active and finished games are full.
async fn joinable_game(state: &AppState, game_id: &GameId) -> Result<SharedGame, Vec<Response>> {
    let game = state
        .games
        .get(game_id)
        .await
        .ok_or_else(|| flash_to_start(NO_SUCH_GAME))?;

    if !game.lock().await.can_join() {
        return Err(flash_to_start(GAME_FULL));
    }
    Ok(game)
}

// -----------------------------------------------------------------------------
// Play
// -----------------------------------------------------------------------------

async fn view_game(state: &AppState, session: Option<Session>, game_id: &GameId) -> Reply {
    let (game, player) = match seated_player(state, session.as_ref(), game_id).await {
        Ok(found) => found,
        Err(refusal) => return Reply::new(session, refusal),
    };

    let (view, now_empty) = {
        let mut game = game.lock().await;
        let Some(view) = game.view(&player) else {
            return Reply::new(session, flash_to_start(NOT_A_PLAYER));
        };

        // A finished game is torn down one viewer at a time.
        if game.status() == GameStatus::Finished {
            game.remove_player(&player);
            (view, Some(game.is_empty()))
        } else {
            (view, None)
        }
    };

    let session = match now_empty {
        None => session,
        Some(empty) => {
            info!(game_id = %game_id, player_id = %player, "player left finished game");
            if empty && state.games.remove(game_id).await.is_some() {
                info!(game_id = %game_id, "game removed after last player left");
            }
            None
        }
    };

    Reply::new(session, render_view(&view))
}

async fn fire(
    state: &AppState,
    session: Option<&Session>,
    game_id: &GameId,
    mut form: Form,
) -> Vec<Response> {
    let (game, player) = match seated_player(state, session, game_id).await {
        Ok(found) => found,
        Err(refusal) => return refusal,
    };
    let mut game = game.lock().await;

    // Out-of-turn requests bounce back to the play page untouched.
    if game.status() != GameStatus::Active || game.next_to_play() != &player {
        debug!(game_id = %game_id, player_id = %player, "fire ignored: not this player's turn");
        return vec![Response::to_game(game_id)];
    }

    match form.validate_fire() {
        None => game.note_invalid_fire(&player),
        Some(target) => {
            if let FireResult::Ignored(reason) = game.fire(&player, target) {
                debug!(game_id = %game_id, ?reason, "fire ignored");
            }
        }
    }
    vec![Response::to_game(game_id)]
}

/// Belongs-to-game check: the session names this game and its player is
/// still seated in it.
async fn seated_player(
    state: &AppState,
    session: Option<&Session>,
    game_id: &GameId,
) -> Result<(SharedGame, PlayerId), Vec<Response>> {
    let game = state
        .games
        .get(game_id)
        .await
        .ok_or_else(|| flash_to_start(NO_SUCH_GAME))?;

    let session = match session {
        Some(s) if &s.game == game_id => s,
        _ => return Err(flash_to_start(NOT_YOUR_GAME)),
    };

    if game.lock().await.player(&session.player).is_none() {
        return Err(flash_to_start(NOT_A_PLAYER));
    }
    Ok((game, session.player.clone()))
}

// -----------------------------------------------------------------------------
// Events
// -----------------------------------------------------------------------------

/// Look up the signal an event stream should wait on.
///
/// The handle is cloned out under the game lock; the caller waits on it
/// after the lock is gone.
pub async fn event_signal(
    state: &AppState,
    session: Option<&Session>,
) -> Result<Arc<TurnSignal>, Response> {
    let session = session.ok_or_else(|| Response::Error("no session".to_string()))?;
    let game = state
        .games
        .get(&session.game)
        .await
        .ok_or_else(|| Response::Error("no such game".to_string()))?;

    let game = game.lock().await;
    game.player(&session.player)
        .map(Player::signal)
        .ok_or_else(|| Response::Error("no such player".to_string()))
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn flash_to_start(msg: &str) -> Vec<Response> {
    vec![Response::Flash(msg.to_string()), Response::to_start()]
}

fn invalid_fields(form: &Form) -> impl Iterator<Item = Response> + '_ {
    form.errors().iter().map(|(field, message)| Response::Invalid {
        field: field.to_string(),
        message: message.to_string(),
    })
}

fn internal_error(err: &GameError) -> Vec<Response> {
    error!(error = %err, "request failed");
    vec![Response::Error(INTERNAL_ERROR.to_string())]
}
