// crates/battleship-protocol/src/text_codec.rs

//! Line codec.
//!
//! Input format (one request per line → `Request`):
//!
//! - Create-game form / submit:
//!   `START` / `START <form>`
//!
//! - Join-game form / submit:
//!   `JOIN <game>` / `JOIN <game> <form>`
//!
//! - Play-game form / submit:
//!   `VIEW <game>` / `FIRE <game> <form>`
//!
//! - Event stream for the session's player:
//!   `EVENTS`
//!
//! - Session restore, home, disconnect:
//!   `SESSION <game> <player>` / `HOME` / `QUIT`
//!
//! Output format (`Response` → line). Every reply is a run of lines closed
//! by `END`:
//!
//! - `FORM start` / `FORM join <game>`
//! - `OPPONENT <name>`
//! - `SESSION <game> <player>`
//! - `FLASH <msg>` then `REDIRECT <path>`
//! - `INVALID <field> <msg>`
//! - `REJECT <msg>` / `ERROR <msg>`
//! - `OK`
//! - View: `STATUS <0|1|2>`, `TURN <yes|no>`, `BOARD <r> <cells>`,
//!   `SHOTS <r> <cells>` (`.` for an empty cell), `MSG <text>`
//!
//! The event stream instead writes SSE-style frames:
//! `data: stay alive` and finally `data: refresh`.

use thiserror::Error;

use battleship_core::{GameId, PlayerId};

use crate::form::Form;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    StartForm,
    Start(Form),
    JoinForm(GameId),
    Join(GameId, Form),
    View(GameId),
    Fire(GameId, Form),
    Events,
    Session { game: GameId, player: PlayerId },
    Home,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{command} needs a {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{0} takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// Parse a single request line.
///
/// Returns `Ok(None)` for blank lines or comments (starting with `#`).
pub fn parse_request_line(line: &str) -> Result<Option<Request>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = next_word(trimmed);
    let request = match command.to_ascii_uppercase().as_str() {
        "START" => match rest {
            "" => Request::StartForm,
            body => Request::Start(Form::parse(body)),
        },
        "JOIN" => {
            let (game, body) = require_word(rest, "JOIN", "game id")?;
            match body {
                "" => Request::JoinForm(GameId::from(game)),
                body => Request::Join(GameId::from(game), Form::parse(body)),
            }
        }
        "VIEW" => {
            let (game, _) = require_word(rest, "VIEW", "game id")?;
            Request::View(GameId::from(game))
        }
        "FIRE" => {
            let (game, body) = require_word(rest, "FIRE", "game id")?;
            Request::Fire(GameId::from(game), Form::parse(body))
        }
        "SESSION" => {
            let (game, rest) = require_word(rest, "SESSION", "game id")?;
            let (player, _) = require_word(rest, "SESSION", "player id")?;
            Request::Session {
                game: GameId::from(game),
                player: PlayerId::from(player),
            }
        }
        "EVENTS" => no_args(rest, "EVENTS", Request::Events)?,
        "HOME" => no_args(rest, "HOME", Request::Home)?,
        "QUIT" => no_args(rest, "QUIT", Request::Quit)?,
        _ => return Err(ParseError::UnknownCommand(command.to_string())),
    };

    Ok(Some(request))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    StartForm,
    JoinForm(GameId),
    Opponent(String),
    Session { game: GameId, player: PlayerId },
    Flash(String),
    Redirect(String),
    Invalid { field: String, message: String },
    Reject(String),
    Error(String),
    Ok,
    Status(u8),
    Turn(bool),
    Board { row: usize, cells: Vec<Option<String>> },
    Shots { row: usize, cells: Vec<Option<String>> },
    Msg(String),
    End,
}

impl Response {
    /// Redirect to a game's play page.
    pub fn to_game(game: &GameId) -> Response {
        Response::Redirect(format!("/{}", game))
    }

    /// Redirect to the create-game page.
    pub fn to_start() -> Response {
        Response::Redirect("/start".to_string())
    }
}

/// Format a `Response` as one line (no trailing newline).
pub fn format_response(resp: &Response) -> String {
    match resp {
        Response::StartForm => "FORM start".to_string(),
        Response::JoinForm(game) => format!("FORM join {}", game),
        Response::Opponent(name) => format!("OPPONENT {}", name),
        Response::Session { game, player } => format!("SESSION {} {}", game, player),
        Response::Flash(msg) => format!("FLASH {}", msg),
        Response::Redirect(path) => format!("REDIRECT {}", path),
        Response::Invalid { field, message } => format!("INVALID {} {}", field, message),
        Response::Reject(msg) => format!("REJECT {}", msg),
        Response::Error(msg) => format!("ERROR {}", msg),
        Response::Ok => "OK".to_string(),
        Response::Status(code) => format!("STATUS {}", code),
        Response::Turn(mine) => format!("TURN {}", if *mine { "yes" } else { "no" }),
        Response::Board { row, cells } => format!("BOARD {} {}", row, format_cells(cells)),
        Response::Shots { row, cells } => format!("SHOTS {} {}", row, format_cells(cells)),
        Response::Msg(text) => format!("MSG {}", text),
        Response::End => "END".to_string(),
    }
}

/// Frames written on an event stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventFrame {
    KeepAlive,
    Refresh,
}

/// Format a complete event frame, blank-line terminated.
pub fn format_event(frame: EventFrame) -> &'static str {
    match frame {
        EventFrame::KeepAlive => "data: stay alive\n\n",
        EventFrame::Refresh => "data: refresh\n\n",
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// Split off the first whitespace-delimited word.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

fn require_word<'a>(
    s: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    match next_word(s) {
        ("", _) => Err(ParseError::MissingArgument { command, what }),
        found => Ok(found),
    }
}

fn no_args(rest: &str, command: &'static str, request: Request) -> Result<Request, ParseError> {
    if rest.is_empty() {
        Ok(request)
    } else {
        Err(ParseError::UnexpectedArgument(command))
    }
}

fn format_cells(cells: &[Option<String>]) -> String {
    cells
        .iter()
        .map(|cell| cell.as_deref().unwrap_or("."))
        .collect::<Vec<_>>()
        .join(" ")
}
