// crates/battleship-protocol/src/render.rs

//! Play-page rendering.

use battleship_core::PlayerView;

use crate::text_codec::Response;

/// The response lines for one play-page snapshot, without the closing
/// `END`.
pub fn render_view(view: &PlayerView) -> Vec<Response> {
    let mut out = Vec::with_capacity(4 + view.board.len() * 2 + view.messages.len());

    out.push(Response::Status(view.status.code()));
    out.push(Response::Turn(view.my_turn));
    if let Some(name) = &view.opponent {
        out.push(Response::Opponent(name.clone()));
    }

    for (row, cells) in view.board.iter().enumerate() {
        out.push(Response::Board {
            row,
            cells: cells.clone(),
        });
    }
    for (row, cells) in view.shots.iter().enumerate() {
        out.push(Response::Shots {
            row,
            cells: cells.clone(),
        });
    }

    out.extend(view.messages.iter().cloned().map(Response::Msg));
    out
}
