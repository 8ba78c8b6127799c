//! battleship-protocol
//!
//! Text-level surface of the battleship server.
//!
//! This crate turns request lines into [`Request`]s, [`Response`]s back
//! into lines, and checks submitted forms before anything reaches the
//! engine:
//!
//! - [`text_codec`] : request parsing / response formatting
//! - [`form`]       : generic field validators and the two game forms
//! - [`render`]     : a [`battleship_core::PlayerView`] as response lines

pub mod form;
pub mod render;
pub mod text_codec;

pub use form::{Form, NewGameSubmission};
pub use render::render_view;
pub use text_codec::{
    format_event, format_response, parse_request_line, EventFrame, ParseError, Request, Response,
};
