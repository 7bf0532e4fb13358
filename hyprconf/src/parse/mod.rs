//! Parse sessions, their results and the failures they record.
//!
//! A parse feeds text engine events through a session that routes each
//! assignment to a special category, a schema entry or a keyword handler,
//! in that order. Failures are collected into a [`ParseResult`] according
//! to the [`ParseMode`].

mod error;
mod handler;
mod result;
mod session;

pub use error::ParseError;
pub use handler::{HandlerCall, HandlerOptions};
pub use result::{ParseMode, ParseResult};

pub(crate) use handler::Handlers;
pub(crate) use session::Session;
