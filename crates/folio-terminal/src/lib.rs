//! Command interpreter and terminal contract for folio.
//!
//! The interpreter is a pure function of (input line, current directory,
//! tree): it parses one line, resolves the target path, dispatches to a
//! fixed command set, and returns a structured [`CommandResult`] -- typed
//! output messages, an optional new current directory, an optional clear
//! flag, an optional open action. The caller (a web terminal, the demo
//! REPL) owns turning that into visible effects.
//!
//! Also here: tab-completion, history recall, the URL-route bridge, and
//! [`Session`], a thin state-threading layer for callers.

mod complete;
mod history;
mod interpreter;
mod parse;
mod route;
mod session;

pub use complete::complete;
pub use history::History;
pub use interpreter::{Action, CommandResult, Interpreter};
pub use parse::{Keyword, ParsePolicy, ParsedCommand, ParsedLine, available_commands, parse};
pub use route::{RouteChange, route_change};
pub use session::Session;
