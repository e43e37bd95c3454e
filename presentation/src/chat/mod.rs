//! Interactive chat module

mod repl;

pub use repl::{ChatRepl, ReplCommand};
