//! A small line-oriented shell.
//!
//! Each input line is classified by a pure parser into a single command, a
//! redirected command, or a pipeline of up to four stages. The stages are then
//! run as child processes wired together with anonymous pipes, and their exit
//! statuses are reported on stderr as a completion line:
//!
//! ```text
//! + completed 'echo hello world | wc -w' [0][0]
//! ```
//!
//! The main entry point is [`Interpreter`]. The public modules [`parser`],
//! [`command`] and [`pipeline`] can also be used on their own to classify lines
//! and run pipelines without the read-eval loop.

pub mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod errors;
mod external;
mod input;
mod interpreter;
mod lexer;
pub mod logging;
pub mod parser;
pub mod pipeline;
mod redirection;
pub mod report;

pub use config::Config;
pub use interpreter::Interpreter;
