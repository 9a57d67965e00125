use thiserror::Error;

/// Errors produced while classifying a line. Nothing has been spawned when one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing command")]
    MissingCommand,

    #[error("too many process arguments")]
    TooManyArguments,

    #[error("no output file")]
    NoOutputFile,

    #[error("mislocated output redirection")]
    MislocatedRedirection,

    #[error("too many pipeline stages")]
    TooManyStages,
}

/// Errors affecting a single stage while a pipeline runs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("command not found")]
    CommandNotFound,

    #[error("cannot open output file")]
    CannotOpenOutputFile,

    #[error("cannot create child process")]
    CannotCreateChild,
}

/// Errors reported by builtins. Never fatal to the interpreter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinError {
    #[error("cannot cd into directory")]
    CannotChangeDirectory,

    #[error("cannot open directory")]
    CannotOpenDirectory,
}
