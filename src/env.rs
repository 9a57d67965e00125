use std::env as stdenv;
use std::path::PathBuf;

/// Interpreter state shared with the builtins.
///
/// The environment contains:
/// - `current_dir`: the working directory, kept in sync with the process by `cd`.
/// - `should_exit`: a flag that the read-eval loop checks after every line.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the read-eval loop should stop.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current working directory of the process.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
