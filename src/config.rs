use argh::FromArgs;
use log::LevelFilter;
use std::path::PathBuf;

/// Prompt shown before every line.
pub const DEFAULT_PROMPT: &str = "sshell@ucd$ ";

#[derive(FromArgs, Debug, Clone)]
/// A small shell: runs commands, pipelines of up to four stages and output redirections.
pub struct Config {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// prompt printed before each line
    pub prompt: String,

    #[argh(option)]
    /// file receiving diagnostic logs; logging is disabled without it
    pub log_file: Option<PathBuf>,

    #[argh(option, default = "LevelFilter::Info")]
    /// maximum level written to the log file (off, error, warn, info, debug, trace)
    pub log_level: LevelFilter,

    #[argh(switch)]
    /// read plain lines from stdin even when it is a terminal
    pub no_editor: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: String::from(DEFAULT_PROMPT),
            log_file: None,
            log_level: LevelFilter::Info,
            no_editor: false,
        }
    }
}
