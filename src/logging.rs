use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;

/// Installs the global logger described by `config`.
///
/// Stderr carries the completion protocol, so logs only ever go to the file
/// named by `--log-file`. Without one, no logger is installed and the `log`
/// macros stay no-ops.
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("can't open log file {}", path.display()))?;

    simplelog::WriteLogger::init(config.log_level, simplelog::Config::default(), file)
        .context("logger already initialized")?;
    log::info!("sshell {} started, pid {}", env!("CARGO_PKG_VERSION"), std::process::id());
    Ok(())
}
