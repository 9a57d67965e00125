use anyhow::Result;
use sshell::{Config, Interpreter, logging};

fn main() -> Result<()> {
    let config: Config = argh::from_env();
    logging::init(&config)?;

    let mut sh = Interpreter::new(config);
    sh.repl()
}
