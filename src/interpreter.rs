use crate::builtin::BuiltinFactory;
use crate::command::CMDLINE_MAX;
use crate::config::Config;
use crate::env::Environment;
use crate::input::LineSource;
use crate::parser::{self, Classification};
use crate::pipeline;
use crate::report::Completion;
use anyhow::Result;
use log::{debug, warn};
use std::io::{self, Write};

/// Factory allows creating instances of the builtins.
///
/// Only supports builtins defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The read-eval loop: classifies each line, services builtins in-process and
/// hands everything else to the pipeline orchestrator.
///
/// Every line is handled from scratch; nothing parsed for one line survives
/// into the next.
///
/// Example
/// ```
/// use sshell::{Config, Interpreter};
/// let mut sh = Interpreter::new(Config::default());
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// sh.execute_line("true | false", &mut out, &mut err).unwrap();
/// assert_eq!(String::from_utf8(err).unwrap(), "+ completed 'true | false' [0][1]\n");
/// ```
pub struct Interpreter {
    config: Config,
    env: Environment,
    builtins: Vec<Box<dyn BuiltinFactory>>,
}

impl Interpreter {
    /// Create an interpreter with the default builtins: `exit`, `cd`, `pwd` and `sls`.
    pub fn new(config: Config) -> Self {
        use crate::builtin::*;
        Self::with_builtins(
            config,
            vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Pwd>::default()),
                Box::new(Factory::<Sls>::default()),
            ],
        )
    }

    /// Create an interpreter with a custom set of builtins.
    pub fn with_builtins(config: Config, builtins: Vec<Box<dyn BuiltinFactory>>) -> Self {
        Self {
            config,
            env: Environment::new(),
            builtins,
        }
    }

    /// Whether `exit` has been executed.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Reads and executes lines until `exit` or end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut input = LineSource::new(!self.config.no_editor)?;

        while !self.env.should_exit {
            let Some(raw) = input.read_line(&self.config.prompt)? else {
                debug!("end of input");
                break;
            };
            let line = clamp_line(&raw).trim();
            self.execute_line(line, &mut io::stdout(), &mut io::stderr())?;
        }

        Ok(())
    }

    /// Executes one trimmed line.
    ///
    /// Builtin output goes to `stdout`. Error messages and the completion line
    /// go to `stderr`. Child processes always inherit the real standard streams.
    /// The returned error only signals a failure to write to those streams.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let classification = parser::classify(line);
        if let Classification::Invalid(e) = &classification {
            writeln!(stderr, "Error: {}", e)?;
            return Ok(());
        }

        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(line, &classification) {
                let status = cmd.execute(stdout, stderr, &mut self.env)?;
                stdout.flush()?;
                writeln!(stderr, "{}", Completion::single(line, status))?;
                return Ok(());
            }
        }

        let spec = classification.into_pipeline()?;
        // children share our stdout; anything we printed must land first
        stdout.flush()?;
        let statuses = pipeline::execute(&spec, stderr)?;
        writeln!(stderr, "{}", Completion::new(line, statuses))?;
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Cuts `line` to the `CMDLINE_MAX - 1` characters a line may hold.
fn clamp_line(line: &str) -> &str {
    match line.char_indices().nth(CMDLINE_MAX - 1) {
        Some((end, _)) => {
            warn!("line longer than {} characters truncated", CMDLINE_MAX - 1);
            &line[..end]
        }
        None => line,
    }
}
