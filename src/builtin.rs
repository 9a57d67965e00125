use crate::command::{EXIT_FAILURE, ExitCode};
use crate::env::Environment;
use crate::errors::BuiltinError;
use crate::interpreter::Factory;
use crate::parser::Classification;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::Write;

/// Built-in commands serviced by the interpreter itself, without forking.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "pwd" or "cd".
    fn name() -> &'static str;

    /// Whether `line` invokes this builtin. By default the whole line must be the name.
    fn recognizes(line: &str, _classification: &Classification) -> bool {
        line == Self::name()
    }

    /// Builds the command from the words following its name.
    fn from_words(args: &[&str]) -> Result<Self, EarlyExit> {
        Self::from_args(&[Self::name()], args)
    }

    /// Executes the command.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Object-safe view of a builtin ready to run.
pub trait ExecutableBuiltin {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Factory that recognizes a builtin in a parsed line.
///
/// Returns `None` when the line does not invoke the factory's builtin.
pub trait BuiltinFactory {
    fn try_create(
        &self,
        line: &str,
        classification: &Classification,
    ) -> Option<Box<dyn ExecutableBuiltin>>;
}

impl<T: BuiltinCommand> ExecutableBuiltin for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdout, stderr, env) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stderr, "Error: {}", e)?;
                Ok(EXIT_FAILURE)
            }
        }
    }
}

/// Usage or argument errors reported by `argh`.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableBuiltin for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        if self.is_error {
            writeln!(stderr, "{}", self.output.trim_end())?;
            Ok(EXIT_FAILURE)
        } else {
            writeln!(stdout, "{}", self.output.trim_end())?;
            Ok(0)
        }
    }
}

impl<T: BuiltinCommand + 'static> BuiltinFactory for Factory<T> {
    fn try_create(
        &self,
        line: &str,
        classification: &Classification,
    ) -> Option<Box<dyn ExecutableBuiltin>> {
        if !T::recognizes(line, classification) {
            return None;
        }
        let args: Vec<&str> = classification
            .single()
            .map(|record| record.args()[1..].iter().map(String::as_str).collect())
            .unwrap_or_default();
        Some(match T::from_words(&args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stderr, "Bye...")?;
        env.should_exit = true;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; any further words are ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    /// `cd` is recognized by its first word, so it may take arguments
    /// (and a redirection, which is ignored).
    fn recognizes(_line: &str, classification: &Classification) -> bool {
        classification
            .single()
            .is_some_and(|record| record.program() == Self::name())
    }

    /// Words are taken as they are: a directory may be named `-x` or `--help`.
    fn from_words(args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Cd {
            args: args.iter().map(ToString::to_string).collect(),
        })
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let target = self.args.first().ok_or(BuiltinError::CannotChangeDirectory)?;
        if let Err(e) = env::set_current_dir(target) {
            log::debug!("cd {}: {}", target, e);
            return Err(BuiltinError::CannotChangeDirectory.into());
        }
        env.current_dir = env::current_dir()?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.current_dir.to_string_lossy())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List the entries of the current directory with their size in bytes.
pub struct Sls {}

impl BuiltinCommand for Sls {
    fn name() -> &'static str {
        "sls"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let entries =
            fs::read_dir(&env.current_dir).map_err(|_| BuiltinError::CannotOpenDirectory)?;

        for entry in entries {
            let entry = entry.map_err(|_| BuiltinError::CannotOpenDirectory)?;
            // stat follows symlinks; -1 marks an entry whose size can't be read
            let size = fs::metadata(entry.path())
                .map(|meta| meta.len() as i64)
                .unwrap_or(-1);
            writeln!(
                stdout,
                "{} ({} bytes)",
                entry.file_name().to_string_lossy(),
                size
            )?;
        }
        Ok(0)
    }
}
