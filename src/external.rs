use crate::command::{CommandRecord, ExitCode};
use crate::errors::RuntimeError;
use log::{debug, error};
use std::ffi::OsString;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus, Stdio};

/// One stage of a pipeline, ready to be launched as a child process.
///
/// Program lookup follows the usual `PATH` rules and happens as part of
/// [`ExternalCommand::spawn`].
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    /// Starts the program with the given standard streams; stderr is inherited.
    ///
    /// The `Stdio` handles are consumed, so the parent's copies of the
    /// descriptors are closed as soon as the child exists (or spawning failed).
    pub fn spawn(&self, stdin: Stdio, stdout: Stdio) -> Result<Child, RuntimeError> {
        let child = std::process::Command::new(&self.name)
            .args(&self.args)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| classify_spawn_error(&self.name, e))?;
        debug!("spawned {:?} as pid {}", self.name, child.id());
        Ok(child)
    }
}

impl From<&CommandRecord> for ExternalCommand {
    fn from(record: &CommandRecord) -> Self {
        Self {
            name: record.program().into(),
            args: record.args()[1..].iter().map(|x| x.into()).collect(),
        }
    }
}

fn classify_spawn_error(name: &OsString, e: io::Error) -> RuntimeError {
    match e.kind() {
        // fork itself failed: the process table or memory is exhausted
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => {
            error!("cannot create child for {:?}: {}", name, e);
            RuntimeError::CannotCreateChild
        }
        _ => {
            debug!("exec of {:?} failed: {}", name, e);
            RuntimeError::CommandNotFound
        }
    }
}

/// Blocks until `child` exits and converts its status to a shell exit code.
pub fn wait(mut child: Child) -> ExitCode {
    let pid = child.id();
    match child.wait() {
        Ok(status) => {
            let code = exit_code(status);
            debug!("pid {} exited with {}", pid, code);
            code
        }
        Err(e) => {
            error!("wait for pid {} failed: {}", pid, e);
            crate::command::EXIT_FAILURE
        }
    }
}

/// Exit code of a finished process; signals map to `128 + signal`.
pub fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    fn external(line: &str) -> ExternalCommand {
        let classification = classify(line);
        let record = classification.single().expect("single command");
        ExternalCommand::from(record)
    }

    #[test]
    fn test_from_record_splits_program_and_args() {
        let cmd = external("ls -l /tmp");
        assert_eq!(cmd.name, OsString::from("ls"));
        assert_eq!(cmd.args, vec![OsString::from("-l"), OsString::from("/tmp")]);
    }

    #[test]
    fn test_spawn_and_wait_success() {
        let child = external("true")
            .spawn(Stdio::null(), Stdio::null())
            .unwrap();
        assert_eq!(wait(child), 0);
    }

    #[test]
    fn test_spawn_and_wait_failure_code() {
        let child = external("false")
            .spawn(Stdio::null(), Stdio::null())
            .unwrap();
        assert_eq!(wait(child), 1);
    }

    #[test]
    fn test_unknown_program() {
        let res = external("nonexistentcmd123").spawn(Stdio::null(), Stdio::null());
        assert_eq!(res.err(), Some(RuntimeError::CommandNotFound));
    }

    #[test]
    fn test_signal_exit_code() {
        let status = ExitStatus::from_raw(9);
        assert_eq!(exit_code(status), 137);

        let status = ExitStatus::from_raw(2 << 8);
        assert_eq!(exit_code(status), 2);
    }
}
