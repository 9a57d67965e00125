//! Process orchestration: turns a [`PipelineSpec`] into running children.
//!
//! Stages are started left to right. Each intermediate stage writes into an
//! anonymous pipe whose read end becomes the stdin of the next stage; the
//! orchestrator waits for a stage before starting its successor, so no more
//! than two children are alive at any time. Every descriptor is owned by a
//! `Stdio`, `ChildStdout` or `File` handle and closed when that handle drops.

use crate::command::{CommandRecord, EXIT_FAILURE, ExitCode, PipelineSpec};
use crate::errors::RuntimeError;
use crate::external::{self, ExternalCommand};
use crate::redirection::open_target;
use anyhow::Result;
use log::debug;
use std::io::Write;
use std::mem;
use std::process::Stdio;

/// Runs every stage of `spec` and returns their exit codes in stage order.
///
/// A stage that cannot be started reports its error on `stderr` and gets
/// [`EXIT_FAILURE`]; the stage after it reads an empty input. Errors are only
/// returned when `stderr` itself cannot be written.
pub fn execute(spec: &PipelineSpec, stderr: &mut dyn Write) -> Result<Vec<ExitCode>> {
    let mut statuses = Vec::with_capacity(spec.stages().len());
    let mut input = Stdio::inherit();
    let last = spec.stages().len() - 1;

    for (i, stage) in spec.stages().iter().enumerate() {
        let stdin = mem::replace(&mut input, Stdio::null());

        let outcome = if i == last {
            run_final(stage, stdin)
        } else {
            run_intermediate(stage, stdin).map(|(status, next)| {
                input = next;
                status
            })
        };

        let status = match outcome {
            Ok(status) => status,
            Err(e) => {
                writeln!(stderr, "Error: {}", e)?;
                EXIT_FAILURE
            }
        };
        debug!("stage {} ({:?}) finished with {}", i, stage.segment(), status);
        statuses.push(status);
    }

    Ok(statuses)
}

/// Starts a stage whose stdout feeds the next one, then reaps it.
///
/// Returns the stage's status together with the read end of its pipe.
fn run_intermediate(
    stage: &CommandRecord,
    stdin: Stdio,
) -> Result<(ExitCode, Stdio), RuntimeError> {
    let mut child = ExternalCommand::from(stage).spawn(stdin, Stdio::piped())?;
    let next = child
        .stdout
        .take()
        .map(Stdio::from)
        .unwrap_or_else(Stdio::null);
    Ok((external::wait(child), next))
}

/// Starts the last stage, with its output redirected if requested, and reaps it.
fn run_final(stage: &CommandRecord, stdin: Stdio) -> Result<ExitCode, RuntimeError> {
    let stdout = match stage.redirect() {
        Some(redirect) => Stdio::from(open_target(redirect)?),
        None => Stdio::inherit(),
    };
    let child = ExternalCommand::from(stage).spawn(stdin, stdout)?;
    Ok(external::wait(child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sshell_pipeline_{}_{}", std::process::id(), name))
    }

    fn run(line: &str) -> (Vec<ExitCode>, String) {
        let spec = classify(line).into_pipeline().expect("valid line");
        let mut err = Vec::<u8>::new();
        let statuses = execute(&spec, &mut err).unwrap();
        (statuses, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_two_stage_pipeline_into_file() {
        let out = temp_path("two_stage");
        let (statuses, err) = run(&format!("echo hello world | wc -w > {}", out.display()));

        assert_eq!(statuses, vec![0, 0]);
        assert_eq!(err, "");
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "2");
        let _ = fs::remove_file(out);
    }

    #[test]
    fn test_four_stage_pipeline() {
        let out = temp_path("four_stage");
        let (statuses, _) = run(&format!(
            "printf a\\nb\\nc\\n | sort -r | head -n 2 | tail -n 1 > {}",
            out.display()
        ));

        assert_eq!(statuses, vec![0, 0, 0, 0]);
        assert_eq!(fs::read_to_string(&out).unwrap(), "b\n");
        let _ = fs::remove_file(out);
    }

    #[test]
    fn test_statuses_reported_per_stage() {
        let out = temp_path("per_stage");
        let (statuses, _) = run(&format!("false | true | false > {}", out.display()));
        assert_eq!(statuses, vec![1, 0, 1]);
        let _ = fs::remove_file(out);
    }

    #[test]
    fn test_missing_program_in_first_stage() {
        let out = temp_path("missing_first");
        let (statuses, err) = run(&format!("nonexistentcmd123 | wc -c > {}", out.display()));

        assert_eq!(statuses, vec![1, 0]);
        assert_eq!(err, "Error: command not found\n");
        // the second stage saw an empty input
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "0");
        let _ = fs::remove_file(out);
    }

    #[test]
    fn test_single_missing_program() {
        let (statuses, err) = run("nonexistentcmd123");
        assert_eq!(statuses, vec![1]);
        assert_eq!(err, "Error: command not found\n");
    }

    #[test]
    fn test_redirect_target_is_truncated_then_appended() {
        let out = temp_path("modes");
        fs::write(&out, "stale content that must disappear\n").unwrap();

        let (statuses, _) = run(&format!("echo one > {}", out.display()));
        assert_eq!(statuses, vec![0]);
        let (statuses, _) = run(&format!("echo two >> {}", out.display()));
        assert_eq!(statuses, vec![0]);

        assert_eq!(fs::read_to_string(&out).unwrap(), "one\ntwo\n");
        let _ = fs::remove_file(out);
    }

    #[test]
    fn test_unopenable_redirect_target() {
        let out = temp_path("no_such_dir").join("out.txt");
        let (statuses, err) = run(&format!("echo hi | cat > {}", out.display()));

        assert_eq!(statuses, vec![0, 1]);
        assert_eq!(err, "Error: cannot open output file\n");
    }

    #[test]
    fn test_redirect_created_even_if_program_missing() {
        let out = temp_path("created_anyway");
        let _ = fs::remove_file(&out);

        let (statuses, err) = run(&format!("nonexistentcmd123 > {}", out.display()));
        assert_eq!(statuses, vec![1]);
        assert_eq!(err, "Error: command not found\n");
        assert!(out.exists());
        let _ = fs::remove_file(out);
    }
}
