use crate::command::ExitCode;
use std::fmt;

/// Completion line emitted once a command, pipeline or builtin has finished.
///
/// Formats as `+ completed '<line>' [<s0>][<s1>]...`, one bracketed status per stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion<'a> {
    line: &'a str,
    statuses: Vec<ExitCode>,
}

impl<'a> Completion<'a> {
    pub fn new(line: &'a str, statuses: Vec<ExitCode>) -> Self {
        Self { line, statuses }
    }

    /// Completion of a builtin or any other single-status command.
    pub fn single(line: &'a str, status: ExitCode) -> Self {
        Self::new(line, vec![status])
    }
}

impl fmt::Display for Completion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+ completed '{}' ", self.line)?;
        for status in &self.statuses {
            write!(f, "[{}]", status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_status() {
        let c = Completion::single("nonexistentcmd123", 1);
        assert_eq!(c.to_string(), "+ completed 'nonexistentcmd123' [1]");
    }

    #[test]
    fn test_pipeline_statuses_left_to_right() {
        let c = Completion::new("echo hi | grep x | wc -l", vec![0, 1, 0]);
        assert_eq!(
            c.to_string(),
            "+ completed 'echo hi | grep x | wc -l' [0][1][0]"
        );
    }
}
