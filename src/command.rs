use std::path::PathBuf;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Status reported for a stage that could not be started or whose program was not found.
pub const EXIT_FAILURE: ExitCode = 1;

/// Maximum number of arguments (program name included) per stage.
pub const MAX_ARGS: usize = 16;

/// Maximum number of stages in a pipeline.
pub const MAX_STAGES: usize = 4;

/// Size of the line buffer; one byte is reserved, so lines hold at most `CMDLINE_MAX - 1` characters.
pub const CMDLINE_MAX: usize = 512;

/// How the redirect target is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// `>`: create the file if needed and drop its previous content.
    #[default]
    Truncate,
    /// `>>`: write after the existing content.
    Append,
}

/// Output redirection attached to a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub path: PathBuf,
    pub mode: RedirectMode,
}

/// Parsed representation of a single stage.
///
/// A record is only ever built by the parser, which guarantees that `args` holds
/// between 1 and [`MAX_ARGS`] entries and that `redirect` is set exactly when the
/// segment contained a redirection operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    args: Vec<String>,
    segment: String,
    redirect: Option<Redirection>,
}

impl CommandRecord {
    pub(crate) fn new(args: Vec<String>, segment: &str, redirect: Option<Redirection>) -> Self {
        debug_assert!(!args.is_empty() && args.len() <= MAX_ARGS);
        Self {
            args,
            segment: segment.to_string(),
            redirect,
        }
    }

    /// Program name, i.e. the first argument.
    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// Full argument vector, program name included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Raw text of the segment this record was parsed from.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn redirect(&self) -> Option<&Redirection> {
        self.redirect.as_ref()
    }
}

/// Ordered sequence of 1 to [`MAX_STAGES`] stages connected by pipes.
///
/// Only the last stage may carry a redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
    stages: Vec<CommandRecord>,
}

impl PipelineSpec {
    pub(crate) fn new(stages: Vec<CommandRecord>) -> Self {
        debug_assert!(!stages.is_empty() && stages.len() <= MAX_STAGES);
        debug_assert!(
            stages
                .iter()
                .rev()
                .skip(1)
                .all(|stage| stage.redirect().is_none())
        );
        Self { stages }
    }

    pub fn stages(&self) -> &[CommandRecord] {
        &self.stages
    }
}

impl From<CommandRecord> for PipelineSpec {
    /// A lone command is the degenerate single-stage pipeline.
    fn from(record: CommandRecord) -> Self {
        Self::new(vec![record])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(args: &[&str]) -> CommandRecord {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        CommandRecord::new(args.clone(), &args.join(" "), None)
    }

    #[test]
    fn test_record_accessors() {
        let rec = CommandRecord::new(
            vec!["ls".to_string(), "-l".to_string()],
            "ls -l > out",
            Some(Redirection {
                path: PathBuf::from("out"),
                mode: RedirectMode::Truncate,
            }),
        );

        assert_eq!(rec.program(), "ls");
        assert_eq!(rec.args(), ["ls", "-l"]);
        assert_eq!(rec.segment(), "ls -l > out");
        assert_eq!(rec.redirect().unwrap().path, PathBuf::from("out"));
    }

    #[test]
    fn test_single_record_becomes_one_stage_pipeline() {
        let spec = PipelineSpec::from(record(&["true"]));
        assert_eq!(spec.stages().len(), 1);
        assert_eq!(spec.stages()[0].program(), "true");
    }

    #[test]
    fn test_default_mode_is_truncate() {
        assert_eq!(RedirectMode::default(), RedirectMode::Truncate);
    }
}
