use crate::command::{CommandRecord, MAX_STAGES, PipelineSpec, RedirectMode, Redirection};
use crate::errors::ParseError;
use crate::lexer::split_into_tokens;
use log::{debug, warn};
use std::path::PathBuf;

const PIPE: char = '|';
const REDIRECT: char = '>';
const APPEND: &str = ">>";

/// Result of classifying one input line.
///
/// The classifier is a pure function of the line: building a `Classification`
/// never touches the process table or any descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A single command without pipe or redirection.
    Normal(CommandRecord),
    /// A single command whose stdout goes to a file.
    Redirected(CommandRecord),
    /// Two or more stages connected by pipes.
    Piped(PipelineSpec),
    /// The line is malformed; nothing must be executed.
    Invalid(ParseError),
}

impl Classification {
    /// Lowers a valid classification to the pipeline the orchestrator runs.
    pub fn into_pipeline(self) -> Result<PipelineSpec, ParseError> {
        match self {
            Classification::Normal(record) | Classification::Redirected(record) => {
                Ok(record.into())
            }
            Classification::Piped(spec) => Ok(spec),
            Classification::Invalid(err) => Err(err),
        }
    }

    /// The single record of a `Normal` or `Redirected` line.
    pub fn single(&self) -> Option<&CommandRecord> {
        match self {
            Classification::Normal(record) | Classification::Redirected(record) => Some(record),
            _ => None,
        }
    }
}

/// Classifies a trimmed input line.
///
/// A pipe anywhere in the line takes precedence over redirection: the line is
/// split into stages and every stage is re-examined for its own redirection.
pub fn classify(line: &str) -> Classification {
    let result = if line.contains(PIPE) {
        parse_pipeline(line).map(Classification::Piped)
    } else {
        parse_segment(line).map(|record| match record.redirect() {
            Some(_) => Classification::Redirected(record),
            None => Classification::Normal(record),
        })
    };

    let classification = result.unwrap_or_else(Classification::Invalid);
    debug!("classified {:?} as {:?}", line, classification);
    classification
}

/// Parses a pipe-free segment into a record, with a redirection if the segment has one.
fn parse_segment(segment: &str) -> Result<CommandRecord, ParseError> {
    match segment.find(REDIRECT) {
        Some(pos) => parse_redirection(segment, pos),
        None => Ok(CommandRecord::new(split_into_tokens(segment)?, segment, None)),
    }
}

/// Extracts the command and output file around the operator starting at `pos`.
///
/// `>>` is recognized before `>`. The command is validated before the file
/// name, so `> f` reports a missing command rather than a file problem.
fn parse_redirection(segment: &str, pos: usize) -> Result<CommandRecord, ParseError> {
    let (mode, operator_len) = if segment[pos..].starts_with(APPEND) {
        (RedirectMode::Append, APPEND.len())
    } else {
        (RedirectMode::Truncate, 1)
    };

    let args = split_into_tokens(&segment[..pos])?;

    let mut targets = segment[pos + operator_len..]
        .split(|c: char| c == REDIRECT || c.is_whitespace())
        .filter(|token| !token.is_empty());
    let path = targets.next().ok_or(ParseError::NoOutputFile)?;

    let dropped: Vec<&str> = targets.collect();
    if !dropped.is_empty() {
        warn!(
            "ignoring {:?} after output file {:?} in {:?}",
            dropped, path, segment
        );
    }

    Ok(CommandRecord::new(
        args,
        segment,
        Some(Redirection {
            path: PathBuf::from(path),
            mode,
        }),
    ))
}

/// Splits a line on pipes and parses each stage independently.
fn parse_pipeline(line: &str) -> Result<PipelineSpec, ParseError> {
    let segments: Vec<&str> = line.split(PIPE).collect();

    if segments.len() < 2 {
        return Err(ParseError::MissingCommand);
    }
    if segments.len() > MAX_STAGES {
        return Err(ParseError::TooManyStages);
    }

    let last = segments.len() - 1;
    let mut stages = Vec::with_capacity(segments.len());
    for (i, segment) in segments.into_iter().enumerate() {
        let record = parse_segment(segment)?;
        if record.redirect().is_some() && i != last {
            return Err(ParseError::MislocatedRedirection);
        }
        stages.push(record);
    }

    Ok(PipelineSpec::new(stages))
}
