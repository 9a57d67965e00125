//! Whitespace tokenizer shared by every classification branch.
//!
//! There is no quoting and no escaping: a token is any maximal run of
//! non-whitespace characters.

use crate::command::MAX_ARGS;
use crate::errors::ParseError;

/// Splits a segment into an argument vector.
///
/// # Errors
/// * [`ParseError::MissingCommand`] when the segment holds no token at all.
/// * [`ParseError::TooManyArguments`] when it holds more than [`MAX_ARGS`] tokens.
pub fn split_into_tokens(segment: &str) -> Result<Vec<String>, ParseError> {
    let mut out = Vec::new();

    for token in segment.split_whitespace() {
        if out.len() == MAX_ARGS {
            return Err(ParseError::TooManyArguments);
        }
        out.push(token.to_string());
    }

    if out.is_empty() {
        return Err(ParseError::MissingCommand);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_runs_of_whitespace() {
        let tokens = split_into_tokens("  ls \t -l   /tmp ").unwrap();
        assert_eq!(tokens, vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_quotes_are_plain_characters() {
        let tokens = split_into_tokens("echo \"a b\"").unwrap();
        assert_eq!(tokens, vec!["echo", "\"a", "b\""]);
    }

    #[test]
    fn test_empty_segment_is_missing_command() {
        assert_eq!(split_into_tokens(""), Err(ParseError::MissingCommand));
        assert_eq!(split_into_tokens("   \t"), Err(ParseError::MissingCommand));
    }

    #[test]
    fn test_argument_limit() {
        let sixteen = vec!["x"; MAX_ARGS].join(" ");
        assert_eq!(split_into_tokens(&sixteen).unwrap().len(), MAX_ARGS);

        let seventeen = vec!["x"; MAX_ARGS + 1].join(" ");
        assert_eq!(
            split_into_tokens(&seventeen),
            Err(ParseError::TooManyArguments)
        );
    }
}
