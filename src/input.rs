use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

/// Where the read-eval loop gets its lines from.
pub enum LineSource {
    /// Interactive terminal: line editing and in-memory history.
    Editor(DefaultEditor),
    /// Anything else. Every line is echoed to stdout so transcripts stay readable.
    Plain(StdinLock<'static>),
}

impl LineSource {
    /// Picks the editor when stdin is a terminal and `use_editor` is set.
    pub fn new(use_editor: bool) -> Result<Self> {
        if use_editor && io::stdin().is_terminal() {
            let editor = DefaultEditor::new().context("can't initialize line editor")?;
            Ok(LineSource::Editor(editor))
        } else {
            Ok(LineSource::Plain(io::stdin().lock()))
        }
    }

    /// Shows `prompt` and reads one line without its terminator.
    ///
    /// Returns `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self {
            LineSource::Editor(rl) => loop {
                match rl.readline(prompt) {
                    Ok(line) => {
                        rl.add_history_entry(line.as_str())?;
                        return Ok(Some(line));
                    }
                    // Ctrl-C only discards the current line
                    Err(ReadlineError::Interrupted) => continue,
                    Err(ReadlineError::Eof) => return Ok(None),
                    Err(err) => return Err(err).context("readline failed"),
                }
            },
            LineSource::Plain(stdin) => {
                let mut stdout = io::stdout().lock();
                write!(stdout, "{}", prompt)?;
                stdout.flush()?;

                let mut raw = Vec::new();
                if stdin.read_until(b'\n', &mut raw).context("can't read stdin")? == 0 {
                    return Ok(None);
                }
                // bytes that aren't UTF-8 become U+FFFD instead of ending the loop
                let mut line = String::from_utf8_lossy(&raw).into_owned();
                strip_newline(&mut line);

                writeln!(stdout, "{}", line)?;
                stdout.flush()?;
                Ok(Some(line))
            }
        }
    }
}

fn strip_newline(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
