//! Console I/O for `INPUT` and `OUTPUT`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where a running program reads its input and writes its output.
pub trait Console {
    /// Shows `prompt` and blocks for one line of input.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of output.
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

/// The process's standard input and output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} ", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", text)
    }
}

/// A console with pre-loaded input that records everything shown.
///
/// # Example
///
/// ```
/// use rapcode::interpreter::{Console, ScriptedConsole};
///
/// let mut console = ScriptedConsole::new(["7"]);
/// assert_eq!(console.read_line("n?").unwrap().as_deref(), Some("7"));
/// console.write_line("49").unwrap();
///
/// assert_eq!(console.prompts(), ["n?"]);
/// assert_eq!(console.output(), ["49"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Creates a console that will answer `INPUT` with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Every line written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }
}
