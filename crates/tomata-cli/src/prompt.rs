//! Line-oriented console prompts.

use std::io::{self, BufRead, Write};

use tomata_core::{BreakChoice, ContinueChoice, CoreError, Prompt};

/// Blocking prompts over stdin.
///
/// EOF and a Ctrl-C landing mid-read both surface as "no answer", which
/// maps to the safe choice (exit / keep current / no).
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }

    /// Ask for the first session's tag. May be empty.
    pub fn initial_tag(&mut self) -> Result<String, CoreError> {
        let answer = self.ask("Tag for this session (optional): ")?;
        Ok(answer.unwrap_or_default().trim().to_string())
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool, CoreError> {
        let answer = self.ask(&format!("{question} [y/N] "))?;
        Ok(matches!(
            answer.unwrap_or_default().trim(),
            "y" | "Y" | "yes" | "Yes"
        ))
    }

    /// One line from stdin; `None` on EOF or an interrupted read.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, CoreError> {
        let mut out = io::stdout();
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Prompt for ConsolePrompt {
    fn break_or_exit(&mut self) -> Result<BreakChoice, CoreError> {
        loop {
            let Some(answer) = self.ask("Take a [b]reak or [q]uit? ")? else {
                return Ok(BreakChoice::Exit);
            };
            match answer.trim().to_lowercase().as_str() {
                "" | "b" | "break" => return Ok(BreakChoice::Break),
                "q" | "quit" | "exit" => return Ok(BreakChoice::Exit),
                _ => println!("Please answer 'b' or 'q'."),
            }
        }
    }

    fn work_or_exit(&mut self) -> Result<ContinueChoice, CoreError> {
        loop {
            let Some(answer) = self.ask("Start [w]ork or [q]uit? ")? else {
                return Ok(ContinueChoice::Exit);
            };
            match answer.trim().to_lowercase().as_str() {
                "" | "w" | "work" => return Ok(ContinueChoice::Work),
                "q" | "quit" | "exit" => return Ok(ContinueChoice::Exit),
                _ => println!("Please answer 'w' or 'q'."),
            }
        }
    }

    fn next_tag(&mut self, current: &str) -> Result<String, CoreError> {
        let label = if current.is_empty() {
            "Tag for next session (optional): ".to_string()
        } else {
            format!("Tag for next session [{current}], '-' to clear: ")
        };
        let Some(answer) = self.ask(&label)? else {
            return Ok(current.to_string());
        };
        Ok(match answer.trim() {
            "" => current.to_string(),
            "-" => String::new(),
            other => other.to_string(),
        })
    }
}
