//! Terminal frame sink for the countdown display.

use std::io::{self, Write};

use crossterm::{cursor, execute, queue, terminal};

use tomata_core::{CoreError, Screen, SegmentKind};

/// Draws each frame at the top of a cleared screen, hiding the cursor for
/// the duration of a segment.
pub struct TermScreen {
    header: String,
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            header: String::new(),
        }
    }
}

impl Screen for TermScreen {
    fn segment_started(&mut self, kind: SegmentKind, tag: &str) -> Result<(), CoreError> {
        self.header = if kind == SegmentKind::Work && !tag.is_empty() {
            format!("{} [{}]", kind.label(), tag)
        } else {
            kind.label().to_string()
        };
        let mut out = io::stdout();
        execute!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;
        Ok(())
    }

    fn draw(&mut self, frame: &[String]) -> Result<(), CoreError> {
        let mut out = io::stdout();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::FromCursorDown)
        )?;
        writeln!(out, "{}", self.header)?;
        writeln!(out)?;
        for line in frame {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn segment_finished(&mut self) -> Result<(), CoreError> {
        let mut out = io::stdout();
        execute!(out, cursor::Show)?;
        writeln!(out)?;
        Ok(())
    }
}
