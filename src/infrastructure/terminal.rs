// Crossterm screen driver
use crate::application::screen::{PenColor, ScreenDriver};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// Owns stdout for the life of the board. Output is queued and written on
/// `flush`; dropping the driver restores the terminal.
///
/// Raw mode stays off so Ctrl-C still reaches the process as SIGINT.
pub struct CrosstermScreen {
    out: Stdout,
}

impl CrosstermScreen {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            Hide,
            SetForegroundColor(Color::White),
            Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }
}

fn to_color(color: PenColor) -> Color {
    match color {
        PenColor::Green => Color::Green,
        PenColor::Amber => Color::Yellow,
        PenColor::Red => Color::Red,
        PenColor::Blue => Color::Blue,
        PenColor::White => Color::White,
    }
}

// ANSI rows/cols are 1-based, crossterm's are 0-based
fn origin(row: u16, col: u16) -> MoveTo {
    MoveTo(col.saturating_sub(1), row.saturating_sub(1))
}

impl ScreenDriver for CrosstermScreen {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn set_color(&mut self, color: PenColor) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(to_color(color)))
    }

    fn write_at(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        queue!(self.out, origin(row, col), Print(text))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
    }
}
