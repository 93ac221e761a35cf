// Screen driver trait for the character-addressable display
use crate::domain::tier::SeverityTier;
use std::io;

/// Explicit pen colors. Tiers map onto the first four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenColor {
    Green,
    Amber,
    Red,
    Blue,
    White,
}

impl From<SeverityTier> for PenColor {
    fn from(tier: SeverityTier) -> Self {
        match tier {
            SeverityTier::Normal => PenColor::Green,
            SeverityTier::Caution => PenColor::Amber,
            SeverityTier::Warning => PenColor::Red,
            SeverityTier::Critical => PenColor::Blue,
        }
    }
}

/// Cursor-addressed display. Rows and columns are 1-based like ANSI.
///
/// Implementations are owned by exactly one task; the trait is not meant to be
/// shared behind a lock.
pub trait ScreenDriver: Send {
    fn clear(&mut self) -> io::Result<()>;

    fn set_color(&mut self, color: PenColor) -> io::Result<()>;

    fn write_at(&mut self, row: u16, col: u16, text: &str) -> io::Result<()>;

    /// Push queued output to the device.
    fn flush(&mut self) -> io::Result<()>;
}
