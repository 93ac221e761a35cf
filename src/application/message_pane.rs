// Message pane - Bounded scrolling log area of the board
use crate::application::layout::{
    BORDER_WIDTH, MESSAGE_COL, MESSAGE_LINES, MESSAGE_ROW, MESSAGE_WIDTH,
};
use crate::application::screen::{PenColor, ScreenDriver};
use std::collections::VecDeque;
use std::io;

const STAMP_MASK: i64 = 0xFFF;

pub struct MessagePane {
    lines: VecDeque<String>,
    capacity: usize,
    width: usize,
    message_color: PenColor,
    border_color: PenColor,
}

impl Default for MessagePane {
    fn default() -> Self {
        Self::new(MESSAGE_LINES, MESSAGE_WIDTH)
    }
}

impl MessagePane {
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            width: width.max(1),
            message_color: PenColor::Red,
            border_color: PenColor::White,
        }
    }

    /// Wrapping relative stamp: wall-clock seconds modulo 4096.
    pub fn current_stamp() -> u16 {
        (chrono::Utc::now().timestamp() & STAMP_MASK) as u16
    }

    pub fn append(&mut self, text: &str) -> usize {
        self.append_stamped(Self::current_stamp(), text)
    }

    /// Stamp, split and push a message. Returns how many lines were kept.
    ///
    /// Segments beyond the pane capacity are dropped, not queued.
    pub fn append_stamped(&mut self, stamp: u16, text: &str) -> usize {
        let stamped = format!("[{}]: {}", stamp, text);
        let mut segments = split_segments(&stamped, self.width);
        segments.truncate(self.capacity);
        let kept = segments.len();

        // Newest segments go on top in reading order
        for segment in segments.into_iter().rev() {
            self.lines.push_front(segment);
        }
        self.lines.truncate(self.capacity);

        kept
    }

    /// Current contents, top row first.
    #[cfg(test)]
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn render(&self, screen: &mut dyn ScreenDriver) -> io::Result<()> {
        let blank = format!(
            "{:width$}*",
            "",
            width = (BORDER_WIDTH - MESSAGE_COL) as usize
        );

        for row in 0..self.capacity {
            let screen_row = MESSAGE_ROW + row as u16;
            screen.set_color(self.border_color)?;
            screen.write_at(screen_row, MESSAGE_COL, &blank)?;

            if let Some(line) = self.lines.get(row) {
                screen.set_color(self.message_color)?;
                screen.write_at(screen_row, MESSAGE_COL, line)?;
            }
        }

        Ok(())
    }
}

/// Split into fixed-width segments on character boundaries.
fn split_segments(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
