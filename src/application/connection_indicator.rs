// Connection status indicator - Spinner glyph or error glyph in the board corner
use crate::application::layout::{CONNECTION_STATUS_COL, CONNECTION_STATUS_ROW};
use crate::application::screen::{PenColor, ScreenDriver};
use std::io;
use std::sync::Arc;
use tokio::sync::watch;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const ERROR_GLYPH: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Error,
}

/// Writer side, held by the command server.
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    tx: Arc<watch::Sender<ConnectionState>>,
}

impl ConnectionStatus {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::Connecting);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, state: ConnectionState) {
        self.tx.send_if_modified(|current| {
            let changed = *current != state;
            *current = state;
            changed
        });
    }

    pub fn get(&self) -> ConnectionState {
        *self.tx.borrow()
    }
}

#[derive(Debug, Default)]
pub struct ConnectionIndicator {
    phase: usize,
    error: bool,
}

impl ConnectionIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, state: ConnectionState) {
        self.error = state == ConnectionState::Error;
    }

    pub fn glyph(&self) -> &'static str {
        if self.error {
            ERROR_GLYPH
        } else {
            SPINNER[self.phase]
        }
    }

    /// Advance one phase and redraw.
    pub fn tick(&mut self, screen: &mut dyn ScreenDriver) -> io::Result<()> {
        if !self.error {
            self.phase = (self.phase + 1) % SPINNER.len();
        }
        screen.set_color(PenColor::White)?;
        screen.write_at(CONNECTION_STATUS_ROW, CONNECTION_STATUS_COL, self.glyph())
    }
}
