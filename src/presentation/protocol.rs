// Line protocol spoken to the remote client
use crate::domain::subject::Snapshot;

pub const WELCOME: &str = "Welcome to the Augmented Warfighter Awareness System";

/// Sent before every read.
pub const PROMPT: [&str; 6] = ["", "Valid Commands:", "Ping", "Poll", "Shutdown", "Command:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Poll,
    Shutdown,
}

impl Command {
    /// Case-insensitive, surrounding whitespace ignored. Unknown input is None.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.eq_ignore_ascii_case("ping") {
            Some(Command::Ping)
        } else if word.eq_ignore_ascii_case("poll") {
            Some(Command::Poll)
        } else if word.eq_ignore_ascii_case("shutdown") {
            Some(Command::Shutdown)
        } else {
            None
        }
    }
}

pub fn connection_line(peer: &str, local: &str) -> String {
    format!("Connection from {} to {}", peer, local)
}

pub fn pong_line(host: &str) -> String {
    format!("{}: Pong", host)
}

/// One line per subject: `[id, ammo, water, [hr, spo2, temp, resp], weapon]`
pub fn poll_lines(snapshot: &Snapshot) -> Vec<String> {
    snapshot.subjects.iter().map(|s| s.to_string()).collect()
}

/// Host part of an `ip:port` address.
pub fn host_of(addr: &str) -> &str {
    addr.rsplit_once(':').map(|(host, _)| host).unwrap_or(addr)
}
