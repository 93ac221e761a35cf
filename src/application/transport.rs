// Transport traits for the command server's line protocol
use async_trait::async_trait;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),
    #[error("connection lost: {0}")]
    Io(#[from] io::Error),
    #[error("connection closed by peer")]
    Closed,
}

/// Bound socket waiting for clients.
#[async_trait]
pub trait Listener: Send {
    /// Wait for one client. Returns the connection and the peer address.
    async fn accept(&mut self) -> Result<(Box<dyn Connection>, String), TransportError>;

    fn local_addr(&self) -> String;
}

/// One client session speaking newline-terminated text.
#[async_trait]
pub trait Connection: Send {
    /// Next line without its terminator. `Ok(None)` means the peer hung up.
    ///
    /// Undecodable bytes and overlong lines come back as text that parses as
    /// no command; they never break the session.
    async fn read_line(&mut self) -> Result<Option<String>, TransportError>;

    async fn write_line(&mut self, line: &str) -> Result<(), TransportError>;

    async fn close(&mut self) -> Result<(), TransportError>;

    /// Address of this end of the session, as the client reached it.
    fn local_addr(&self) -> String;
}
