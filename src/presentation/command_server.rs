// Command server - One remote client at a time over the line protocol
use crate::application::connection_indicator::{ConnectionState, ConnectionStatus};
use crate::application::event_log::EventLog;
use crate::application::sample_feed::SampleReader;
use crate::application::transport::{Connection, Listener, TransportError};
use crate::presentation::protocol::{self, Command, PROMPT, WELCOME};
use std::future::Future;
use std::time::Duration;

/// How the server loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The client sent `Shutdown`.
    ShutdownRequested,
    /// The client went away and the single reconnect attempt failed.
    Disconnected,
    /// No client could be accepted, even on the second try.
    AcceptFailed,
}

enum SessionState {
    Listening {
        retried: bool,
    },
    Connected {
        conn: Box<dyn Connection>,
        peer: String,
        reconnected: bool,
    },
    Idle {
        conn: Box<dyn Connection>,
        peer: String,
    },
    Handling {
        conn: Box<dyn Connection>,
        peer: String,
        command: Command,
    },
    Reconnecting {
        error: TransportError,
    },
    Closed(ServeOutcome),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Listening { .. } => "Listening",
            SessionState::Connected { .. } => "Connected",
            SessionState::Idle { .. } => "Idle",
            SessionState::Handling { .. } => "Handling",
            SessionState::Reconnecting { .. } => "Reconnecting",
            SessionState::Closed(_) => "Closed",
        }
    }
}

pub struct CommandServer<L: Listener> {
    listener: L,
    samples: SampleReader,
    events: EventLog,
    status: ConnectionStatus,
}

impl<L: Listener> CommandServer<L> {
    pub fn new(
        listener: L,
        samples: SampleReader,
        events: EventLog,
        status: ConnectionStatus,
    ) -> Self {
        Self {
            listener,
            samples,
            events,
            status,
        }
    }

    /// Drive the session state machine until it closes.
    pub async fn serve(mut self) -> ServeOutcome {
        let mut state = SessionState::Listening { retried: false };
        loop {
            if let SessionState::Closed(outcome) = state {
                tracing::info!("Command server closed: {:?}", outcome);
                return outcome;
            }
            let from = state.name();
            state = self.step(state).await;
            tracing::debug!("Session {} -> {}", from, state.name());
        }
    }

    async fn step(&mut self, state: SessionState) -> SessionState {
        match state {
            // A failed first accept gets the same single retry as a break
            SessionState::Listening { retried } => {
                self.events.log("Waiting for connection");
                match self.listener.accept().await {
                    Ok((conn, peer)) => SessionState::Connected {
                        conn,
                        peer,
                        reconnected: false,
                    },
                    Err(e) if !retried => {
                        tracing::warn!("Accept failed, retrying once: {}", e);
                        self.events.log(e.to_string());
                        SessionState::Listening { retried: true }
                    }
                    Err(e) => {
                        self.events.log(e.to_string());
                        self.status.set(ConnectionState::Error);
                        SessionState::Closed(ServeOutcome::AcceptFailed)
                    }
                }
            }

            SessionState::Connected {
                mut conn,
                peer,
                reconnected,
            } => {
                if reconnected {
                    self.events.log(format!("Reconnection Success with {}", peer));
                } else {
                    self.events.log(format!("Connection Success with {}", peer));
                }
                self.status.set(ConnectionState::Connecting);

                let local = conn.local_addr();
                match greet(conn.as_mut(), &peer, &local).await {
                    Ok(()) => SessionState::Idle { conn, peer },
                    Err(error) => SessionState::Reconnecting { error },
                }
            }

            SessionState::Idle { mut conn, peer } => {
                match prompt_and_read(conn.as_mut()).await {
                    Ok(Some(line)) => match Command::parse(&line) {
                        Some(command) => SessionState::Handling {
                            conn,
                            peer,
                            command,
                        },
                        None => {
                            tracing::debug!("Ignoring unrecognized input {:?} from {}", line, peer);
                            SessionState::Idle { conn, peer }
                        }
                    },
                    Ok(None) => SessionState::Reconnecting {
                        error: TransportError::Closed,
                    },
                    Err(error) => SessionState::Reconnecting { error },
                }
            }

            SessionState::Handling {
                mut conn,
                peer,
                command,
            } => {
                let result = match command {
                    Command::Ping => {
                        self.events.log(format!("Ping request from {}", protocol::host_of(&peer)));
                        let host = conn.local_addr();
                        conn.write_line(&protocol::pong_line(protocol::host_of(&host))).await
                    }
                    Command::Poll => {
                        self.events.log(format!("Poll request from {}", protocol::host_of(&peer)));
                        let active = self.samples.current();
                        write_lines(conn.as_mut(), &protocol::poll_lines(&active.snapshot)).await
                    }
                    Command::Shutdown => {
                        self.events.log(format!("Shutdown commanded from {}", peer));
                        if let Err(e) = conn.close().await {
                            tracing::debug!("Close after shutdown failed: {}", e);
                        }
                        return SessionState::Closed(ServeOutcome::ShutdownRequested);
                    }
                };

                match result {
                    Ok(()) => SessionState::Idle { conn, peer },
                    Err(error) => SessionState::Reconnecting { error },
                }
            }

            // One accept per break; success resumes, failure closes
            SessionState::Reconnecting { error } => {
                self.events.log(error.to_string());
                self.events.log("Attempting to reconnect");
                match self.listener.accept().await {
                    Ok((conn, peer)) => SessionState::Connected {
                        conn,
                        peer,
                        reconnected: true,
                    },
                    Err(e) => {
                        tracing::warn!("Reconnect failed: {}", e);
                        self.events.log("Client disconnected");
                        self.status.set(ConnectionState::Error);
                        SessionState::Closed(ServeOutcome::Disconnected)
                    }
                }
            }

            closed @ SessionState::Closed(_) => closed,
        }
    }
}

async fn greet(conn: &mut dyn Connection, peer: &str, local: &str) -> Result<(), TransportError> {
    conn.write_line(WELCOME).await?;
    conn.write_line(&protocol::connection_line(peer, local)).await
}

async fn prompt_and_read(conn: &mut dyn Connection) -> Result<Option<String>, TransportError> {
    for line in PROMPT {
        conn.write_line(line).await?;
    }
    conn.read_line().await
}

async fn write_lines(conn: &mut dyn Connection, lines: &[String]) -> Result<(), TransportError> {
    for line in lines {
        conn.write_line(line).await?;
    }
    Ok(())
}

/// Bind, and on failure wait `retry_delay` and try exactly once more.
pub async fn bind_with_retry<L, F, Fut>(
    mut bind: F,
    addr: &str,
    retry_delay: Duration,
    events: &EventLog,
    status: &ConnectionStatus,
) -> Option<L>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<L, TransportError>>,
{
    let bound = match bind().await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            events.log(e.to_string());
            tokio::time::sleep(retry_delay).await;
            bind().await
        }
    };

    match bound {
        Ok(listener) => {
            events.log(format!("Server started; Listening for connections on {}", addr));
            Some(listener)
        }
        Err(e) => {
            tracing::error!("Command server failed to bind {} twice: {}", addr, e);
            events.log(e.to_string());
            events.log("ServerHost unable to start. Power cycle system and try again");
            status.set(ConnectionState::Error);
            None
        }
    }
}
