// TCP implementation of the line transport
use crate::application::transport::{Connection, Listener, TransportError};
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

pub struct TcpTransport {
    listener: TcpListener,
    local: String,
}

impl TcpTransport {
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr).await.map_err(|source| TransportError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.to_string());

        Ok(Self { listener, local })
    }
}

#[async_trait]
impl Listener for TcpTransport {
    async fn accept(&mut self) -> Result<(Box<dyn Connection>, String), TransportError> {
        let (stream, peer) = self.listener.accept().await.map_err(TransportError::Accept)?;
        tracing::debug!("Accepted TCP client {}", peer);
        Ok((Box::new(TcpConnection::new(stream)), peer.to_string()))
    }

    fn local_addr(&self) -> String {
        self.local.clone()
    }
}

/// Longest command line kept; anything longer reads as an empty line.
pub const MAX_LINE_BYTES: usize = 1024;

pub struct TcpConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    local: String,
}

impl TcpConnection {
    pub fn new(stream: TcpStream) -> Self {
        let local = stream
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_default();
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer: write,
            local,
        }
    }

    // Skip to just past the next newline without keeping the bytes
    async fn discard_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let (used, found) = {
                let buf = self.reader.fill_buf().await?;
                if buf.is_empty() {
                    return Ok(());
                }
                match buf.iter().position(|b| *b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (buf.len(), false),
                }
            };
            self.reader.consume(used);
            if found {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl Connection for TcpConnection {
    async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut buf = Vec::new();
        let read = (&mut self.reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            return Ok(None);
        }

        if buf.last() != Some(&b'\n') && buf.len() >= MAX_LINE_BYTES {
            tracing::debug!("Discarding line longer than {} bytes", MAX_LINE_BYTES);
            self.discard_rest_of_line().await?;
            return Ok(Some(String::new()));
        }

        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.writer.shutdown().await?;
        Ok(())
    }

    fn local_addr(&self) -> String {
        self.local.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_round_trip_over_loopback() {
        let mut transport = TcpTransport::bind("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr();

        let client = tokio::spawn(async move {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (read, mut write) = stream.into_split();
            write.write_all(b"Poll\r\n").await.unwrap();
            let mut reader = BufReader::new(read);
            let mut reply = String::new();
            reader.read_line(&mut reply).await.unwrap();
            reply
        });

        let (mut conn, peer) = transport.accept().await.unwrap();
        assert!(peer.starts_with("127.0.0.1:"));
        assert_eq!(conn.read_line().await.unwrap().as_deref(), Some("Poll"));
        conn.write_line("Pong").await.unwrap();

        assert_eq!(client.await.unwrap(), "Pong\r\n");
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let first = TcpTransport::bind("127.0.0.1:0").await.unwrap();
        let taken = first.local_addr();

        match TcpTransport::bind(&taken).await {
            Err(TransportError::Bind { addr, .. }) => assert_eq!(addr, taken),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("second bind on {} should fail", taken),
        }
    }

    async fn accept_after_sending(bytes: Vec<u8>) -> (Box<dyn Connection>, String) {
        let mut transport = TcpTransport::bind("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr();
        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(&bytes).await.unwrap();
        });

        let (conn, _) = transport.accept().await.unwrap();
        client.await.unwrap();
        (conn, transport.local_addr())
    }

    #[tokio::test]
    async fn test_invalid_utf8_reads_as_text_and_session_continues() {
        let (mut conn, _) = accept_after_sending(b"P\xffng\r\nPing\r\n".to_vec()).await;

        assert_eq!(conn.read_line().await.unwrap().as_deref(), Some("P\u{FFFD}ng"));
        assert_eq!(conn.read_line().await.unwrap().as_deref(), Some("Ping"));
        assert!(conn.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overlong_line_is_dropped_whole() {
        let mut bytes = vec![b'A'; MAX_LINE_BYTES * 5];
        bytes.extend_from_slice(b"\r\nPing\r\n");
        let (mut conn, _) = accept_after_sending(bytes).await;

        assert_eq!(conn.read_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(conn.read_line().await.unwrap().as_deref(), Some("Ping"));
    }

    #[tokio::test]
    async fn test_line_just_under_the_cap_is_kept() {
        let mut bytes = vec![b'A'; MAX_LINE_BYTES - 2];
        bytes.extend_from_slice(b"\r\n");
        let (mut conn, _) = accept_after_sending(bytes).await;

        let line = conn.read_line().await.unwrap().unwrap();
        assert_eq!(line.len(), MAX_LINE_BYTES - 2);
    }

    #[tokio::test]
    async fn test_connection_reports_the_address_the_client_reached() {
        let (conn, listening) = accept_after_sending(Vec::new()).await;
        assert_eq!(conn.local_addr(), listening);
        assert!(conn.local_addr().starts_with("127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_peer_hangup_reads_none() {
        let mut transport = TcpTransport::bind("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr();
        let client = tokio::spawn(async move { drop(TcpStream::connect(addr).await.unwrap()) });

        let (mut conn, _) = transport.accept().await.unwrap();
        client.await.unwrap();
        assert!(conn.read_line().await.unwrap().is_none());
    }
}
