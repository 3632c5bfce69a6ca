use crate::framer::JsonFramer;
use crate::{Error, Result};
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Host the overseer server is always reached on.
pub const HOST: &str = "localhost";

/// A connection that receives one JSON value in response to each command.
///
/// The stream is owned for the life of the session and released when the
/// session is closed or dropped, whichever comes first.
#[derive(Debug)]
pub struct JsonSocket<S = TcpStream> {
    stream: Option<S>,
    read_timeout: Option<Duration>,
}

/// Parses a command line port argument.
pub fn parse_port(arg: &str) -> Result<u16> {
    arg.trim()
        .parse::<u16>()
        .map_err(|_| Error::InvalidPort(arg.to_string()))
}

impl JsonSocket<TcpStream> {
    pub async fn connect(port: u16) -> Result<Self> {
        let addr = format!("{}:{}", HOST, port);
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| Error::Connect {
                addr: addr.clone(),
                source,
            })?;
        info!("Connected to overseer at {}", addr);
        Ok(Self::new(stream))
    }
}

impl<S> JsonSocket<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
            read_timeout: None,
        }
    }

    /// Limits how long any single read may block. Unlimited by default.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    fn stream(&mut self) -> Result<&mut S> {
        self.stream.as_mut().ok_or(Error::ConnectionClosed)
    }

    /// Sends a command and returns the JSON response.
    pub async fn command(&mut self, command: &str) -> Result<Value> {
        self.send(command).await?;
        self.receive().await
    }

    /// Sends a command without waiting for any response.
    pub async fn send(&mut self, command: &str) -> Result<()> {
        let stream = self.stream()?;
        stream.write_all(format!("{}\n", command).as_bytes()).await?;
        stream.flush().await?;
        debug!("Sent command: {}", command);
        Ok(())
    }

    /// Reads a single JSON value, one byte at a time, until bracket nesting
    /// returns to zero.
    pub async fn receive(&mut self) -> Result<Value> {
        let read_timeout = self.read_timeout;
        let stream = self.stream()?;
        let mut framer = JsonFramer::new();
        let mut byte = [0u8; 1];

        let frame = loop {
            let bytes_read = match read_timeout {
                Some(limit) => timeout(limit, stream.read(&mut byte))
                    .await
                    .map_err(|_| Error::Timeout(limit))??,
                None => stream.read(&mut byte).await?,
            };
            if bytes_read == 0 {
                debug!(
                    "Connection closed by peer (mid-value: {})",
                    framer.in_progress()
                );
                return Err(Error::ConnectionClosed);
            }
            if let Some(frame) = framer.push(byte[0]) {
                break frame;
            }
        };

        let text = String::from_utf8(frame)?;
        debug!("Received response: {}", text);
        Ok(serde_json::from_str(&text)?)
    }

    /// Closes the connection. Safe to call more than once.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("Error shutting down connection: {}", e);
            }
            debug!("Connection closed");
        }
    }
}

impl<S> Drop for JsonSocket<S> {
    fn drop(&mut self) {
        if self.stream.is_some() {
            debug!("Releasing connection that was not closed explicitly");
        }
    }
}
