use crate::protocol::{Command, HistoryReply, StatusReply};
use crate::session::JsonSocket;
use crate::Result;
use log::debug;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Everything the check prints, as decoded from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub status: StatusReply,
    pub history: HistoryReply,
}

pub struct OverseerClient<S = TcpStream> {
    socket: JsonSocket<S>,
}

impl OverseerClient<TcpStream> {
    pub async fn connect(port: u16, read_timeout: Option<Duration>) -> Result<Self> {
        let socket = JsonSocket::connect(port)
            .await?
            .with_read_timeout(read_timeout);
        Ok(Self::new(socket))
    }

    /// Connects, collects a snapshot and closes the connection, whether or not
    /// the exchange succeeded.
    pub async fn check(port: u16, read_timeout: Option<Duration>) -> Result<Snapshot> {
        let mut client = Self::connect(port, read_timeout).await?;
        let snapshot = client.snapshot().await;
        client.close().await;
        snapshot
    }
}

impl<S> OverseerClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(socket: JsonSocket<S>) -> Self {
        Self { socket }
    }

    pub async fn status(&mut self) -> Result<StatusReply> {
        let reply = self.socket.command(Command::Status.as_str()).await?;
        Ok(serde_json::from_value(reply)?)
    }

    pub async fn history(&mut self) -> Result<HistoryReply> {
        let reply = self.socket.command(Command::History.as_str()).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Asks the server to end the connection. Any reply is never read.
    pub async fn request_close(&mut self) -> Result<()> {
        self.socket.send(Command::Close.as_str()).await
    }

    pub async fn snapshot(&mut self) -> Result<Snapshot> {
        let status = self.status().await?;
        let history = self.history().await?;
        self.request_close().await?;
        debug!(
            "Collected status '{}' and history for {} commands",
            status.status,
            history.len()
        );
        Ok(Snapshot { status, history })
    }

    pub async fn close(&mut self) {
        self.socket.close().await;
    }
}
