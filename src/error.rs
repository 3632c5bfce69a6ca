use std::io;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid port number: '{0}'")]
    InvalidPort(String),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("connection error: {0}")]
    Io(#[from] io::Error),

    #[error("server closed the connection before a complete response was received")]
    ConnectionClosed,

    #[error("no response from server within {0:?}")]
    Timeout(Duration),

    #[error("response is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot interpret '{0}' as epoch milliseconds")]
    Format(String),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Decode,
    Format,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPort(_)
            | Error::Connect { .. }
            | Error::Io(_)
            | Error::ConnectionClosed
            | Error::Timeout(_) => ErrorKind::Connection,
            Error::Utf8(_) | Error::Decode(_) => ErrorKind::Decode,
            Error::Format(_) => ErrorKind::Format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::ConnectionClosed.kind(), ErrorKind::Connection);
        assert_eq!(Error::InvalidPort("x".into()).kind(), ErrorKind::Connection);
        assert_eq!(Error::Format("NONE".into()).kind(), ErrorKind::Format);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), ErrorKind::Decode);
    }
}
