pub mod client;
pub mod config;
pub mod error;
pub mod framer;
pub mod protocol;
pub mod report;
pub mod session;

pub use client::{OverseerClient, Snapshot};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use report::ReportFormatter;
pub use session::JsonSocket;

pub type Result<T, E = Error> = std::result::Result<T, E>;
