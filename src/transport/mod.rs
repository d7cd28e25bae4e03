//! Transports that carry JSON-RPC traffic between a client and the protocol engine
//!
//! Exactly one transport runs per process. Each one hands inbound messages to
//! [`crate::mcp::server`] and writes the responses back over its own channel.

use std::{io, net::SocketAddr};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{DEFAULT_HTTP_PORT, DEFAULT_SSE_PORT};
use crate::AppState;

pub mod http;
pub mod stdio;

pub use http::HttpTransport;
pub use stdio::StdioTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stdio,
    Sse,
    StreamableHttp,
}

impl TransportKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::StreamableHttp => "streamable_http",
        }
    }

    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Stdio => None,
            Self::Sse => Some(DEFAULT_SSE_PORT),
            Self::StreamableHttp => Some(DEFAULT_HTTP_PORT),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("transport i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[async_trait]
pub trait Transport: Send {
    fn kind(&self) -> TransportKind;

    /// Local port for network transports.
    fn port(&self) -> Option<u16> {
        None
    }

    /// Runs until the peer goes away or the transport fails.
    async fn serve(self: Box<Self>, state: AppState) -> Result<(), TransportError>;
}
