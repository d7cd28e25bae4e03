use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::sse::SessionStore;
use crate::transport::{Transport, TransportError, TransportKind};
use crate::{build_app, build_sse_app, AppState};

/// Serves either the SSE pair or the stateless `/mcp` endpoint on a bound listener.
pub struct HttpTransport {
    kind: TransportKind,
    listener: TcpListener,
    keep_alive: Duration,
}

impl HttpTransport {
    pub async fn bind(kind: TransportKind, config: &Config) -> Result<Self, TransportError> {
        let addr = config.bind_socket().map_err(|err| {
            TransportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, err))
        })?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;

        info!(bind_addr = %addr, transport = kind.name(), "listener bound");

        Ok(Self {
            kind,
            listener,
            keep_alive: config.sse_keep_alive,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn port(&self) -> Option<u16> {
        self.listener.local_addr().ok().map(|addr| addr.port())
    }

    async fn serve(self: Box<Self>, state: AppState) -> Result<(), TransportError> {
        let app = match self.kind {
            TransportKind::Sse => build_sse_app(state, SessionStore::default(), self.keep_alive),
            _ => build_app(state),
        };

        axum::serve(self.listener, app.into_make_service()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn loopback_config() -> Config {
        Config {
            api_token: None,
            bind_addr: "127.0.0.1".to_string(),
            bind_port: 0,
            sse_keep_alive: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let transport = HttpTransport::bind(TransportKind::StreamableHttp, &loopback_config())
            .await
            .expect("bind loopback");

        assert_eq!(transport.kind(), TransportKind::StreamableHttp);
        assert!(transport.port().is_some_and(|port| port != 0));
    }

    #[tokio::test]
    async fn port_in_use_is_bind_error() {
        let first = HttpTransport::bind(TransportKind::Sse, &loopback_config())
            .await
            .expect("bind loopback");
        let mut config = loopback_config();
        config.bind_port = first.port().expect("bound port");

        let err = HttpTransport::bind(TransportKind::Sse, &config)
            .await
            .err()
            .expect("second bind fails");

        assert!(matches!(err, TransportError::Bind { .. }));
    }
}
