//! Process entry shared by every binary
//!
//! Loads configuration, builds the registry, starts the chosen transport and
//! waits for it to finish or for a termination signal.

use std::{future::Future, io, process::ExitCode};

use thiserror::Error;
use tracing::{error, info};

use crate::config::{Config, ConfigError};
use crate::transport::{HttpTransport, StdioTransport, Transport, TransportError, TransportKind};
use crate::{build_registry, logging, AppState};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),
}

/// Synchronous entry for the binaries.
///
/// The runtime is shut down in the background so a stdin read parked on a
/// blocking thread cannot keep the process alive after a signal.
pub fn main(kind: TransportKind) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(kind));
    runtime.shutdown_background();
    code
}

pub async fn run(kind: TransportKind) -> ExitCode {
    logging::init_logging();

    match serve(kind).await {
        Ok(()) => {
            info!(transport = kind.name(), "server stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(transport = kind.name(), error = %err, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn serve(kind: TransportKind) -> Result<(), StartupError> {
    let (transport, api_token): (Box<dyn Transport>, Option<String>) =
        match kind.default_port() {
            Some(default_port) => {
                let config = Config::from_env(default_port)?;
                let transport = HttpTransport::bind(kind, &config).await?;
                (Box::new(transport), config.api_token)
            }
            None => (Box::new(StdioTransport), None),
        };

    let state = AppState::new(api_token, build_registry());
    let shutdown = shutdown_signal().map_err(StartupError::Signal)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = transport.kind().name(),
        port = transport.port(),
        "server started"
    );

    tokio::select! {
        result = transport.serve(state) => result?,
        () = shutdown => info!("shutdown signal received"),
    }

    Ok(())
}

/// Handlers are registered before the future is returned, so a signal that
/// arrives right after startup is not lost.
#[cfg(unix)]
fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    Ok(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
}
