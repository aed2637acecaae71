//! Process signals that stop the server.

use std::io;

use strum::IntoStaticStr;

use super::TRACING_TARGET_SHUTDOWN;

/// Signal that ended the serving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum ShutdownSignal {
    #[strum(serialize = "SIGINT")]
    Interrupt,
    #[strum(serialize = "SIGTERM")]
    Terminate,
}

/// Resolves with the first of Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other one still stops the server.
pub async fn shutdown_signal() -> ShutdownSignal {
    let signal = tokio::select! {
        () = interrupt() => ShutdownSignal::Interrupt,
        () = terminate() => ShutdownSignal::Terminate,
    };

    let name: &'static str = signal.into();
    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal = name,
        "Shutdown signal received"
    );

    signal
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        install_failed("SIGINT", &error);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            install_failed("SIGTERM", &error);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

fn install_failed(signal: &'static str, error: &io::Error) {
    tracing::error!(
        target: TRACING_TARGET_SHUTDOWN,
        signal,
        error = %error,
        "Failed to install signal handler"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names() {
        let interrupt: &'static str = ShutdownSignal::Interrupt.into();
        let terminate: &'static str = ShutdownSignal::Terminate.into();
        assert_eq!(interrupt, "SIGINT");
        assert_eq!(terminate, "SIGTERM");
    }
}
