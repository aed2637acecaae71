//! Listener failures.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Failure to open or keep serving the HTTP listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot listen on {address}: {source}")]
    BindError {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Hint pointing at the setting most likely to fix a bind failure.
    pub fn suggestion(&self) -> Option<&'static str> {
        let Self::BindError { source, address } = self else {
            return None;
        };

        let hint = match source.kind() {
            io::ErrorKind::AddrInUse => "another process holds this port; pick a free one with PORT",
            io::ErrorKind::PermissionDenied if address.port() < 1024 => {
                "ports below 1024 need elevated privileges; use PORT=3000 or similar"
            }
            io::ErrorKind::AddrNotAvailable => "HOST is not an address of this machine",
            _ => "check HOST, PORT and local firewall rules",
        };
        Some(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind_error(address: &str, kind: io::ErrorKind) -> anyhow::Result<ServerError> {
        Ok(ServerError::BindError {
            address: address.parse()?,
            source: io::Error::from(kind),
        })
    }

    #[test]
    fn address_in_use_points_at_port() -> anyhow::Result<()> {
        let error = bind_error("127.0.0.1:3000", io::ErrorKind::AddrInUse)?;
        assert!(error.to_string().starts_with("cannot listen on 127.0.0.1:3000"));
        assert!(error.suggestion().is_some_and(|hint| hint.contains("PORT")));
        Ok(())
    }

    #[test]
    fn privileged_port_is_explained() -> anyhow::Result<()> {
        let error = bind_error("0.0.0.0:80", io::ErrorKind::PermissionDenied)?;
        assert!(error.suggestion().is_some_and(|hint| hint.contains("1024")));
        Ok(())
    }

    #[test]
    fn runtime_errors_have_no_hint() {
        let error = ServerError::Runtime(io::Error::other("reset"));
        assert!(error.suggestion().is_none());
    }
}
