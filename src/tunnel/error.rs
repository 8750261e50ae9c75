//! Failure taxonomy for tunnel establishment.
//!
//! Every variant rejects an `open_tunnel` call; the call settles exactly once.
//! Failures scoped to a single forwarded connection are never reported through
//! this type — they close that one connection and leave the tunnel serving.

use std::time::Duration;

use thiserror::Error;

/// Errors that can reject a tunnel-open attempt.
#[derive(Debug, Error)]
pub enum TunnelError {
    /// The request itself is unusable, detected before any I/O.
    #[error("invalid tunnel configuration: {0}")]
    Config(String),

    /// The SSH host could not be reached, or the transport failed before the
    /// session became ready.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: russh::Error,
    },

    /// The connect attempt did not complete within the configured timeout.
    #[error("connection to {host}:{port} timed out after {timeout:?}")]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout: Duration,
    },

    /// The server rejected the selected credential, or authentication errored.
    #[error("authentication failed for {user}: {reason}")]
    Auth { user: String, reason: String },

    /// Binding the loopback listener failed after the session became ready.
    #[error("failed to bind local listener: {0}")]
    Bind(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TunnelError::Config("no credential supplied".to_string());
        assert_eq!(
            err.to_string(),
            "invalid tunnel configuration: no credential supplied"
        );
    }

    #[test]
    fn test_auth_error_display_names_user() {
        let err = TunnelError::Auth {
            user: "deploy".to_string(),
            reason: "password credential rejected by server".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("deploy"));
        assert!(message.contains("rejected"));
    }

    #[test]
    fn test_connect_timeout_display_names_endpoint() {
        let err = TunnelError::ConnectTimeout {
            host: "bastion.internal".to_string(),
            port: 22,
            timeout: Duration::from_secs(30),
        };
        let message = err.to_string();
        assert!(message.contains("bastion.internal:22"));
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_bind_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = TunnelError::from(io_err);
        assert!(matches!(err, TunnelError::Bind(_)));
    }
}
