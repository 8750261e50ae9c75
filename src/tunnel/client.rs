//! SSH session establishment for the tunnel.
//!
//! One attempt, settled exactly once: connect to the SSH host under the
//! configured timeout, then authenticate with the single credential selected
//! from the request. Nothing here retries — a tunnel either opens on the
//! first attempt or the caller gets the error.

use std::sync::Arc;
use std::time::Duration;

use russh::client;
use tracing::debug;

use crate::tunnel::auth::select_strategy;
use crate::tunnel::config::{
    KEEPALIVE_INTERVAL_SECS, KEEPALIVE_MAX, resolve_compression, resolve_connect_timeout,
};
use crate::tunnel::error::TunnelError;
use crate::tunnel::session::TunnelClientHandler;
use crate::tunnel::types::TunnelRequest;

/// Build the russh client configuration for a tunnel session.
///
/// The session backs a long-lived listener, so no inactivity timeout is set;
/// keepalive probes detect a dead transport instead. Compression preference
/// follows the `compress` flag (ZLIB first if enabled, NONE otherwise).
pub(crate) fn build_client_config(compress: bool) -> Arc<client::Config> {
    let compression = if compress {
        (&[russh::compression::ZLIB, russh::compression::NONE][..]).into()
    } else {
        (&[russh::compression::NONE][..]).into()
    };

    let preferred = russh::Preferred {
        compression,
        ..Default::default()
    };

    Arc::new(client::Config {
        inactivity_timeout: None,
        keepalive_interval: Some(Duration::from_secs(KEEPALIVE_INTERVAL_SECS)),
        keepalive_max: KEEPALIVE_MAX,
        preferred,
        ..Default::default()
    })
}

/// Connect to the SSH host named by `request` and authenticate.
///
/// Credential selection happens before any I/O, so an unusable request fails
/// without touching the network. The connect attempt is bounded by the
/// resolved `SSH_CONNECT_TIMEOUT`.
pub(crate) async fn connect_and_authenticate(
    request: &TunnelRequest,
) -> Result<client::Handle<TunnelClientHandler>, TunnelError> {
    let method = request.auth_method()?;

    let timeout = Duration::from_secs(resolve_connect_timeout(None));
    let config = build_client_config(resolve_compression(None));

    let connect_future = client::connect(
        config,
        (request.ssh_host.as_str(), request.ssh_port),
        TunnelClientHandler,
    );

    let mut handle = tokio::time::timeout(timeout, connect_future)
        .await
        .map_err(|_| TunnelError::ConnectTimeout {
            host: request.ssh_host.clone(),
            port: request.ssh_port,
            timeout,
        })?
        .map_err(|e| TunnelError::Connect {
            host: request.ssh_host.clone(),
            port: request.ssh_port,
            source: e,
        })?;

    let strategy = select_strategy(method);
    debug!(
        "authenticating as {} via {} strategy",
        request.ssh_user,
        strategy.name()
    );

    let accepted = strategy.authenticate(&mut handle, &request.ssh_user).await?;
    if !accepted {
        return Err(TunnelError::Auth {
            user: request.ssh_user.clone(),
            reason: format!("{} credential rejected by server", strategy.name()),
        });
    }

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_has_no_inactivity_timeout() {
        let config = build_client_config(true);
        assert_eq!(config.inactivity_timeout, None);
    }

    #[test]
    fn test_config_keepalive_settings() {
        let config = build_client_config(true);
        assert_eq!(
            config.keepalive_interval,
            Some(Duration::from_secs(KEEPALIVE_INTERVAL_SECS))
        );
        assert_eq!(config.keepalive_max, KEEPALIVE_MAX);
    }

    #[test]
    fn test_compression_preference_never_empty() {
        let with = build_client_config(true);
        let without = build_client_config(false);
        assert!(!with.preferred.compression.is_empty());
        assert!(!without.preferred.compression.is_empty());
    }
}
