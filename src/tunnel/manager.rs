//! Tunnel orchestration: session, listener, forwarding.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::tunnel::client::connect_and_authenticate;
use crate::tunnel::error::TunnelError;
use crate::tunnel::forward;
use crate::tunnel::types::{LOOPBACK_HOST, TunnelHandle, TunnelRequest};

/// Orchestrates SSH session establishment, local listener setup, and
/// per-connection forwarding.
pub struct TunnelManager;

impl TunnelManager {
    /// Open the tunnel described by `request`.
    ///
    /// Settles exactly once: with the loopback endpoint to connect to, or
    /// with the error that prevented the tunnel from opening. One attempt is
    /// made; nothing is retried. The listener is bound only after the SSH
    /// session is authenticated, so a failed request never produces a
    /// half-open local port.
    ///
    /// Once open, the tunnel serves until the process exits — there is no
    /// close operation. A session failure after this call returns is not
    /// reported back through any channel; it surfaces as channel-open
    /// failures on subsequent connections, which are logged and close only
    /// the connection that hit them.
    pub async fn open_tunnel(request: TunnelRequest) -> Result<TunnelHandle, TunnelError> {
        let handle = connect_and_authenticate(&request).await?;
        info!(
            "ssh session to {}:{} ready",
            request.ssh_host, request.ssh_port
        );

        let session = Arc::new(Mutex::new(handle));
        let local_addr =
            forward::serve(session, request.target_host.clone(), request.target_port).await?;
        info!(
            "forwarding {} -> {}:{} (via {})",
            local_addr, request.target_host, request.target_port, request.ssh_host
        );

        Ok(TunnelHandle {
            host: LOOPBACK_HOST.to_string(),
            port: local_addr.port(),
        })
    }
}
