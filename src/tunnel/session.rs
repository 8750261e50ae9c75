//! russh client handler for the tunnel's SSH session.
//!
//! The handle produced for this handler is not `Clone`; it is wrapped in
//! `Arc<Mutex<_>>` once authenticated so every per-connection relay task can
//! open its own channel over the one session.

use russh::{client, keys};

/// Client handler that accepts all host keys.
///
/// Equivalent to `StrictHostKeyChecking=no` in OpenSSH configuration. A
/// deployment that needs man-in-the-middle protection should verify the key
/// against a known_hosts file here instead.
pub struct TunnelClientHandler;

impl client::Handler for TunnelClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
