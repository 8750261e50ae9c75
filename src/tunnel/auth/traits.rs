//! Authentication strategy trait definition.

use async_trait::async_trait;
use russh::client;

use crate::tunnel::error::TunnelError;
use crate::tunnel::session::TunnelClientHandler;

/// One way of proving identity to the SSH server.
///
/// Implementations must be thread-safe (`Send + Sync`) because the strategy
/// runs on the multi-threaded runtime.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Attempt to authenticate with the SSH server.
    ///
    /// Returns `Ok(true)` when the server accepts the credential, `Ok(false)`
    /// when it rejects it, and `Err` when the attempt itself fails (transport
    /// error, undecodable key).
    async fn authenticate(
        &self,
        handle: &mut client::Handle<TunnelClientHandler>,
        username: &str,
    ) -> Result<bool, TunnelError>;

    /// Name of this strategy, for logging.
    fn name(&self) -> &'static str;
}
