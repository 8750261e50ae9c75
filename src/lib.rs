//! Reach services that are only network-visible from behind an SSH host.
//!
//! [`TunnelManager::open_tunnel`] connects to an SSH server, authenticates
//! with a password or a private key, binds an ephemeral listener on the
//! loopback address, and forwards every connection accepted there to a
//! target endpoint reachable from the SSH host.
//!
//! ```no_run
//! use ssh_tunnel::{TunnelManager, TunnelRequest};
//!
//! # async fn example() -> Result<(), ssh_tunnel::TunnelError> {
//! let request = TunnelRequest {
//!     target_host: "127.0.0.1".to_string(),
//!     target_port: 6379,
//!     ssh_host: "bastion.example.com".to_string(),
//!     ssh_port: 22,
//!     ssh_user: "deploy".to_string(),
//!     ssh_password: Some("secret".to_string()),
//!     ssh_key: None,
//!     ssh_key_passphrase: None,
//! };
//!
//! let handle = TunnelManager::open_tunnel(request).await?;
//! // Connect to handle.host:handle.port as if it were the target service.
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]

mod tunnel;

pub use tunnel::{AuthMethod, TunnelError, TunnelHandle, TunnelManager, TunnelRequest};
