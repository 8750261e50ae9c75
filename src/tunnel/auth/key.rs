//! Private key SSH authentication.
//!
//! The key is carried in memory as decoded text (OpenSSH or PEM form), not as
//! a file path — callers that keep keys on disk read them before building the
//! request.

use std::sync::Arc;

use async_trait::async_trait;
use russh::{client, keys};
use tracing::debug;

use crate::tunnel::error::TunnelError;
use crate::tunnel::session::TunnelClientHandler;

use super::traits::AuthStrategy;

/// Private key authentication strategy.
pub struct KeyAuth {
    key_data: String,
    passphrase: Option<String>,
}

impl KeyAuth {
    /// Create a new key authentication strategy from in-memory key material.
    pub fn new(key_data: impl Into<String>, passphrase: Option<String>) -> Self {
        Self {
            key_data: key_data.into(),
            passphrase,
        }
    }
}

#[async_trait]
impl AuthStrategy for KeyAuth {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<TunnelClientHandler>,
        username: &str,
    ) -> Result<bool, TunnelError> {
        let key_pair = keys::decode_secret_key(&self.key_data, self.passphrase.as_deref())
            .map_err(|e| TunnelError::Auth {
                user: username.to_string(),
                reason: format!("failed to decode private key: {}", e),
            })?;

        // For RSA keys, pick the strongest hash the server supports.
        let hash_alg = handle
            .best_supported_rsa_hash()
            .await
            .ok()
            .flatten()
            .flatten();
        debug!("using RSA hash algorithm for key auth: {:?}", hash_alg);

        let key_with_hash = keys::PrivateKeyWithHashAlg::new(Arc::new(key_pair), hash_alg);

        let result = handle
            .authenticate_publickey(username, key_with_hash)
            .await
            .map_err(|e| TunnelError::Auth {
                user: username.to_string(),
                reason: format!("key authentication failed: {}", e),
            })?;

        Ok(result.success())
    }

    fn name(&self) -> &'static str {
        "key"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_auth_name() {
        let auth = KeyAuth::new("key material", None);
        assert_eq!(auth.name(), "key");
    }

    #[test]
    fn test_key_auth_stores_passphrase() {
        let auth = KeyAuth::new("key material", Some("hunter2".to_string()));
        assert_eq!(auth.passphrase.as_deref(), Some("hunter2"));
    }
}
