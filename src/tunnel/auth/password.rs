//! Password-based SSH authentication.

use async_trait::async_trait;
use russh::client;

use crate::tunnel::error::TunnelError;
use crate::tunnel::session::TunnelClientHandler;

use super::traits::AuthStrategy;

/// Password authentication strategy.
pub struct PasswordAuth {
    password: String,
}

impl PasswordAuth {
    /// Create a new password authentication strategy.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

#[async_trait]
impl AuthStrategy for PasswordAuth {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<TunnelClientHandler>,
        username: &str,
    ) -> Result<bool, TunnelError> {
        let result = handle
            .authenticate_password(username, &self.password)
            .await
            .map_err(|e| TunnelError::Auth {
                user: username.to_string(),
                reason: format!("password authentication failed: {}", e),
            })?;

        Ok(result.success())
    }

    fn name(&self) -> &'static str {
        "password"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_auth_name() {
        let auth = PasswordAuth::new("secret");
        assert_eq!(auth.name(), "password");
    }

    #[test]
    fn test_password_auth_stores_credential() {
        let auth = PasswordAuth::new(String::from("my-password"));
        assert_eq!(auth.password, "my-password");
    }
}
