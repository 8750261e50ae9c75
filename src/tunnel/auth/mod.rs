//! Authentication strategies for the tunnel's SSH session.
//!
//! Each strategy implements [`AuthStrategy`] for one way of proving identity.
//! Exactly one strategy runs per tunnel: [`select_strategy`] maps the
//! credential chosen from the request to its implementation. There is no
//! fallback between strategies — a rejected key does not retry with the
//! password.

mod key;
mod password;
mod traits;

pub use key::KeyAuth;
pub use password::PasswordAuth;
pub use traits::AuthStrategy;

use crate::tunnel::types::AuthMethod;

/// Instantiate the strategy for the selected credential.
pub(crate) fn select_strategy(method: AuthMethod) -> Box<dyn AuthStrategy> {
    match method {
        AuthMethod::Password(password) => Box::new(PasswordAuth::new(password)),
        AuthMethod::Key { data, passphrase } => Box::new(KeyAuth::new(data, passphrase)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_method_selects_password_strategy() {
        let strategy = select_strategy(AuthMethod::Password("secret".to_string()));
        assert_eq!(strategy.name(), "password");
    }

    #[test]
    fn test_key_method_selects_key_strategy() {
        let strategy = select_strategy(AuthMethod::Key {
            data: "key material".to_string(),
            passphrase: None,
        });
        assert_eq!(strategy.name(), "key");
    }
}
