#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use dotenv::dotenv;
use tracing::info;

use ssh_tunnel::{TunnelManager, TunnelRequest};

fn required_env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{} must be set", name).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize logging with proper tracing default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .init();

    // A key file on disk becomes in-memory key material for the request.
    let ssh_key = match std::env::var("TUNNEL_SSH_KEY_FILE") {
        Ok(path) => Some(std::fs::read_to_string(path)?),
        Err(_) => None,
    };

    let request = TunnelRequest {
        target_host: required_env("TUNNEL_TARGET_HOST")?,
        target_port: required_env("TUNNEL_TARGET_PORT")?.parse()?,
        ssh_host: required_env("TUNNEL_SSH_HOST")?,
        ssh_port: std::env::var("TUNNEL_SSH_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(22),
        ssh_user: required_env("TUNNEL_SSH_USER")?,
        ssh_password: std::env::var("TUNNEL_SSH_PASSWORD").ok(),
        ssh_key,
        ssh_key_passphrase: std::env::var("TUNNEL_SSH_KEY_PASSPHRASE").ok(),
    };

    let handle = TunnelManager::open_tunnel(request).await?;
    println!("{}", serde_json::to_string(&handle)?);
    info!(
        "tunnel open on {}:{}, press ctrl-c to exit",
        handle.host, handle.port
    );

    tokio::signal::ctrl_c().await?;
    Ok(())
}
