//! Local listener and per-connection forwarding.
//!
//! A tunnel serves from a TCP listener bound to an ephemeral loopback port.
//! Each accepted connection gets its own `direct-tcpip` channel (RFC 4254)
//! over the shared SSH session, and bytes are relayed in both directions
//! until either side closes. Failures are contained: a connection whose
//! channel cannot be opened is dropped on its own, and the listener keeps
//! accepting.

use std::net::SocketAddr;
use std::sync::Arc;

use russh::client;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::tunnel::error::TunnelError;
use crate::tunnel::session::TunnelClientHandler;

/// The authenticated session, shared by every relay task.
pub(crate) type SharedSession = Arc<Mutex<client::Handle<TunnelClientHandler>>>;

/// Bind the loopback listener and start serving the tunnel.
///
/// Returns the bound address as soon as the listener is active; from that
/// point the accept loop runs on a spawned task for the rest of the process
/// lifetime. Each accepted connection is forwarded to
/// `target_host:target_port` as seen from the SSH host, with the accepted
/// socket's peer address as the channel originator.
pub(crate) async fn serve(
    session: SharedSession,
    target_host: String,
    target_port: u16,
) -> Result<SocketAddr, TunnelError> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let local_addr = listener.local_addr()?;

    tokio::spawn(async move {
        debug!("tunnel listening on {}", local_addr);

        loop {
            match listener.accept().await {
                Ok((socket, peer)) => {
                    debug!("accepted connection from {}", peer);

                    let session = session.clone();
                    let target_host = target_host.clone();

                    tokio::spawn(async move {
                        if let Err(e) =
                            relay_connection(session, socket, peer, &target_host, target_port)
                                .await
                        {
                            // Scoped to this connection; the listener and the
                            // session keep serving.
                            debug!(
                                "forward to {}:{} for {} ended: {}",
                                target_host, target_port, peer, e
                            );
                        }
                    });
                }
                Err(e) => {
                    error!("accept failed on {}: {}", local_addr, e);
                    break;
                }
            }
        }
    });

    Ok(local_addr)
}

/// Forward one accepted connection over its own SSH channel.
///
/// Opens a `direct-tcpip` channel to the target, then relays bytes both ways
/// until either side finishes. An error from `channel_open` drops the local
/// socket with nothing written to it.
async fn relay_connection(
    session: SharedSession,
    socket: TcpStream,
    peer: SocketAddr,
    target_host: &str,
    target_port: u16,
) -> Result<(), russh::Error> {
    // The lock is held only for the channel open; relaying multiplexes over
    // the session without it.
    let guard = session.lock().await;
    let channel = guard
        .channel_open_direct_tcpip(
            target_host,
            u32::from(target_port),
            peer.ip().to_string(),
            u32::from(peer.port()),
        )
        .await?;
    drop(guard);

    let (mut local_read, mut local_write) = tokio::io::split(socket);
    let (mut remote_read, mut remote_write) = tokio::io::split(channel.into_stream());

    let outbound = tokio::io::copy(&mut local_read, &mut remote_write);
    let inbound = tokio::io::copy(&mut remote_read, &mut local_write);

    // Whichever direction finishes first ends the pairing; the other copy is
    // dropped mid-flight and both write halves are shut down below so no
    // half-open direction leaks.
    tokio::select! {
        result = outbound => {
            if let Err(e) = result {
                debug!("local to remote copy for {} ended: {}", peer, e);
            }
        }
        result = inbound => {
            if let Err(e) = result {
                debug!("remote to local copy for {} ended: {}", peer, e);
            }
        }
    }

    let _ = local_write.shutdown().await;
    let _ = remote_write.shutdown().await;

    debug!("connection from {} closed", peer);
    Ok(())
}
