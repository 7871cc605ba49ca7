// Server module entry
// Binds the listening socket and runs the accept loop until shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::Result;
use crate::logger;

pub use listener::create_listener;
pub use signal::shutdown_signal;

/// A bound dashboard server
///
/// The listening socket is the only long-lived resource; it is released
/// when `run_until` returns.
pub struct DashboardServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: Arc<AppState>,
    connection_timeout: Option<Duration>,
}

impl DashboardServer {
    /// Validate `config` and bind its listen address
    ///
    /// Port 0 binds an ephemeral port; read it back with `local_addr`.
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self> {
        config.validate()?;
        let listener = create_listener(config.get_socket_addr()?)?;
        let local_addr = listener.local_addr()?;
        let connection_timeout = match config.server.connection_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            listener,
            local_addr,
            state: Arc::new(AppState::new(config)),
            connection_timeout,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Connections already accepted keep running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            connection::spawn_connection(
                                stream,
                                peer_addr,
                                Arc::clone(&self.state),
                                self.connection_timeout,
                            );
                        }
                        Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                    }
                }
                () = &mut shutdown => break,
            }
        }

        drop(self.listener);
        logger::log_shutdown(&self.local_addr);
    }
}
