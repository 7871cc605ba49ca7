// Connection handling module
// Serves one accepted TCP connection on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with keep-alive through the request router
/// 3. Caps the connection lifetime when `timeout` is set
pub fn spawn_connection(
    stream: TcpStream,
    remote_addr: SocketAddr,
    state: Arc<AppState>,
    timeout: Option<Duration>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&state), remote_addr)
        });

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);
        let conn = builder.serve_connection(io, service);

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, conn).await {
                Ok(result) => result,
                Err(_) => {
                    logger::log_warning(&format!(
                        "Connection from {remote_addr} timed out after {} seconds",
                        limit.as_secs()
                    ));
                    return;
                }
            },
            None => conn.await,
        };

        if let Err(err) = result {
            logger::log_connection_error(&err);
        }
    });
}
