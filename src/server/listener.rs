use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::server::handler::Handler;

/// A running HTTP server.
///
/// The accept loop runs as a background task until [`Server::close`].
/// Closing stops new accepts only; connections already being served run to
/// completion.
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    accept_task: Option<JoinHandle<()>>,
}

impl Server {
    /// Binds the configured address and starts accepting connections.
    pub async fn serve<H: Handler>(cfg: &ServerConfig, handler: H) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        let closed = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(Notify::new());

        let accept_task = tokio::spawn(accept_loop(
            listener,
            Arc::new(handler),
            closed.clone(),
            shutdown.clone(),
            cfg.read_buffer_size,
        ));

        Ok(Self {
            local_addr,
            closed,
            shutdown,
            accept_task: Some(accept_task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stops accepting connections and releases the listener.
    ///
    /// Waits for the accept loop to exit. Calling it again is a no-op.
    pub async fn close(&mut self) -> anyhow::Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        self.shutdown.notify_one();

        if let Some(task) = self.accept_task.take() {
            task.await.context("accept loop panicked")?;
        }

        info!("Server on {} closed", self.local_addr);
        Ok(())
    }
}

async fn accept_loop<H: Handler>(
    listener: TcpListener,
    handler: Arc<H>,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    read_buffer_size: usize,
) {
    loop {
        let accepted = tokio::select! {
            biased;
            _ = shutdown.notified() => break,
            res = listener.accept() => res,
        };

        // `close` sets the flag before notifying. Anything accepted once the
        // flag is set is dropped, errors included.
        if closed.load(Ordering::Acquire) {
            break;
        }

        match accepted {
            Ok((socket, peer)) => {
                tracing::debug!(peer = %peer, "Accepted connection");

                let handler = handler.clone();
                tokio::spawn(async move {
                    let mut conn = Connection::new(socket, handler, read_buffer_size);
                    if let Err(e) = conn.run().await {
                        tracing::error!(peer = %peer, error = %e, "Connection error");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Accept error");
            }
        }
    }

    // The listener drops here, releasing the port.
}
