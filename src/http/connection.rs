use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::error::{ErrorKind, ParseError};
use crate::http::parser::read_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::{ResponseWriter, WriteState};
use crate::server::handler::Handler;

/// One accepted connection, serving exactly one request.
pub struct Connection<S, H> {
    stream: S,
    handler: Arc<H>,
    read_buffer_size: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Handling(Request),
    Rejecting(ParseError),
    Closed,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    H: Handler,
{
    pub fn new(stream: S, handler: Arc<H>, read_buffer_size: usize) -> Self {
        Self {
            stream,
            handler,
            read_buffer_size,
            state: ConnectionState::Reading,
        }
    }

    /// Reads a request, answers it, and closes the stream.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    match read_request(&mut self.stream, self.read_buffer_size).await {
                        Ok(req) => {
                            tracing::debug!(
                                method = %req.method(),
                                target = %req.target(),
                                body_len = req.body.len(),
                                "Request parsed"
                            );
                            self.state = ConnectionState::Handling(req);
                        }
                        Err(e) if e.kind() == ErrorKind::Transport => {
                            return Err(e).context("failed to read request");
                        }
                        Err(ParseError::NoRequest) => {
                            tracing::debug!("Peer closed without sending a request");
                        }
                        Err(e) => {
                            self.state = ConnectionState::Rejecting(e);
                        }
                    }
                }

                ConnectionState::Rejecting(e) => {
                    tracing::warn!(error = %e, kind = ?e.kind(), "Rejecting malformed request");

                    let mut writer = ResponseWriter::new(&mut self.stream);
                    writer
                        .write_response(&Response::bad_request(e.to_string()))
                        .await
                        .context("failed to write 400 response")?;
                }

                ConnectionState::Handling(req) => {
                    let mut writer = ResponseWriter::new(&mut self.stream);

                    if let Err(handler_err) = self.handler.handle(&mut writer, &req).await {
                        if writer.state() == WriteState::StatusLine {
                            writer
                                .write_response(&handler_err.to_response())
                                .await
                                .context("failed to write handler error response")?;
                        } else {
                            tracing::warn!(
                                error = %handler_err,
                                "Handler failed after starting its response"
                            );
                        }
                    }

                    writer.flush().await.context("failed to flush response")?;
                }

                ConnectionState::Closed => {
                    self.stream.shutdown().await.ok();
                    break;
                }
            }
        }

        Ok(())
    }
}
