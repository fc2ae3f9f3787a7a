use std::future::Future;

use thiserror::Error;
use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Failure outcome returned by a [`Handler`].
///
/// Rendered as a plain-text response with `message` as the body, provided
/// the handler had not started writing its own response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} {}", .status.as_u16(), .message)]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalServerError, message)
    }

    pub fn to_response(&self) -> Response {
        ResponseBuilder::new(self.status)
            .body(self.message.as_bytes())
            .build()
    }
}

/// Application code invoked once per parsed request.
///
/// Returning `Ok(())` means the handler wrote the response through `w`.
pub trait Handler: Send + Sync + 'static {
    fn handle<W>(
        &self,
        w: &mut ResponseWriter<W>,
        req: &Request,
    ) -> impl Future<Output = Result<(), HandlerError>> + Send
    where
        W: AsyncWrite + Unpin + Send;
}
