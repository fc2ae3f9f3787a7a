use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Which section of the response the writer accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    StatusLine,
    Headers,
    Body,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write {attempted:?} while in {current:?} state")]
    OutOfOrder {
        attempted: WriteState,
        current: WriteState,
    },

    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a response to a sink as status line, then headers, then body.
///
/// Each section is accepted only in its own state, and the state only moves
/// forward. A call out of order fails with [`WriteError::OutOfOrder`] and
/// writes nothing. The body may be written in several pieces.
pub struct ResponseWriter<W> {
    sink: W,
    state: WriteState,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: WriteState::StatusLine,
        }
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        self.ensure_state(WriteState::StatusLine)?;

        let line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.sink.write_all(line.as_bytes()).await?;

        self.state = WriteState::Headers;
        Ok(())
    }

    /// Writes every header followed by the blank line ending the section.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        self.ensure_state(WriteState::Headers)?;

        let mut buf = Vec::new();
        for (k, v) in headers.iter() {
            buf.extend_from_slice(k.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(v.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");
        self.sink.write_all(&buf).await?;

        self.state = WriteState::Body;
        Ok(())
    }

    /// Writes raw body bytes, returning how many were written.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        self.ensure_state(WriteState::Body)?;

        self.sink.write_all(body).await?;
        Ok(body.len())
    }

    /// Writes a whole response, driving all three sections in order.
    pub async fn write_response(&mut self, response: &Response) -> Result<(), WriteError> {
        self.write_status_line(response.status).await?;
        self.write_headers(&response.headers).await?;
        self.write_body(&response.body).await?;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), WriteError> {
        self.sink.flush().await?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn ensure_state(&self, attempted: WriteState) -> Result<(), WriteError> {
        if self.state != attempted {
            return Err(WriteError::OutOfOrder {
                attempted,
                current: self.state,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serializes_sections_in_order() {
        let mut writer = ResponseWriter::new(Vec::new());
        let mut headers = Headers::new();
        headers.set("Content-Length", "2");

        writer.write_status_line(StatusCode::Ok).await.unwrap();
        writer.write_headers(&headers).await.unwrap();
        assert_eq!(writer.write_body(b"hi").await.unwrap(), 2);

        assert_eq!(
            writer.into_inner(),
            b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nhi".to_vec()
        );
    }

    #[tokio::test]
    async fn out_of_order_writes_nothing() {
        let mut writer = ResponseWriter::new(Vec::new());

        let err = writer.write_body(b"early").await.unwrap_err();

        assert!(matches!(
            err,
            WriteError::OutOfOrder {
                attempted: WriteState::Body,
                current: WriteState::StatusLine
            }
        ));
        assert!(writer.get_ref().is_empty());
    }
}
