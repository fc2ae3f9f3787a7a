use thiserror::Error;

/// Broad class of a [`ParseError`], for callers that decide by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request line, header line or header name.
    Format,
    /// Body or Content-Length outside what the message declares.
    ProtocolLimit,
    /// The peer closed the stream before a complete request arrived.
    UnexpectedEof,
    /// Reading from the transport failed.
    Transport,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("invalid protocol version: {0:?}")]
    InvalidVersion(String),

    #[error("malformed header line")]
    InvalidHeaderLine,

    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    #[error("body exceeds declared Content-Length of {declared} bytes")]
    BodyOverflow { declared: usize },

    #[error("connection closed before any request bytes arrived")]
    NoRequest,

    #[error("connection closed before the request line was complete")]
    IncompleteRequestLine,

    #[error("connection closed after {received} of {declared} body bytes")]
    IncompleteBody { declared: usize, received: usize },

    #[error("parser already failed on earlier input")]
    Poisoned,

    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidRequestLine(_)
            | ParseError::InvalidMethod(_)
            | ParseError::InvalidVersion(_)
            | ParseError::InvalidHeaderLine
            | ParseError::InvalidHeaderName(_)
            | ParseError::Poisoned => ErrorKind::Format,
            ParseError::InvalidContentLength(_) | ParseError::BodyOverflow { .. } => {
                ErrorKind::ProtocolLimit
            }
            ParseError::NoRequest
            | ParseError::IncompleteRequestLine
            | ParseError::IncompleteBody { .. } => ErrorKind::UnexpectedEof,
            ParseError::Io(_) => ErrorKind::Transport,
        }
    }
}
