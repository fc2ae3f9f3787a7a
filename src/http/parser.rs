use tokio::io::AsyncRead;

use crate::http::buffer::ReadBuffer;
use crate::http::error::ParseError;
use crate::http::headers::{Headers, find_crlf};
use crate::http::request::{Method, Request, RequestLine};

const CRLF_LEN: usize = 2;

/// Where the parser is within the request.
///
/// States only move forward; `Done` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Init,
    Headers,
    Body,
    Done,
    Error,
}

/// Outcome of one state transition.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Consumed bytes and moved to the next state.
    Advance { consumed: usize, next: ParseState },
    /// Consumed what it could; more bytes are needed to go further.
    Pause { consumed: usize },
}

/// Incremental HTTP/1.1 request parser.
///
/// Feed it the unconsumed bytes received so far with [`parse`](Self::parse);
/// it returns how many it consumed, and the caller drops that prefix before
/// the next call. Bytes may arrive in any granularity, including one at a
/// time or split across a CRLF.
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Init,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Runs the state machine over `buf` until it needs more bytes.
    ///
    /// Returns the number of bytes consumed. A return of `0` with no error
    /// means the request is incomplete. Any error moves the parser to
    /// [`ParseState::Error`].
    pub fn parse(&mut self, buf: &[u8]) -> Result<usize, ParseError> {
        let mut consumed = 0;

        loop {
            let step = match self.step(&buf[consumed..]) {
                Ok(step) => step,
                Err(e) => {
                    self.state = ParseState::Error;
                    return Err(e);
                }
            };

            match step {
                Step::Advance { consumed: n, next } => {
                    consumed += n;
                    self.state = next;
                }
                Step::Pause { consumed: n } => return Ok(consumed + n),
            }
        }
    }

    fn step(&mut self, buf: &[u8]) -> Result<Step, ParseError> {
        match self.state {
            ParseState::Init => match parse_request_line(buf)? {
                Some((line, n)) => {
                    self.request_line = Some(line);
                    Ok(Step::Advance { consumed: n, next: ParseState::Headers })
                }
                None => Ok(Step::Pause { consumed: 0 }),
            },
            ParseState::Headers => {
                let (n, done) = self.headers.parse(buf)?;
                if done {
                    Ok(Step::Advance { consumed: n, next: ParseState::Body })
                } else {
                    Ok(Step::Pause { consumed: n })
                }
            }
            ParseState::Body => self.step_body(buf),
            ParseState::Done | ParseState::Error => Ok(Step::Pause { consumed: 0 }),
        }
    }

    fn step_body(&mut self, buf: &[u8]) -> Result<Step, ParseError> {
        let Some(declared) = self.declared_length()? else {
            // Without Content-Length the body is whatever arrived with the
            // headers; the connection serves a single request.
            self.body.extend_from_slice(buf);
            return Ok(Step::Advance { consumed: buf.len(), next: ParseState::Done });
        };

        let remaining = declared - self.body.len();
        if buf.len() > remaining {
            return Err(ParseError::BodyOverflow { declared });
        }

        self.body.extend_from_slice(buf);
        if self.body.len() == declared {
            Ok(Step::Advance { consumed: buf.len(), next: ParseState::Done })
        } else {
            Ok(Step::Pause { consumed: buf.len() })
        }
    }

    fn declared_length(&self) -> Result<Option<usize>, ParseError> {
        self.headers
            .get("Content-Length")
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .map_err(|_| ParseError::InvalidContentLength(v.to_string()))
            })
            .transpose()
    }

    /// Finishes parsing, treating the input as ended.
    ///
    /// A done parser yields its request. A request cut short after its
    /// request line and without a Content-Length is accepted as complete;
    /// one still missing its request line or declared body bytes is an
    /// error, even when the stream ended before the header section did.
    pub fn finish(self) -> Result<Request, ParseError> {
        match self.state {
            ParseState::Done => {}
            ParseState::Init => return Err(ParseError::IncompleteRequestLine),
            ParseState::Headers | ParseState::Body => {
                if let Some(declared) = self.declared_length()? {
                    if declared > self.body.len() {
                        return Err(ParseError::IncompleteBody {
                            declared,
                            received: self.body.len(),
                        });
                    }
                }
            }
            ParseState::Error => return Err(ParseError::Poisoned),
        }

        let request_line = self.request_line.ok_or(ParseError::IncompleteRequestLine)?;

        Ok(Request {
            request_line,
            headers: self.headers,
            body: self.body,
        })
    }
}

/// Parses `METHOD SP target SP HTTP/x.y CRLF`.
///
/// Returns `None` while no CRLF has arrived; otherwise the line and the
/// number of bytes it occupied, terminator included.
pub fn parse_request_line(buf: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(buf) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&buf[..idx])
        .map_err(|_| ParseError::InvalidRequestLine(String::from_utf8_lossy(&buf[..idx]).into_owned()))?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequestLine(line.to_string()));
    };

    let method = Method::parse(method)?;

    if target.is_empty() {
        return Err(ParseError::InvalidRequestLine(line.to_string()));
    }

    let version = version
        .strip_prefix("HTTP/")
        .filter(|v| is_version_number(v))
        .ok_or_else(|| ParseError::InvalidVersion(version.to_string()))?;

    let request_line = RequestLine {
        method,
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((request_line, idx + CRLF_LEN)))
}

fn is_version_number(v: &str) -> bool {
    match v.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Reads and parses one request from `reader`.
///
/// Reads into a growable buffer, runs the parser over the filled portion,
/// drops what it consumed, and repeats until the request is done or the
/// stream ends. A stream that ends without delivering a single byte is
/// [`ParseError::NoRequest`].
pub async fn read_request<R>(reader: &mut R, initial_capacity: usize) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut parser = RequestParser::new();
    let mut buf = ReadBuffer::with_capacity(initial_capacity);
    let mut received = 0;

    while !parser.is_done() {
        let n = buf.fill_from(reader).await?;
        if n == 0 {
            break;
        }
        received += n;

        let consumed = parser.parse(buf.filled())?;
        buf.consume(consumed);
    }

    if received == 0 {
        return Err(ParseError::NoRequest);
    }
    parser.finish()
}
