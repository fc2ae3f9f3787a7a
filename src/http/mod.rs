//! HTTP/1.1 message framing over a byte stream.
//!
//! # Architecture
//!
//! - **`headers`**: Case-insensitive header table and its line parser
//! - **`request`**: Parsed request types (`Method`, `RequestLine`, `Request`)
//! - **`parser`**: Incremental request state machine and the read loop driving it
//! - **`buffer`**: Growable read buffer with a consume operation
//! - **`response`**: Status codes, default headers and whole-response values
//! - **`writer`**: Ordered response writer (status line, headers, body)
//! - **`connection`**: Per-connection state machine
//! - **`error`**: Parse error taxonomy
//!
//! # Request State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │    Init     │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ CRLF-terminated request line
//!               ▼
//!        ┌─────────────┐
//!        │   Headers   │ ← One header line per CRLF
//!        └──────┬──────┘
//!               │ Blank line
//!               ▼
//!        ┌─────────────┐
//!        │    Body     │ ← Up to Content-Length bytes
//!        └──────┬──────┘
//!               │ Body complete
//!               ▼
//!        ┌─────────────┐
//!        │    Done     │
//!        └─────────────┘
//! ```
//!
//! Any malformed input moves the parser to `Error`, from every state.
//!
//! # Example
//!
//! ```ignore
//! use tcphttp::http::parser::read_request;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!
//!     loop {
//!         let (mut socket, _addr) = listener.accept().await?;
//!         let req = read_request(&mut socket, 1024).await?;
//!         println!("{} {}", req.method(), req.target());
//!     }
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod error;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
