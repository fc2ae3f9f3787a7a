//! tcphttp - HTTP/1.1 from raw TCP
//!
//! Incremental request parsing, ordered response writing, and a small
//! one-request-per-connection server built on them.

pub mod config;
pub mod http;
pub mod server;
