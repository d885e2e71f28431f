//! HTTP/1.0 subset implementation.
//!
//! Only `GET` and `POST` are understood, every response closes the
//! connection, and there is no chunking, pipelining or keep-alive.
//!
//! # Architecture
//!
//! - **`status`**: The closed table of status codes and reason phrases
//! - **`request`**: Parsed request head plus the unread body reader
//! - **`parser`**: Reads a request head off a byte stream
//! - **`response`**: Response state and the `send` / `send_status` operations
//! - **`writer`**: Head serialisation and byte-level writes to the client
//! - **`mirror`**: Verbose-mode tee of raw bytes to stdout
//! - **`connection`**: Per-connection GET/POST dispatch
//!
//! # Connection Flow
//!
//! ```text
//!        ┌─────────────┐
//!        │   Parsing   │ ← Read request line and headers
//!        └──────┬──────┘
//!               │ Parse error → close, nothing sent
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatch       │ ← GET / lists, GET /x reads, POST /x writes
//!        └──────┬───────────┘
//!               │ Listing / upload failure → close, nothing sent
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Status line, headers, body or file
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use httpfs::config::Config;
//! use httpfs::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Arc::new(Config::default());
//!     let listener = TcpListener::bind(cfg.address()).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let cfg = cfg.clone();
//!         tokio::spawn(async move {
//!             let (reader, writer) = socket.into_split();
//!             if let Err(e) = Connection::new(reader, writer, cfg).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod status;
pub mod request;
pub mod parser;
pub mod mirror;
pub mod response;
pub mod writer;
pub mod connection;
