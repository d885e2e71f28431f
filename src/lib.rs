//! httpfs - a tiny HTTP/1.0 file server
//!
//! Lists, serves and stores the files of one directory over a hand-written
//! subset of HTTP/1.0.

pub mod config;
pub mod http;
pub mod server;
pub mod store;
