use std::collections::HashMap;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;
use tokio::io::AsyncWrite;

use crate::http::mirror::Mirror;
use crate::http::status::StatusCode;
use crate::http::writer::{ResponseWriter, serialize_head};
use crate::store;

/// Where the response body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// No body, `Content-Length: 0`
    Empty,
    /// A literal in-memory body, sent byte for byte
    Text(Vec<u8>),
    /// The contents of a file, streamed from disk
    File(PathBuf),
}

/// A response bound to the connection it will be written to.
///
/// Created right after the request parses, adjusted by the handler, then
/// consumed by exactly one `send` or `send_status` call.
pub struct Response<W> {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    writer: ResponseWriter<W>,
}

impl<W> Response<W>
where
    W: AsyncWrite + Unpin,
{
    /// Creates a 200 response with `Connection: close` and a `Date` header.
    pub fn new(sink: W, mirror: Mirror) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Connection".to_string(), "close".to_string());
        headers.insert("Date".to_string(), http_date(OffsetDateTime::now_utc()));

        Self {
            status: StatusCode::Ok,
            headers,
            writer: ResponseWriter::new(sink, mirror),
        }
    }

    /// Sends `body` with `status`.
    ///
    /// For `Body::File`, a missing file turns into a 400 naming the path and
    /// any other open or stat failure into a bodiless 500.
    pub async fn send(self, status: StatusCode, body: Body) -> io::Result<()> {
        match body {
            Body::Empty => self.send_text(status, b"").await,
            Body::Text(data) => self.send_text(status, &data).await,
            Body::File(path) => self.send_file(status, &path).await,
        }
    }

    /// Sends `status` with no body.
    pub async fn send_status(self, status: StatusCode) -> io::Result<()> {
        self.send_text(status, b"").await
    }

    async fn send_text(mut self, status: StatusCode, data: &[u8]) -> io::Result<()> {
        self.status = status;
        self.set_content_length(data.len() as u64);

        let mut buf = serialize_head(self.status, &self.headers);
        buf.extend_from_slice(data);

        self.writer.write_all(&buf).await?;
        self.writer.flush().await
    }

    async fn send_file(mut self, status: StatusCode, path: &Path) -> io::Result<()> {
        let mut file = match store::open_file(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut msg = b"Could not find file ".to_vec();
                msg.extend_from_slice(path.as_os_str().as_bytes());
                return self.send_text(StatusCode::BadRequest, &msg).await;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open file");
                return self.send_status(StatusCode::InternalServerError).await;
            }
        };

        let len = match file.metadata().await {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to stat file");
                return self.send_status(StatusCode::InternalServerError).await;
            }
        };

        self.status = status;
        self.set_content_length(len);

        let head = serialize_head(self.status, &self.headers);
        self.writer.write_all(&head).await?;

        // The head is on the wire; a failure from here on can only be reported
        // to the caller, not to the client.
        let sent = self.writer.copy_from(&mut file).await?;
        if sent != len {
            tracing::warn!(path = %path.display(), expected = len, sent, "file size changed while streaming");
        }

        self.writer.flush().await
    }

    fn set_content_length(&mut self, len: u64) {
        self.headers
            .insert("Content-Length".to_string(), len.to_string());
    }
}

/// Formats `at` in the Unix `date` layout, e.g. `Mon Jan  2 15:04:05 UTC 2006`.
pub fn http_date(at: OffsetDateTime) -> String {
    let layout = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] UTC [year]"
    );
    at.format(layout).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to format Date header");
        String::new()
    })
}
