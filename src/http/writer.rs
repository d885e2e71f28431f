use std::collections::HashMap;
use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::mirror::Mirror;
use crate::http::status::StatusCode;

pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Chunk size used when streaming file or body bytes.
pub const BUFFER_SIZE: usize = 8192;

/// Renders the status line, the header block and the blank separator line.
pub fn serialize_head(status: StatusCode, headers: &HashMap<String, String>) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Output side of a connection: every byte goes to the sink and, when
/// verbose, to the mirror as well.
pub struct ResponseWriter<W> {
    sink: W,
    mirror: Mirror,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: W, mirror: Mirror) -> Self {
        Self { sink, mirror }
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes).await?;
        self.mirror.echo(bytes).await;
        Ok(())
    }

    /// Streams `reader` to the sink until EOF, one chunk at a time.
    pub async fn copy_from<R>(&mut self, reader: &mut R) -> io::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = BytesMut::with_capacity(BUFFER_SIZE);
        let mut total = 0;

        loop {
            buf.clear();
            let n = reader.read_buf(&mut buf).await?;
            if n == 0 {
                break;
            }

            self.write_all(&buf).await?;
            total += n as u64;
        }

        Ok(total)
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.sink.flush().await
    }
}
