use std::os::unix::ffi::OsStrExt;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

use crate::config::Config;
use crate::http::mirror::Mirror;
use crate::http::parser::parse_request;
use crate::http::request::{Method, Request};
use crate::http::response::{Body, Response};
use crate::http::status::StatusCode;
use crate::store;

/// One accepted connection: a request side and a response side.
///
/// `run` serves exactly one request. Both halves are dropped when it returns,
/// which closes the socket whatever the outcome.
pub struct Connection<R, W> {
    reader: R,
    writer: W,
    cfg: Arc<Config>,
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, cfg: Arc<Config>) -> Self {
        Self {
            reader,
            writer,
            cfg,
        }
    }

    /// Parses the request, performs the file operation and answers.
    ///
    /// Errors returned here mean the connection is dropped without a
    /// response: a malformed request, an unreadable root listing, a bad
    /// Content-Length, a failed upload, or a failed write to the client.
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            reader,
            writer,
            cfg,
        } = self;

        let mut mirror = Mirror::from_config(&cfg);
        let req = parse_request(BufReader::new(reader), &mut mirror)
            .await
            .context("failed to parse request")?;

        tracing::debug!(
            method = %req.method,
            path = ?req.path,
            protocol = %req.protocol,
            "Request received"
        );

        let res = Response::new(writer, Mirror::from_config(&cfg));

        match req.method {
            Method::GET => handle_get(&cfg, &req, res).await,
            Method::POST => handle_post(&cfg, req, res, mirror).await,
        }
    }
}

async fn handle_get<B, W>(cfg: &Config, req: &Request<B>, res: Response<W>) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if req.path == "/" {
        let names = store::list_files(&cfg.root)
            .await
            .with_context(|| format!("failed to list {}", cfg.root.display()))?;

        let mut listing = Vec::new();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                listing.extend_from_slice(b"\r\n");
            }
            listing.extend_from_slice(name.as_bytes());
        }
        listing.extend_from_slice(b"\r\n");

        res.send(StatusCode::Ok, Body::Text(listing))
            .await
            .context("failed to send directory listing")?;
        return Ok(());
    }

    let path = store::resolve(&cfg.root, &req.path);
    res.send(StatusCode::Ok, Body::File(path))
        .await
        .with_context(|| format!("failed to send {}", req.path.to_string_lossy()))?;

    Ok(())
}

async fn handle_post<B, W>(
    cfg: &Config,
    req: Request<B>,
    res: Response<W>,
    mut mirror: Mirror,
) -> anyhow::Result<()>
where
    B: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if req.path == "/" {
        res.send(StatusCode::BadRequest, Body::Text(b"need to pick filename".to_vec()))
            .await?;
        return Ok(());
    }

    let len = match req.content_length() {
        None => {
            res.send(
                StatusCode::BadRequest,
                Body::Text(b"Content-Length header is required".to_vec()),
            )
            .await?;
            return Ok(());
        }
        Some(parsed) => parsed.context("invalid Content-Length")?,
    };

    let path = store::resolve(&cfg.root, &req.path);
    let mut body = req.body;
    store::write_file(&path, &mut body, len, &mut mirror)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %req.path.to_string_lossy(), bytes = len, "File uploaded");

    res.send_status(StatusCode::Ok).await?;
    Ok(())
}
