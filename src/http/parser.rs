use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::http::mirror::Mirror;
use crate::http::request::{Method, Request};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read the request line: {0}")]
    RequestLine(#[source] io::Error),
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unsupported request method: {0:?}")]
    UnsupportedMethod(String),
    #[error("failed to read a header line: {0}")]
    HeaderRead(#[source] io::Error),
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
}

/// Reads a request head from `reader`.
///
/// Consumes the request line and every header line up to and including the
/// blank `\r\n` terminator, then hands the reader back inside the `Request`
/// so the body can be read from where the head ended.
pub async fn parse_request<R>(mut reader: R, mirror: &mut Mirror) -> Result<Request<R>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = read_line(&mut reader)
        .await
        .map_err(ParseError::RequestLine)?;
    mirror.echo(&request_line).await;

    let (method, path, protocol) = parse_request_line(&request_line)?;

    let mut headers = HashMap::new();
    loop {
        let line = read_line(&mut reader)
            .await
            .map_err(ParseError::HeaderRead)?;
        mirror.echo(&line).await;

        if line == b"\r\n" {
            break;
        }

        let (name, value) = parse_header_line(&line).ok_or_else(|| {
            ParseError::MalformedHeader(String::from_utf8_lossy(&line).into_owned())
        })?;
        headers.insert(name.to_string(), String::from_utf8_lossy(value).into_owned());
    }

    Ok(Request {
        method,
        path,
        protocol,
        headers,
        body: reader,
    })
}

/// Splits a request line into method, path and protocol.
///
/// The line must hold exactly three whitespace-separated tokens. The path is
/// kept as the raw bytes the client sent, since it names a file on disk.
pub fn parse_request_line(line: &[u8]) -> Result<(Method, OsString, String), ParseError> {
    let parts: Vec<&[u8]> = line
        .split(|&b| is_space(b))
        .filter(|part| !part.is_empty())
        .collect();
    let [method, path, protocol] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine(
            String::from_utf8_lossy(line).into_owned(),
        ));
    };

    let method = std::str::from_utf8(method)
        .ok()
        .and_then(Method::from_str)
        .ok_or_else(|| {
            ParseError::UnsupportedMethod(String::from_utf8_lossy(method).into_owned())
        })?;

    Ok((
        method,
        OsStr::from_bytes(path).to_os_string(),
        String::from_utf8_lossy(protocol).into_owned(),
    ))
}

/// Matches one header line against `Name: value\r\n`.
///
/// The name is one or more of `A-Z a-z 0-9 _ -`, followed by exactly `": "`,
/// a non-empty value and the CRLF.
pub fn parse_header_line(line: &[u8]) -> Option<(&str, &[u8])> {
    let line = line.strip_suffix(b"\r\n")?;
    let colon = line.windows(2).position(|w| w == b": ")?;
    let (name, value) = (&line[..colon], &line[colon + 2..]);

    if name.is_empty() || value.is_empty() {
        return None;
    }
    if !name
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return None;
    }

    // ASCII-only by the check above.
    let name = std::str::from_utf8(name).ok()?;
    Some((name, value))
}

// Vertical tab counts as a separator too, unlike `u8::is_ascii_whitespace`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Reads up to and including the next `\n`, as raw bytes.
///
/// Stream end before a newline is an error, even when some bytes arrived.
async fn read_line<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;

    if n == 0 || buf.last() != Some(&b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended before end of line",
        ));
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_simple_get() {
        let req: &[u8] = b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request(req, &mut Mirror::disabled()).await.unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn header_line_grammar() {
        assert_eq!(parse_header_line(b"Host: h\r\n"), Some(("Host", &b"h"[..])));
        assert_eq!(
            parse_header_line(b"X_Y-9: a: b\r\n"),
            Some(("X_Y-9", &b"a: b"[..]))
        );
        assert_eq!(parse_header_line(b"Host:h\r\n"), None);
        assert_eq!(parse_header_line(b"Host: h\n"), None);
        assert_eq!(parse_header_line(b"Host: \r\n"), None);
        assert_eq!(parse_header_line(b": h\r\n"), None);
        assert_eq!(parse_header_line(b"Bad Name: h\r\n"), None);
        assert_eq!(parse_header_line(b"Bad:Name: h\r\n"), None);
    }

    #[test]
    fn request_line_keeps_raw_path_bytes() {
        let (method, path, protocol) =
            parse_request_line(b"GET /caf\xe9.txt HTTP/1.0\r\n").unwrap();

        assert_eq!(method, Method::GET);
        assert_eq!(path.as_bytes(), b"/caf\xe9.txt");
        assert_eq!(protocol, "HTTP/1.0");
    }

    #[test]
    fn vertical_tab_separates_tokens() {
        let (_, path, _) = parse_request_line(b"GET\x0b/a HTTP/1.0\r\n").unwrap();
        assert_eq!(path, "/a");
    }
}
