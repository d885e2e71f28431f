//! File system access for the served root.
//!
//! All files live flat under the root. Request paths are appended to the root
//! as raw bytes; nothing here normalises `..` or checks containment.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use bytes::BytesMut;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::http::mirror::Mirror;
use crate::http::writer::BUFFER_SIZE;

/// Joins the root and a request path by plain concatenation.
pub fn resolve(root: &Path, request_path: &OsStr) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push(request_path);
    PathBuf::from(joined)
}

/// Names of the root's immediate entries that are not directories, sorted
/// bytewise and left undecoded.
pub async fn list_files(root: &Path) -> io::Result<Vec<OsString>> {
    let mut entries = tokio::fs::read_dir(root).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            continue;
        }
        names.push(entry.file_name());
    }

    names.sort();
    Ok(names)
}

pub async fn open_file(path: &Path) -> io::Result<File> {
    File::open(path).await
}

/// Creates or truncates `path` and fills it with exactly `len` bytes from `reader`.
///
/// Bytes past `len` are left unread. Running out of input first is an error.
pub async fn write_file<R>(
    path: &Path,
    reader: &mut R,
    len: u64,
    mirror: &mut Mirror,
) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut file = File::create(path).await?;
    let mut limited = reader.take(len);
    let mut buf = BytesMut::with_capacity(BUFFER_SIZE);
    let mut total = 0u64;

    loop {
        buf.clear();
        let n = limited.read_buf(&mut buf).await?;
        if n == 0 {
            break;
        }

        file.write_all(&buf).await?;
        mirror.echo(&buf).await;
        total += n as u64;
    }

    file.flush().await?;

    if total < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short read: got {total} of {len} body bytes"),
        ));
    }

    Ok(total)
}
