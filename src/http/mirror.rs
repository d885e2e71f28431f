//! Verbose-mode byte tee.
//!
//! When enabled, every raw byte the server reads from a request head or
//! upload, and every byte it writes in a response, is echoed to a diagnostic
//! stream (stdout in the binary).

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::Config;

type Sink = Box<dyn AsyncWrite + Send + Unpin>;

pub struct Mirror {
    out: Option<Sink>,
}

impl Mirror {
    pub fn disabled() -> Self {
        Self { out: None }
    }

    pub fn new(out: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self { out: Some(Box::new(out)) }
    }

    /// Mirrors to stdout when the configuration asks for verbose output.
    pub fn from_config(cfg: &Config) -> Self {
        if cfg.verbose {
            Self::new(tokio::io::stdout())
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Echoes `bytes`. Failures are logged and otherwise ignored.
    pub async fn echo(&mut self, bytes: &[u8]) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let res = async {
            out.write_all(bytes).await?;
            out.flush().await
        }
        .await;

        if let Err(e) = res {
            tracing::warn!(error = %e, "failed to mirror bytes, disabling mirror");
            self.out = None;
        }
    }
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
