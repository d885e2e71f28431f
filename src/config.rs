use std::path::PathBuf;

use clap::Parser;

/// Startup configuration, built once and shared read-only by every connection.
#[derive(Debug, Clone, Parser)]
#[command(name = "httpfs")]
#[command(about = "Serve, list and accept uploads of the files in one directory over HTTP/1.0")]
pub struct Config {
    /// Port number the server listens on
    #[arg(short, long, default_value_t = 8080, env = "HTTPFS_PORT")]
    pub port: u16,

    /// Interface the server binds to
    #[arg(long, default_value = "0.0.0.0", env = "HTTPFS_HOST")]
    pub host: String,

    /// Directory whose files are read and written
    #[arg(short = 'd', long = "dir", default_value = ".", env = "HTTPFS_DIR")]
    pub root: PathBuf,

    /// Echo raw request and response bytes to stdout
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn load() -> Self {
        Config::parse()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            root: PathBuf::from("."),
            verbose: false,
        }
    }
}
