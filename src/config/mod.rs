pub mod toml_config;

pub use toml_config::ClientConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "webmention")]
#[command(about = "Discover Webmention endpoints and send Webmentions")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML client configuration")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Override the HTTP timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the Webmention endpoint declared by a page
    Discover { url: String },

    /// Send a Webmention to a known endpoint
    Send {
        #[arg(long)]
        endpoint: String,
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
    },

    /// Discover the target's endpoint, then send a Webmention to it
    Notify {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// File configuration (or defaults) with command line overrides applied.
    pub fn client_config(&self) -> crate::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }
        Ok(config)
    }
}
