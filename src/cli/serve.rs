//! Serve command implementation

use crate::api;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind host, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut server = config.server.clone();
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }

        api::serve(&server, config.backtest.clone()).await
    }
}
