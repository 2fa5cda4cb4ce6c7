//! Serve command - expose the translator over HTTP.

use crate::config::PyjsConfig;
use clap::Args;

pub mod http;

pub use http::{TranspileRequest, TranspileResponse, build_app, run_http_server};

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config, default 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config, default 5000)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Run the serve command
pub fn run(args: ServeArgs, config: &PyjsConfig) -> i32 {
    let host = args.host.unwrap_or_else(|| config.host().to_string());
    let port = args.port.unwrap_or_else(|| config.port());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return 1;
        }
    };
    rt.block_on(run_http_server(&host, port, config.translate_options()))
}
