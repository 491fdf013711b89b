use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "cspcollect")]
#[command(about = "Collection endpoint for browser CSP violation reports", version)]
pub struct Cli {
    /// Directory where accepted reports are stored. Validated for
    /// writability before the server starts.
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,
}
