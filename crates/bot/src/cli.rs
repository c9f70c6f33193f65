use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "hostwatch", version, about = "Host and container monitoring bot")]
pub struct Opts {
    #[arg(long, help = "Path to YAML config file (built-in defaults if omitted)")]
    pub config: Option<PathBuf>,
}
