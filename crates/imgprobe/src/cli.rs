use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "imgprobe",
    version = env!("CARGO_PKG_VERSION"),
    about = "Collects images from Imgur at random or supplied identifiers",
    long_about = None
)]
pub struct Cli {
    /// Delay between tries, in seconds [default: 1]
    #[arg(short, long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Identifiers to probe, in order
    #[arg(short, long = "input", value_name = "ID", num_args = 1..)]
    pub inputs: Vec<String>,

    /// Files with one identifier per line, probed after --input
    #[arg(short, long = "file", value_name = "PATH", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Do not launch an OS notification on hit
    #[arg(long)]
    pub no_notify: bool,

    /// Do not print progress to standard output
    #[arg(long)]
    pub no_stdout: bool,

    /// Directory hits are written to [default: build/images]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
