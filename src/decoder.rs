use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use huffman_text::files::decompress_files;

#[derive(Parser)]
#[command(name = "decode")]
#[command(version, about = "Restore text from a digit payload and its code key", long_about = None)]
struct Cli {
    /// Payload file written by `encode`
    payload: PathBuf,

    /// Key file written by `encode`
    key: PathBuf,

    /// Directory for the decompressed text (default: next to the payload)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("--- Start Decoding ---");
    match decompress_files(&cli.payload, &cli.key, cli.out_dir.as_deref()) {
        Ok(output) => {
            println!("Decoded {} -> {}", cli.payload.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to decode {}: {}", cli.payload.display(), e);
            ExitCode::FAILURE
        }
    }
}
