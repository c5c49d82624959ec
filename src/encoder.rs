use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use huffman_text::files::compress_file;

#[derive(Parser)]
#[command(name = "encode")]
#[command(version, about = "Compress a text file into a digit payload and a code key", long_about = None)]
struct Cli {
    /// Text file to compress
    input: PathBuf,

    /// Directory for the payload and key (default: next to the input)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print entropy, average code length and size ratio
    #[arg(long)]
    stats: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let (compressed, names) = match compress_file(&cli.input, cli.out_dir.as_deref()) {
        Ok(res) => res,
        Err(e) => {
            error!("Failed to compress {}: {}", cli.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    info!("Payload written to {}", names.payload().display());
    info!("Key written to {}", names.key().display());

    println!(
        "Encoded {} ({} symbols) -> {} ({} digits), key {}",
        cli.input.display(),
        compressed.stats.symbols,
        names.payload().display(),
        compressed.stats.payload_digits,
        names.key().display()
    );

    if cli.stats {
        let stats = compressed.stats;
        println!(
            "Distinct symbols: {}\n\
             Entropy:          {:.4} bits/symbol\n\
             Average code:     {:.4} digits/symbol\n\
             Ratio:            {:.2}% (vs 8 bits/symbol)",
            stats.distinct_symbols,
            stats.entropy,
            stats.average_code_length,
            stats.ratio()
        );
    }

    ExitCode::SUCCESS
}
