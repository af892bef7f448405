use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use huffman::Compression;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "huff", version)]
#[command(about = "Static Huffman compression for text files.", long_about = None)]
struct Cli {
    /// Most verbose log level to print
    #[arg(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Round-trip files and report size, ratio and timing
    Stats {
        /// Files, or directories whose files are all measured
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Compress a text file into the JSON wire form
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress a JSON wire file back into text
    Decompress { input: PathBuf, output: PathBuf },
}

fn init_logger(level: Level) -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn expand(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            entries.retain(|p| p.is_file());
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn stats(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            return Ok(());
        }
    };

    let start = Instant::now();
    let compressed = match Compression::compress(&text) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping");
            return Ok(());
        }
    };
    let compress_time = start.elapsed();

    let start = Instant::now();
    let decompressed = compressed.decompress()?;
    let decompress_time = start.elapsed();

    println!("File: {}", path.display());
    println!(
        "Compression is lossless?: {}",
        if decompressed == text { "yes" } else { "NO" }
    );
    println!("Source size: {} bytes", text.len());
    println!(
        "Compressed size: {:.1} bytes",
        compressed.data_len() as f64 / 8.0
    );
    if let Some(ratio) = compressed.ratio(text.len()) {
        println!("Compression ratio: {ratio:.2}");
    }
    println!("Time to compress: {:.2}s", compress_time.as_secs_f64());
    println!("Time to decompress: {:.2}s", decompress_time.as_secs_f64());
    println!();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.log_level)?;

    match cli.command {
        Commands::Stats { paths } => {
            for path in expand(&paths)? {
                stats(&path)?;
            }
        }
        Commands::Compress { input, output } => {
            let text = fs::read_to_string(&input)?;
            let compressed = Compression::compress(&text)?;
            compressed.write_json(BufWriter::new(File::create(&output)?))?;
            info!(
                input = %input.display(),
                output = %output.display(),
                data_len = compressed.data_len(),
                "wrote compressed file"
            );
        }
        Commands::Decompress { input, output } => {
            let compressed = Compression::read_json(BufReader::new(File::open(&input)?))?;
            let text = compressed.decompress()?;
            fs::write(&output, &text)?;
            info!(
                input = %input.display(),
                output = %output.display(),
                bytes = text.len(),
                "wrote decompressed file"
            );
        }
    }

    Ok(())
}
