// Sun Oct 18 2026 - Alex

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use memory_signature::{
    config::{Config, ConfigOverrides, OutputFormat},
    pattern::{parse_hex_bytes, Signature},
    scan::{scan_file, ScanReport},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Find a byte signature inside a binary image", long_about = None)]
struct Args {
    #[arg(short, long)]
    file: PathBuf,

    /// IDA-style signature, e.g. "48 8B 05 ?? ?? ?? ?? 48 85 C0"
    #[arg(short, long, conflicts_with_all = ["bytes", "mask", "mask_bytes"])]
    pattern: Option<String>,

    /// Hex bytes for a masked signature, e.g. "48 8B 05 00"
    #[arg(long)]
    bytes: Option<String>,

    /// Character mask for --bytes, e.g. "xxx?"
    #[arg(long, requires = "bytes", conflicts_with = "mask_bytes")]
    mask: Option<String>,

    /// Hex byte mask for --bytes, e.g. "01 01 01 00"
    #[arg(long, requires = "bytes")]
    mask_bytes: Option<String>,

    /// Unknown marker for --mask
    #[arg(long)]
    unknown: Option<char>,

    /// Unknown value for --mask-bytes
    #[arg(long)]
    byte_unknown: Option<u8>,

    #[arg(long, value_parser = parse_address)]
    base: Option<u64>,

    #[arg(long)]
    format: Option<String>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "[!]".red(), e);
            std::process::exit(2);
        }
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> anyhow::Result<bool> {
    let config = load_config(&args)?;
    let signature = build_signature(&args, &config)?;

    if signature.is_empty() {
        bail!("signature is empty");
    }

    let start_time = Instant::now();
    let report = scan_file(&args.file, &signature, &config)
        .with_context(|| format!("failed to scan {}", args.file.display()))?;
    let elapsed = start_time.elapsed();

    match config.output_format {
        OutputFormat::Json => println!("{}", report.to_json(config.pretty_print)?),
        OutputFormat::Text => print_report(&report, elapsed.as_secs_f64()),
    }

    Ok(report.found())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let overrides = ConfigOverrides {
        mask_unknown: args.unknown,
        byte_mask_unknown: args.byte_unknown,
        output_format: args.format.as_deref().map(str::parse::<OutputFormat>).transpose()?,
        base_address: args.base,
    };

    Ok(config.apply(&overrides)?)
}

fn build_signature(args: &Args, config: &Config) -> anyhow::Result<Signature> {
    if let Some(pattern) = &args.pattern {
        return Ok(Signature::parse(pattern)?);
    }

    let Some(bytes) = &args.bytes else {
        bail!("either --pattern or --bytes with --mask or --mask-bytes is required");
    };
    let bytes = parse_hex_bytes(bytes)?;

    match (&args.mask, &args.mask_bytes) {
        (Some(mask), _) => Ok(config.masked_signature(&bytes, mask)?),
        (None, Some(mask)) => Ok(config.byte_masked_signature(&bytes, &parse_hex_bytes(mask)?)?),
        (None, None) => bail!("--bytes needs --mask or --mask-bytes"),
    }
}

fn parse_address(s: &str) -> Result<u64, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => s.parse::<u64>().map_err(|e| e.to_string()),
    }
}

fn print_report(report: &ScanReport, seconds: f64) {
    println!("{} File: {} ({} bytes)", "[*]".blue(), report.file.display(), report.file_size);
    println!("{} Signature: {}", "[*]".blue(), report.signature);

    match (report.offset, report.address) {
        (Some(offset), Some(address)) => {
            println!("{} Found at offset 0x{:x} (address 0x{:x})", "[+]".green(), offset, address);
        }
        _ => println!("{} Signature not found", "[-]".yellow()),
    }

    println!("{} Scan took {:.2}ms", "[*]".blue(), seconds * 1000.0);
}
