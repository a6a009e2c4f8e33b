use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use parse_torrent::bencode::Bencode;
use parse_torrent::{DecoderLimits, TorrentMetadata};

mod cli;

fn read_file(path: &Path, limits: DecoderLimits) -> Result<Vec<u8>> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .len();
    if len > limits.max_input_len as u64 {
        anyhow::bail!(
            "{} is {} bytes, above the {} byte limit",
            path.display(),
            len,
            limits.max_input_len
        );
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_torrent(path: &Path, limits: DecoderLimits) -> Result<TorrentMetadata> {
    let bytes = read_file(path, limits)?;
    parse_torrent::parse_with_limits(&bytes, limits)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = cli::Args::parse();
    info!("Command: {:?}", args.command);

    match args.command {
        cli::Command::Info { path, json, limits } => {
            let metadata = load_torrent(&path, limits.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                print!("{}", metadata);
            }
        }
        cli::Command::Decode { path, limits } => {
            let limits = limits.into();
            let bytes = read_file(&path, limits)?;
            let value = Bencode::decode_with_limits(&bytes, limits)
                .with_context(|| format!("failed to decode {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&value.to_json())?);
        }
    }
    Ok(())
}
