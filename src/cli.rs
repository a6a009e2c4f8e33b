use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use parse_torrent::bencode::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN};
use parse_torrent::DecoderLimits;

/// Command line arguments for the torrent descriptor parser
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the normalized metadata of a torrent file
    Info {
        /// The path to the torrent file
        path: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Print the raw bencoded value tree of a file as JSON
    Decode {
        /// The path to the bencoded file
        path: PathBuf,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

/// Bounds on decoding work
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct LimitArgs {
    /// Maximum nesting of lists and dictionaries
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
    /// Maximum file size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_LEN)]
    pub max_size: usize,
}

impl From<LimitArgs> for DecoderLimits {
    fn from(args: LimitArgs) -> Self {
        DecoderLimits {
            max_depth: args.max_depth,
            max_input_len: args.max_size,
        }
    }
}

impl Args {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info_command() {
        let args = Args::try_parse_from([
            "parse-torrent",
            "info",
            "file.torrent",
            "--json",
            "--max-depth",
            "8",
        ])
        .unwrap();
        match args.command {
            Command::Info { path, json, limits } => {
                assert_eq!(path, PathBuf::from("file.torrent"));
                assert!(json);
                let limits = DecoderLimits::from(limits);
                assert_eq!(limits.max_depth, 8);
                assert_eq!(limits.max_input_len, DEFAULT_MAX_INPUT_LEN);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_decode_defaults() {
        let args = Args::try_parse_from(["parse-torrent", "decode", "x.torrent"]).unwrap();
        match args.command {
            Command::Decode { limits, .. } => {
                assert_eq!(DecoderLimits::from(limits), DecoderLimits::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
