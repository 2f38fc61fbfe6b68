use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a packet list into a wire payload.
    Encode(EncodeArgs),
    /// Decode a wire payload and print its packets.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Packet list as inline JSON.
    ///
    /// Each element is an object with a "type" name and optionally either
    /// "data" (text) or "data_base64" (bytes).
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the packet list from a JSON file instead (default: stdin).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Emit the binary payload framing instead of text.
    #[arg(long)]
    pub binary: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Read the payload from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Force the binary payload framing.
    #[arg(long, conflicts_with = "text")]
    pub binary: bool,
    /// Force the text payload framing.
    #[arg(long)]
    pub text: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print extended build details.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug)]
pub struct EnvinfoArgs {}
