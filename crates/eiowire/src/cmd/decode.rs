use std::fs;
use std::io::Read;

use eiowire_packet::Packet;
use eiowire_payload::{decode_payload_binary, decode_payload_text};

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, payload_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_packets, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args)?;
    let packets = decode_input(&input, &args)?;
    tracing::debug!(count = packets.len(), "decoded payload");
    print_packets(&packets, format);
    Ok(SUCCESS)
}

/// Pick the framing: explicit flags win, otherwise UTF-8 validity decides.
///
/// A binary payload always contains the 0xFF header terminator, which is
/// never valid UTF-8, so auto-detection cannot mistake one for text.
fn decode_input(input: &[u8], args: &DecodeArgs) -> CliResult<Vec<Packet>> {
    if args.binary {
        return decode_payload_binary(input)
            .map_err(|err| payload_error("binary payload rejected", err));
    }
    match std::str::from_utf8(input) {
        Ok(text) => {
            decode_payload_text(text).map_err(|err| payload_error("text payload rejected", err))
        }
        Err(_) if args.text => Err(CliError::new(
            DATA_INVALID,
            "payload is not valid UTF-8 text",
        )),
        Err(_) => decode_payload_binary(input)
            .map_err(|err| payload_error("binary payload rejected", err)),
    }
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(buf)
}
