use std::fs;
use std::io::Read;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use eiowire_packet::{Encoded, Packet, PacketType};
use eiowire_payload::encode_payload;
use serde::Deserialize;

use crate::cmd::EncodeArgs;
use crate::exit::{io_error, json_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::print_raw;

/// One packet as accepted on the command line.
#[derive(Deserialize)]
struct PacketSpec {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    data_base64: Option<String>,
}

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let source = read_source(&args)?;
    let specs: Vec<PacketSpec> = serde_json::from_str(&source)
        .map_err(|err| json_error("packet list is not valid JSON", err))?;
    let packets = specs
        .iter()
        .map(build_packet)
        .collect::<CliResult<Vec<_>>>()?;

    tracing::debug!(
        count = packets.len(),
        binary = args.binary,
        "encoding payload"
    );

    // Stdout carries the exact wire bytes, text included: no trailing
    // newline.
    match encode_payload(&packets, args.binary) {
        Encoded::Text(text) => print_raw(text.as_bytes()),
        Encoded::Binary(bytes) => print_raw(bytes.as_ref()),
    }
    Ok(SUCCESS)
}

fn build_packet(spec: &PacketSpec) -> CliResult<Packet> {
    let kind: PacketType = spec
        .kind
        .parse()
        .map_err(|err| CliError::new(USAGE, format!("{err}")))?;

    if spec.data.is_some() && spec.data_base64.is_some() {
        return Err(CliError::new(
            USAGE,
            "packet cannot carry both data and data_base64",
        ));
    }

    let packet = if let Some(text) = &spec.data {
        Packet::new(kind, text.as_str())
    } else if let Some(encoded) = &spec.data_base64 {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|err| CliError::new(USAGE, format!("data_base64 is not valid base64: {err}")))?;
        Packet::new(kind, bytes)
    } else {
        Packet::empty(kind)
    };
    Ok(packet)
}

fn read_source(args: &EncodeArgs) -> CliResult<String> {
    if let Some(json) = &args.json {
        return Ok(json.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use eiowire_packet::PacketData;

    use super::*;

    fn spec(kind: &str, data: Option<&str>, data_base64: Option<&str>) -> PacketSpec {
        PacketSpec {
            kind: kind.to_string(),
            data: data.map(str::to_string),
            data_base64: data_base64.map(str::to_string),
        }
    }

    #[test]
    fn builds_text_packet() {
        let packet = build_packet(&spec("message", Some("hello"), None)).unwrap();
        assert_eq!(packet, Packet::message("hello"));
    }

    #[test]
    fn builds_binary_packet_from_base64() {
        let packet = build_packet(&spec("message", None, Some("AQID"))).unwrap();
        assert_eq!(
            packet.data,
            Some(PacketData::Binary(bytes::Bytes::from_static(&[1, 2, 3])))
        );
    }

    #[test]
    fn builds_bodyless_packet() {
        let packet = build_packet(&spec("ping", None, None)).unwrap();
        assert_eq!(packet, Packet::empty(PacketType::Ping));
    }

    #[test]
    fn rejects_unknown_type_name() {
        let err = build_packet(&spec("shout", None, None)).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn rejects_both_data_forms() {
        let err = build_packet(&spec("message", Some("x"), Some("eA=="))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn rejects_bad_base64() {
        let err = build_packet(&spec("message", None, Some("!!"))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
