use std::io::{IsTerminal, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use eiowire_packet::{Packet, PacketData};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketOutput {
    schema_id: &'static str,
    index: usize,
    total: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    code: u8,
    body: &'static str,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

/// Print one record per decoded packet.
pub fn print_packets(packets: &[Packet], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let total = packets.len();
            for (index, packet) in packets.iter().enumerate() {
                let out = PacketOutput {
                    schema_id:
                        "https://schemas.3leaps.dev/eiowire/cli/v1/packet-decoded.schema.json",
                    index,
                    total,
                    kind: packet.kind.name(),
                    code: packet.kind.code(),
                    body: body_kind(packet),
                    size: body_size(packet),
                    data: data_field(packet),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "TYPE", "BODY", "SIZE", "DATA"]);
            for (index, packet) in packets.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    packet.kind.name().to_string(),
                    body_kind(packet).to_string(),
                    body_size(packet).to_string(),
                    data_preview(packet),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let total = packets.len();
            for (index, packet) in packets.iter().enumerate() {
                println!(
                    "[{index}/{total}] type={} body={} size={} data={}",
                    packet.kind.name(),
                    body_kind(packet),
                    body_size(packet),
                    data_preview(packet)
                );
            }
        }
        OutputFormat::Raw => {
            for packet in packets {
                match &packet.data {
                    Some(PacketData::Text(text)) => print_raw(text.as_bytes()),
                    Some(PacketData::Binary(bytes)) => print_raw(bytes.as_ref()),
                    None => {}
                }
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn body_kind(packet: &Packet) -> &'static str {
    match &packet.data {
        None => "none",
        Some(PacketData::Text(_)) => "text",
        Some(PacketData::Binary(_)) => "binary",
    }
}

fn body_size(packet: &Packet) -> usize {
    match &packet.data {
        None => 0,
        Some(PacketData::Text(text)) => text.len(),
        Some(PacketData::Binary(bytes)) => bytes.len(),
    }
}

/// Text data verbatim, binary data as base64 so the JSON stays lossless.
fn data_field(packet: &Packet) -> Option<String> {
    match &packet.data {
        None => None,
        Some(PacketData::Text(text)) => Some(text.clone()),
        Some(PacketData::Binary(bytes)) => Some(STANDARD.encode(bytes)),
    }
}

fn data_preview(packet: &Packet) -> String {
    match &packet.data {
        None => String::new(),
        Some(PacketData::Text(text)) => text.clone(),
        Some(PacketData::Binary(bytes)) => format!("<binary {} bytes>", bytes.len()),
    }
}
