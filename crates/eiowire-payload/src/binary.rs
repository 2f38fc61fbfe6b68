//! Binary payload framing.
//!
//! Each packet becomes one segment:
//!
//! ```text
//! ┌────────┬──────────────────┬──────┬─────────────────┐
//! │ kind   │ length digits    │ 0xFF │ body             │
//! │ 0 or 1 │ one byte each    │      │ (length bytes)   │
//! └────────┴──────────────────┴──────┴─────────────────┘
//! ```
//!
//! Kind 0 marks a text body (UTF-8), kind 1 a binary body. The length is
//! the decimal byte count of the body, stored as the *numeric value* of
//! each digit — a six-byte body is the byte `0x06`, not `'6'`. The 0xFF
//! sentinel terminates the digit run; it can never be confused with a
//! digit byte. This layout is fixed by the wire protocol and must not
//! change.

use bytes::{BufMut, Bytes, BytesMut};
use eiowire_packet::{decode_packet_binary, decode_packet_text, encode_packet, Encoded, Packet};

use crate::error::{PayloadError, Result};
use crate::text::parse_length;

/// Segment marker for a UTF-8 text body.
const TEXT_MARKER: u8 = 0x00;

/// Segment marker for a raw binary body.
const BINARY_MARKER: u8 = 0x01;

/// Terminates the length digit run.
const LENGTH_TERMINATOR: u8 = 0xFF;

/// Encode a packet sequence into the binary payload form.
///
/// Packets are encoded in their native single-packet form (text stays
/// UTF-8 text, byte bodies stay raw — no base64 sidecars here). An empty
/// list encodes as an empty buffer.
pub fn encode_payload_binary(packets: &[Packet]) -> Bytes {
    let mut buf = BytesMut::new();
    for packet in packets {
        match encode_packet(packet, true) {
            Encoded::Text(text) => append_segment(&mut buf, TEXT_MARKER, text.as_bytes()),
            Encoded::Binary(bytes) => append_segment(&mut buf, BINARY_MARKER, &bytes),
        }
    }
    buf.freeze()
}

fn append_segment(buf: &mut BytesMut, marker: u8, body: &[u8]) {
    let digits = body.len().to_string();
    buf.reserve(2 + digits.len() + body.len());
    buf.put_u8(marker);
    for digit in digits.bytes() {
        buf.put_u8(digit - b'0');
    }
    buf.put_u8(LENGTH_TERMINATOR);
    buf.put_slice(body);
}

/// Decode a binary payload into its packet sequence.
///
/// An empty buffer decodes to no packets. There is no early-termination
/// hook on this path; every segment is decoded.
pub fn decode_payload_binary(input: &[u8]) -> Result<Vec<Packet>> {
    let mut packets = Vec::new();
    let mut rest = input;

    while let Some((&marker, tail)) = rest.split_first() {
        let is_text = match marker {
            TEXT_MARKER => true,
            BINARY_MARKER => false,
            other => return Err(PayloadError::InvalidHeader(other)),
        };
        rest = tail;

        let declared = read_length(&mut rest)?;
        if declared > rest.len() {
            return Err(PayloadError::Truncated {
                declared,
                remaining: rest.len(),
            });
        }
        let (body, tail) = rest.split_at(declared);
        rest = tail;

        let packet = if is_text {
            decode_packet_text(std::str::from_utf8(body)?)?
        } else {
            decode_packet_binary(body)?
        };
        packets.push(packet);
    }

    Ok(packets)
}

/// Consume length digits up to the 0xFF terminator.
fn read_length(rest: &mut &[u8]) -> Result<usize> {
    let mut digits = String::new();
    loop {
        let (&byte, tail) = rest
            .split_first()
            .ok_or(PayloadError::UnterminatedHeader)?;
        *rest = tail;
        match byte {
            LENGTH_TERMINATOR => break,
            value @ 0..=9 => digits.push((b'0' + value) as char),
            other => return Err(PayloadError::InvalidHeader(other)),
        }
    }
    parse_length(&digits)
}
