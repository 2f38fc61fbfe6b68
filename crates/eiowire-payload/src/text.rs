//! Text payload framing.
//!
//! A text payload is zero or more concatenated segments:
//!
//! ```text
//! ┌─────────┬─────┬───────────────────────┐
//! │ length  │ ':' │ packet (text form)     │   "12:4hello world"
//! └─────────┴─────┴───────────────────────┘
//! ```
//!
//! The length is the decimal *character* count of the packet body. An
//! empty packet list encodes as `"0:"`, and a zero-length segment carries
//! no packet on the way back.

use eiowire_packet::{decode_packet_text, encode_packet_text, Packet};

use crate::error::{PayloadError, Result};

/// Encode a packet sequence into the text payload form.
pub fn encode_payload_text(packets: &[Packet]) -> String {
    if packets.is_empty() {
        return "0:".to_string();
    }

    let mut out = String::new();
    for packet in packets {
        let body = encode_packet_text(packet);
        let length = body.chars().count();
        out.push_str(&length.to_string());
        out.push(':');
        out.push_str(&body);
    }
    out
}

/// Decode a text payload into its packet sequence.
pub fn decode_payload_text(input: &str) -> Result<Vec<Packet>> {
    let mut packets = Vec::new();
    decode_payload_text_with(input, |packet, _| {
        packets.push(packet);
        true
    })?;
    Ok(packets)
}

/// Decode a text payload, handing each packet and its index to `visit` as
/// the scan progresses.
///
/// Returning `false` from the visitor stops the scan; nothing after the
/// current segment is parsed. Returns the number of packets delivered.
pub fn decode_payload_text_with<F>(input: &str, mut visit: F) -> Result<usize>
where
    F: FnMut(Packet, usize) -> bool,
{
    if input.is_empty() {
        return Err(PayloadError::Empty);
    }

    let mut delivered = 0usize;
    let mut length_buf = String::new();
    let mut chars = input.char_indices();

    while let Some((idx, ch)) = chars.next() {
        if ch != ':' {
            length_buf.push(ch);
            continue;
        }

        let declared = parse_length(&length_buf)?;
        length_buf.clear();

        // The body spans exactly `declared` characters after the ':'.
        let body_start = idx + 1;
        let mut body_end = body_start;
        for taken in 0..declared {
            match chars.next() {
                Some((i, c)) => body_end = i + c.len_utf8(),
                None => {
                    return Err(PayloadError::Truncated {
                        declared,
                        remaining: taken,
                    })
                }
            }
        }

        let body = &input[body_start..body_end];
        if body.is_empty() {
            continue;
        }

        let packet = decode_packet_text(body)?;
        let keep_going = visit(packet, delivered);
        delivered += 1;
        if !keep_going {
            return Ok(delivered);
        }
    }

    if !length_buf.is_empty() {
        return Err(PayloadError::TrailingData);
    }
    Ok(delivered)
}

/// Parse a length prefix, accepting only the canonical decimal form (no
/// sign, no leading zeros except `"0"` itself).
pub(crate) fn parse_length(digits: &str) -> Result<usize> {
    let parsed: usize = digits
        .parse()
        .map_err(|_| PayloadError::InvalidLength(digits.to_string()))?;
    if parsed.to_string() != digits {
        return Err(PayloadError::InvalidLength(digits.to_string()));
    }
    Ok(parsed)
}
