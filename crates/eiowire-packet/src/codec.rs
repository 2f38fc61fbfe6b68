//! Single-packet encoding and decoding.
//!
//! Wire forms:
//!
//! ```text
//! text     ┌───────────┬──────────────────┐
//!          │ type digit│ body text        │   "4hello"
//!          └───────────┴──────────────────┘
//! binary   ┌───────────┬──────────────────┐
//!          │ type code │ body bytes       │   [0x04, 0x01, 0x02, 0x03]
//!          └───────────┴──────────────────┘
//! base64   ┌───┬───────┬──────────────────┐
//!          │'b'│ digit │ base64(body)     │   "b4AQID"
//!          └───┴───────┴──────────────────┘
//! ```
//!
//! A bodyless packet encodes as the lone type digit. An empty text body
//! encodes identically, so it decodes back as bodyless.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{PacketError, Result};
use crate::packet::{Encoded, Packet, PacketData, PacketType};

/// Encode one packet for a transport with the given binary capability.
///
/// A byte body rides as raw bytes when the transport supports binary,
/// otherwise as a base64 sidecar. Text and bodyless packets always encode
/// as text.
pub fn encode_packet(packet: &Packet, supports_binary: bool) -> Encoded {
    match &packet.data {
        Some(PacketData::Binary(bytes)) if supports_binary => {
            let mut buf = BytesMut::with_capacity(1 + bytes.len());
            buf.put_u8(packet.kind.code());
            buf.put_slice(bytes);
            Encoded::Binary(buf.freeze())
        }
        Some(PacketData::Binary(_)) => Encoded::Text(encode_base64_packet(packet)),
        _ => Encoded::Text(encode_packet_text(packet)),
    }
}

/// Encode one packet in its forced-text form.
///
/// This is the shape the text payload framer embeds: a byte body becomes
/// the base64 sidecar, everything else is the type digit plus the text.
pub fn encode_packet_text(packet: &Packet) -> String {
    match &packet.data {
        Some(PacketData::Binary(_)) => encode_base64_packet(packet),
        Some(PacketData::Text(text)) => {
            let mut out = String::with_capacity(1 + text.len());
            out.push(packet.kind.digit());
            out.push_str(text);
            out
        }
        None => packet.kind.digit().to_string(),
    }
}

/// Encode one packet as a base64 sidecar: `b`, the type digit, then the
/// standard padded base64 of the body bytes.
///
/// A text body is base64'd from its UTF-8 bytes; a bodyless packet yields
/// just the two-character prefix.
pub fn encode_base64_packet(packet: &Packet) -> String {
    let mut out = String::from("b");
    out.push(packet.kind.digit());
    match &packet.data {
        Some(PacketData::Binary(bytes)) => out.push_str(&STANDARD.encode(bytes)),
        Some(PacketData::Text(text)) => out.push_str(&STANDARD.encode(text.as_bytes())),
        None => {}
    }
    out
}

/// Decode one packet, dispatching on the wire form of the input.
pub fn decode_packet(input: &Encoded) -> Result<Packet> {
    match input {
        Encoded::Text(text) => decode_packet_text(text),
        Encoded::Binary(bytes) => decode_packet_binary(bytes),
    }
}

/// Decode one packet from its text form.
///
/// A leading `b` hands the remainder to the base64 decoder. Otherwise the
/// first character must be a valid type digit; anything after it is the
/// text body, and a lone digit means no body.
pub fn decode_packet_text(input: &str) -> Result<Packet> {
    let mut chars = input.chars();
    let first = chars.next().ok_or(PacketError::Empty)?;
    if first == 'b' {
        return decode_base64_packet(chars.as_str());
    }

    let kind = PacketType::from_digit(first).ok_or(PacketError::InvalidTypeChar(first))?;
    let rest = chars.as_str();
    if rest.is_empty() {
        Ok(Packet::empty(kind))
    } else {
        Ok(Packet::new(kind, rest))
    }
}

/// Decode one packet from its binary form.
///
/// The first byte must be a valid type code; the remainder is the body.
/// The body is always present on this path, possibly as zero bytes.
pub fn decode_packet_binary(input: &[u8]) -> Result<Packet> {
    let (&code, body) = input.split_first().ok_or(PacketError::Empty)?;
    let kind = PacketType::try_from(code)?;
    Ok(Packet::new(kind, Bytes::copy_from_slice(body)))
}

fn decode_base64_packet(input: &str) -> Result<Packet> {
    let mut chars = input.chars();
    let first = chars.next().ok_or(PacketError::Empty)?;
    let kind = PacketType::from_digit(first).ok_or(PacketError::InvalidTypeChar(first))?;
    let bytes = STANDARD.decode(chars.as_str())?;
    Ok(Packet::new(kind, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_encodes_with_type_digit() {
        let encoded = encode_packet(&Packet::message("hello world"), false);
        assert_eq!(encoded, Encoded::Text("4hello world".to_string()));
    }

    #[test]
    fn text_message_decodes() {
        let packet = decode_packet_text("4hello world").unwrap();
        assert_eq!(packet, Packet::message("hello world"));
    }

    #[test]
    fn bodyless_packet_is_a_lone_digit() {
        let encoded = encode_packet(&Packet::empty(PacketType::Ping), false);
        assert_eq!(encoded, Encoded::Text("2".to_string()));

        let packet = decode_packet_text("2").unwrap();
        assert_eq!(packet, Packet::empty(PacketType::Ping));
    }

    #[test]
    fn empty_text_body_decodes_as_bodyless() {
        let encoded = encode_packet(&Packet::message(""), false);
        assert_eq!(encoded, Encoded::Text("4".to_string()));

        let packet = decode_packet(&encoded).unwrap();
        assert_eq!(packet.data, None);
    }

    #[test]
    fn binary_body_rides_raw_when_supported() {
        let packet = Packet::message(vec![1u8, 2, 3]);
        let encoded = encode_packet(&packet, true);
        assert_eq!(
            encoded,
            Encoded::Binary(Bytes::from_static(&[0x04, 0x01, 0x02, 0x03]))
        );
    }

    #[test]
    fn binary_body_falls_back_to_base64() {
        let packet = Packet::message(vec![1u8, 2, 3]);
        let encoded = encode_packet(&packet, false);
        assert_eq!(encoded, Encoded::Text("b4AQID".to_string()));
    }

    #[test]
    fn base64_packet_decodes_to_bytes() {
        let packet = decode_packet_text("b4AQID").unwrap();
        assert_eq!(packet.kind, PacketType::Message);
        assert_eq!(
            packet.data,
            Some(PacketData::Binary(Bytes::from_static(&[1, 2, 3])))
        );
    }

    #[test]
    fn binary_form_decodes() {
        let packet = decode_packet_binary(&[0x04, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(packet, Packet::message(vec![1u8, 2, 3]));
    }

    #[test]
    fn binary_body_round_trips_both_capabilities() {
        let packet = Packet::new(PacketType::Upgrade, vec![0u8, 255, 127, 3]);
        for supports_binary in [true, false] {
            let encoded = encode_packet(&packet, supports_binary);
            assert_eq!(decode_packet(&encoded).unwrap(), packet);
        }
    }

    #[test]
    fn text_body_round_trips_both_capabilities() {
        let packet = Packet::new(PacketType::Open, r#"{"sid":"abc123"}"#);
        for supports_binary in [true, false] {
            let encoded = encode_packet(&packet, supports_binary);
            assert_eq!(decode_packet(&encoded).unwrap(), packet);
        }
    }

    #[test]
    fn multibyte_text_round_trips() {
        let packet = Packet::message("héllo wörld ✓");
        let encoded = encode_packet(&packet, false);
        assert_eq!(decode_packet(&encoded).unwrap(), packet);
    }

    #[test]
    fn unknown_type_character_is_rejected() {
        assert!(matches!(
            decode_packet_text("9abc"),
            Err(PacketError::InvalidTypeChar('9'))
        ));
        assert!(matches!(
            decode_packet_text("a"),
            Err(PacketError::InvalidTypeChar('a'))
        ));
    }

    #[test]
    fn empty_text_input_is_rejected() {
        assert!(matches!(decode_packet_text(""), Err(PacketError::Empty)));
    }

    #[test]
    fn empty_binary_input_is_rejected() {
        assert!(matches!(decode_packet_binary(&[]), Err(PacketError::Empty)));
    }

    #[test]
    fn out_of_range_type_byte_is_rejected() {
        assert!(matches!(
            decode_packet_binary(&[0x07, 0x01]),
            Err(PacketError::UnknownTypeCode(7))
        ));
    }

    #[test]
    fn malformed_base64_is_rejected() {
        assert!(matches!(
            decode_packet_text("b4!!!"),
            Err(PacketError::Base64(_))
        ));
    }

    #[test]
    fn base64_prefix_without_digit_is_rejected() {
        assert!(matches!(decode_packet_text("b"), Err(PacketError::Empty)));
        assert!(matches!(
            decode_packet_text("bx"),
            Err(PacketError::InvalidTypeChar('x'))
        ));
    }

    #[test]
    fn bare_type_byte_decodes_to_empty_body() {
        let packet = decode_packet_binary(&[0x02]).unwrap();
        assert_eq!(packet.kind, PacketType::Ping);
        assert_eq!(packet.data, Some(PacketData::Binary(Bytes::new())));
    }
}
