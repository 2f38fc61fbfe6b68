//! Payload framing for Engine.IO v2 packet sequences.
//!
//! A payload is an ordered sequence of packets framed into one transport
//! message. Two framings exist:
//!
//! - [`text`] — `<len>:<data>` segments for text-only transports
//! - [`binary`] — marker + digit-value length header + `0xFF` sentinel for
//!   binary-capable transports
//!
//! [`encode_payload`]/[`decode_payload`] pick the framing from the
//! transport capability and the wire form of the input. Both decoders
//! reject the whole payload on the first malformed segment — partial
//! delivery could break ordering assumptions upstream.

pub mod binary;
pub mod error;
pub mod text;

pub use binary::{decode_payload_binary, encode_payload_binary};
pub use error::{PayloadError, Result};
pub use text::{decode_payload_text, decode_payload_text_with, encode_payload_text};

use eiowire_packet::{Encoded, Packet};

/// Encode a packet sequence for a transport with the given binary
/// capability.
pub fn encode_payload(packets: &[Packet], supports_binary: bool) -> Encoded {
    if supports_binary {
        Encoded::Binary(binary::encode_payload_binary(packets))
    } else {
        Encoded::Text(text::encode_payload_text(packets))
    }
}

/// Decode a payload, dispatching on the wire form of the input.
pub fn decode_payload(input: &Encoded) -> Result<Vec<Packet>> {
    match input {
        Encoded::Text(payload) => text::decode_payload_text(payload),
        Encoded::Binary(payload) => binary::decode_payload_binary(payload),
    }
}
