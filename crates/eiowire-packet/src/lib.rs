//! Engine.IO v2 packet model and single-packet codec.
//!
//! A packet is a type tag plus an optional body. Seven types exist on the
//! wire (`open` through `noop`, codes 0-6). A packet has three encoded
//! forms:
//!
//! - **text**: the ASCII type digit followed by the body text
//! - **binary**: the raw type-code byte followed by the body bytes
//! - **base64**: `b`, the type digit, then the base64 of the body bytes —
//!   the fallback for binary bodies on text-only transports
//!
//! Framing packets into payloads lives one layer up, in `eiowire-payload`.

pub mod codec;
pub mod error;
pub mod packet;

pub use codec::{
    decode_packet, decode_packet_binary, decode_packet_text, encode_base64_packet, encode_packet,
    encode_packet_text,
};
pub use error::{PacketError, Result};
pub use packet::{Encoded, Packet, PacketData, PacketType, PROTOCOL};
