//! Engine.IO v2 wire codec.
//!
//! eiowire encodes and decodes Engine.IO protocol-2 packets and payloads
//! for both textual and binary transports, falling back to base64 sidecars
//! where a transport carries only text.
//!
//! # Crate Structure
//!
//! - [`packet`] — Packet model and single-packet codec (text, binary,
//!   base64 forms)
//! - [`payload`] — Payload framing (text length-prefix grammar, binary
//!   digit-value headers) and the capability dispatch facade
//!
//! The `eiowire` binary (behind the default-on `cli` feature) encodes and
//! decodes wire captures from the command line.

/// Re-export packet types and the single-packet codec.
pub mod packet {
    pub use eiowire_packet::*;
}

/// Re-export payload framing codecs.
pub mod payload {
    pub use eiowire_payload::*;
}
