use std::fmt;

use bytes::Bytes;

use crate::error::PacketError;

/// Protocol revision emitted by the encoders.
pub const PROTOCOL: u8 = 2;

/// Semantic role of a packet.
///
/// The wire code is the enum discriminant. The text encodings use the
/// matching ASCII digit (`'0'`..`'6'`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    Open = 0,
    Close = 1,
    Ping = 2,
    Pong = 3,
    Message = 4,
    Upgrade = 5,
    Noop = 6,
}

impl PacketType {
    /// All packet types, ordered by wire code.
    ///
    /// Reverse lookup is an index into this list; codes outside 0-6 name
    /// no type.
    pub const ALL: [PacketType; 7] = [
        PacketType::Open,
        PacketType::Close,
        PacketType::Ping,
        PacketType::Pong,
        PacketType::Message,
        PacketType::Upgrade,
        PacketType::Noop,
    ];

    /// The wire code (0-6).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a packet type by wire code.
    pub fn from_code(code: u8) -> Option<PacketType> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The ASCII digit used by the text encodings.
    pub fn digit(self) -> char {
        (b'0' + self.code()) as char
    }

    /// Look up a packet type by its text-encoding digit.
    pub fn from_digit(ch: char) -> Option<PacketType> {
        let code = ch.to_digit(10)?;
        u8::try_from(code).ok().and_then(Self::from_code)
    }

    /// Lower-case protocol name of the type.
    pub fn name(self) -> &'static str {
        match self {
            PacketType::Open => "open",
            PacketType::Close => "close",
            PacketType::Ping => "ping",
            PacketType::Pong => "pong",
            PacketType::Message => "message",
            PacketType::Upgrade => "upgrade",
            PacketType::Noop => "noop",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for PacketType {
    type Error = PacketError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(PacketError::UnknownTypeCode(code))
    }
}

impl std::str::FromStr for PacketType {
    type Err = PacketError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| PacketError::UnknownTypeName(name.to_string()))
    }
}

/// Packet body: text or opaque bytes.
///
/// The codec never inspects the contents. Text stays text and bytes stay
/// bytes through a round-trip, except that a text-only transport carries
/// bytes base64-wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketData {
    Text(String),
    Binary(Bytes),
}

impl PacketData {
    /// Returns true for a byte body.
    pub fn is_binary(&self) -> bool {
        matches!(self, PacketData::Binary(_))
    }
}

impl From<&str> for PacketData {
    fn from(text: &str) -> Self {
        PacketData::Text(text.to_string())
    }
}

impl From<String> for PacketData {
    fn from(text: String) -> Self {
        PacketData::Text(text)
    }
}

impl From<Bytes> for PacketData {
    fn from(bytes: Bytes) -> Self {
        PacketData::Binary(bytes)
    }
}

impl From<Vec<u8>> for PacketData {
    fn from(bytes: Vec<u8>) -> Self {
        PacketData::Binary(Bytes::from(bytes))
    }
}

/// One unit of communication: a type tag plus an optional body.
///
/// Packets are immutable values; the codec never retains them after a call
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub kind: PacketType,
    pub data: Option<PacketData>,
}

impl Packet {
    /// Create a packet with a body.
    pub fn new(kind: PacketType, data: impl Into<PacketData>) -> Self {
        Self {
            kind,
            data: Some(data.into()),
        }
    }

    /// Create a bodyless packet (`ping`, `pong`, `noop`, ...).
    pub fn empty(kind: PacketType) -> Self {
        Self { kind, data: None }
    }

    /// Create a `message` packet.
    pub fn message(data: impl Into<PacketData>) -> Self {
        Self::new(PacketType::Message, data)
    }
}

/// Wire form produced by the encoders: a string for textual transports,
/// raw bytes for binary-capable transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Text(String),
    Binary(Bytes),
}

impl Encoded {
    /// Returns true for the binary wire form.
    pub fn is_binary(&self) -> bool {
        matches!(self, Encoded::Binary(_))
    }

    /// Encoded size in bytes (UTF-8 for the text form).
    pub fn len(&self) -> usize {
        match self {
            Encoded::Text(text) => text.len(),
            Encoded::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the encoded form as bytes (UTF-8 for the text form).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Text(text) => text.as_bytes(),
            Encoded::Binary(bytes) => bytes.as_ref(),
        }
    }

    /// Consume into a byte buffer (UTF-8 for the text form).
    pub fn into_bytes(self) -> Bytes {
        match self {
            Encoded::Text(text) => Bytes::from(text.into_bytes()),
            Encoded::Binary(bytes) => bytes,
        }
    }
}
