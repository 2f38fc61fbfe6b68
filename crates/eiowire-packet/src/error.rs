/// Errors that can occur while decoding a single packet.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The input contained no type byte or type character.
    #[error("empty packet")]
    Empty,

    /// The leading byte is not one of the seven wire codes.
    #[error("unknown packet type code {0}")]
    UnknownTypeCode(u8),

    /// The leading character is not a packet type digit.
    #[error("invalid packet type character {0:?}")]
    InvalidTypeChar(char),

    /// The name does not match any packet type.
    #[error("unknown packet type name {0:?}")]
    UnknownTypeName(String),

    /// The body of a `b`-prefixed packet is not valid base64.
    #[error("invalid base64 packet body: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, PacketError>;
