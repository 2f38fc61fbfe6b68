use eiowire_packet::PacketError;

/// Errors that can occur while decoding a payload.
///
/// Any of these rejects the whole payload: a corrupted segment never
/// yields the packets that preceded it through the direct-return API.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// A text payload must contain at least one segment.
    #[error("empty payload")]
    Empty,

    /// A length prefix that is not a canonical non-negative decimal.
    #[error("invalid packet length prefix {0:?}")]
    InvalidLength(String),

    /// A declared body length that overruns the remaining input.
    #[error("declared packet length {declared} exceeds remaining input ({remaining})")]
    Truncated { declared: usize, remaining: usize },

    /// Leftover characters after the last complete segment.
    #[error("trailing data after last packet")]
    TrailingData,

    /// A binary segment header byte that is neither a text/binary marker
    /// nor a length digit.
    #[error("invalid segment header byte {0:#04x}")]
    InvalidHeader(u8),

    /// A binary length header that ran out of input before the 0xff
    /// terminator.
    #[error("length header missing 0xff terminator")]
    UnterminatedHeader,

    /// A text-marked segment whose body is not UTF-8.
    #[error("text segment is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The segment body failed the single-packet decoder.
    #[error(transparent)]
    Packet(#[from] PacketError),
}

pub type Result<T> = std::result::Result<T, PayloadError>;
