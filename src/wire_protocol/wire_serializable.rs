use bytes::Bytes;
use std::error::Error as StdError;

pub trait WireSerializable<'a>: Sized {
    type Error: StdError + Send + Sync + 'static;

    /// Serialize the object into bytes for wire transmission.
    fn to_bytes(&self) -> Result<Bytes, Self::Error>;

    /// Deserialize from bytes into the object, returning the number of bytes
    /// consumed. Feature options chain inside LOGIN7, so the caller needs to
    /// know where the next option starts.
    fn from_bytes(bytes: &'a [u8]) -> Result<(Self, usize), Self::Error>;

    fn body_size(&self) -> usize;
}
