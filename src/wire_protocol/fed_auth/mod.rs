//! Module: wire_protocol::fed_auth
//!
//! Provides parsing and serialization for the FEDAUTH feature-extension option
//! carried in the LOGIN7 handshake packet.
//!
//! - `FedAuthOptionFrame`: represents the option as a closed variant per
//!   authentication library (IDCRL, security token, MSAL).
//! - `FedAuthOptionError`: error types for parsing and encoding.
//!
//! Implements `WireSerializable` for easy conversion between raw bytes and
//! `FedAuthOptionFrame`. The byte slice handed to `from_bytes` starts right
//! after the 1-byte option identifier, which the enclosing option-list framing
//! consumes; `to_bytes` emits that identifier first. All multi-byte integers
//! are little-endian per TDS convention.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::{error::Error as StdError, fmt};
use tracing::trace;

use crate::wire_protocol::shared_property_types::{
    FedAuthLibrary, FedAuthLibraryError, FedAuthWorkflowError,
};
use crate::wire_protocol::WireSerializable;

pub mod idcrl;
pub mod msal;
pub mod security_token;

pub use idcrl::IdcrlFrame;
pub use msal::MsalFrame;
pub use security_token::SecurityTokenFrame;

/// Feature identifier of the FEDAUTH option within the LOGIN7 option list.
pub const FEDAUTH_OPTION_ID: u8 = 0x02;

/// Server-issued nonces are always exactly 32 bytes.
pub const NONCE_LEN: usize = 32;

/// HMAC-SHA-256 signatures are always exactly 32 bytes.
pub const SIGNATURE_LEN: usize = 32;

// -----------------------------------------------------------------------------
// ----- ProtocolMessage -------------------------------------------------------

/// The federated authentication option. The library variant determines which
/// fields exist after the flags byte, so combinations outside the wire layout
/// cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FedAuthOptionFrame {
    Idcrl(IdcrlFrame),
    SecurityToken(SecurityTokenFrame),
    Msal(MsalFrame),
}

impl FedAuthOptionFrame {
    pub fn library(&self) -> FedAuthLibrary {
        match self {
            Self::Idcrl(_) => FedAuthLibrary::Idcrl,
            Self::SecurityToken(_) => FedAuthLibrary::SecurityToken,
            Self::Msal(_) => FedAuthLibrary::Msal,
        }
    }

    /// Client's echo of the server's "federated auth required" prelogin flag.
    pub fn echo(&self) -> bool {
        match self {
            Self::Idcrl(frame) => frame.echo,
            Self::SecurityToken(frame) => frame.echo,
            Self::Msal(frame) => frame.echo,
        }
    }

    /// Whether this option requests more auth info instead of delivering a
    /// token. Always true for MSAL.
    pub fn requesting_auth_info(&self) -> bool {
        match self {
            Self::Idcrl(frame) => frame.requesting_auth_info,
            Self::SecurityToken(frame) => frame.requesting_auth_info,
            Self::Msal(_) => true,
        }
    }

    fn flags(&self) -> u8 {
        (self.library().as_u8() << 1) | self.echo() as u8
    }
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug)]
pub enum FedAuthOptionError {
    LibraryError(FedAuthLibraryError),
    WorkflowError(FedAuthWorkflowError),
    UnexpectedEof,
}

impl fmt::Display for FedAuthOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FedAuthOptionError::LibraryError(e) => write!(f, "library error: {e}"),
            FedAuthOptionError::WorkflowError(e) => write!(f, "workflow error: {e}"),
            FedAuthOptionError::UnexpectedEof => write!(f, "unexpected EOF"),
        }
    }
}

impl StdError for FedAuthOptionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FedAuthOptionError::LibraryError(e) => Some(e),
            FedAuthOptionError::WorkflowError(e) => Some(e),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Helpers ---------------------------------------------------------------

fn take_u8(buf: &mut &[u8]) -> Result<u8, FedAuthOptionError> {
    if !buf.has_remaining() {
        return Err(FedAuthOptionError::UnexpectedEof);
    }
    Ok(buf.get_u8())
}

fn take_u32_le(buf: &mut &[u8]) -> Result<u32, FedAuthOptionError> {
    if buf.remaining() < 4 {
        return Err(FedAuthOptionError::UnexpectedEof);
    }
    Ok(buf.get_u32_le())
}

fn take_bytes(buf: &mut &[u8], n: usize) -> Result<Bytes, FedAuthOptionError> {
    if buf.remaining() < n {
        return Err(FedAuthOptionError::UnexpectedEof);
    }
    let (head, rest) = buf.split_at(n);
    *buf = rest;
    Ok(Bytes::copy_from_slice(head))
}

fn take_array<const N: usize>(buf: &mut &[u8]) -> Result<[u8; N], FedAuthOptionError> {
    if buf.remaining() < N {
        return Err(FedAuthOptionError::UnexpectedEof);
    }
    let mut out = [0u8; N];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

/// Read the 4-byte token-length prefix and, if non-zero, the token itself.
/// A zero length decodes as an absent token: the wire does not distinguish
/// "no token" from "empty token".
fn read_token(buf: &mut &[u8], consumed: &mut usize) -> Result<Option<Bytes>, FedAuthOptionError> {
    let token_len = take_u32_le(buf)? as usize;
    *consumed += 4;
    if token_len == 0 {
        return Ok(None);
    }
    let token = take_bytes(buf, token_len)?;
    *consumed += token_len;
    Ok(Some(token))
}

/// Write the token-length prefix and token. An absent token on a frame that
/// delivers a token gets an explicit zero-length prefix; an absent token on a
/// frame requesting more auth info elides the prefix entirely.
fn write_token(buf: &mut BytesMut, token: &Option<Bytes>, requesting_auth_info: bool) {
    match token {
        Some(token) => {
            buf.put_u32_le(token.len() as u32);
            buf.extend_from_slice(token);
        }
        None if !requesting_auth_info => buf.put_u32_le(0),
        None => {}
    }
}

// -----------------------------------------------------------------------------
// ----- WireSerializable ------------------------------------------------------

impl<'a> WireSerializable<'a> for FedAuthOptionFrame {
    type Error = FedAuthOptionError;

    fn from_bytes(bytes: &'a [u8]) -> Result<(Self, usize), Self::Error> {
        let mut buf = bytes;
        if buf.remaining() < 5 {
            return Err(FedAuthOptionError::UnexpectedEof);
        }

        // Declared size of everything after this prefix. Input to the IDCRL
        // channel-binding length derivation and the SECURITY_TOKEN nonce
        // presence test, not a bound on the reads themselves.
        let option_data_len = buf.get_u32_le() as usize;

        let flags = buf.get_u8();
        let echo = flags & 0x01 != 0;
        let library =
            FedAuthLibrary::from_u8(flags >> 1).map_err(FedAuthOptionError::LibraryError)?;

        // Body bytes consumed so far, counted from just past the length
        // prefix so it is directly comparable with `option_data_len`.
        let mut consumed = 1usize;

        let frame = match library {
            FedAuthLibrary::Idcrl => {
                let token = read_token(&mut buf, &mut consumed)?;
                FedAuthOptionFrame::Idcrl(IdcrlFrame::read_body(
                    &mut buf,
                    echo,
                    token,
                    option_data_len,
                    &mut consumed,
                )?)
            }
            FedAuthLibrary::SecurityToken => {
                let token = read_token(&mut buf, &mut consumed)?;
                FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::read_body(
                    &mut buf,
                    echo,
                    token,
                    option_data_len,
                    &mut consumed,
                )?)
            }
            FedAuthLibrary::Msal => {
                FedAuthOptionFrame::Msal(MsalFrame::read_body(&mut buf, echo, &mut consumed)?)
            }
        };

        trace!(?library, echo, option_data_len, consumed, "inflated fedauth option");

        Ok((frame, 4 + consumed))
    }

    fn to_bytes(&self) -> Result<Bytes, Self::Error> {
        let body_size = self.body_size();

        let mut buf = BytesMut::with_capacity(1 + 4 + body_size);
        buf.put_u8(FEDAUTH_OPTION_ID);
        buf.put_u32_le(body_size as u32);
        buf.put_u8(self.flags());

        match self {
            FedAuthOptionFrame::Idcrl(frame) => frame.write_body(&mut buf),
            FedAuthOptionFrame::SecurityToken(frame) => frame.write_body(&mut buf),
            FedAuthOptionFrame::Msal(frame) => frame.write_body(&mut buf),
        }

        trace!(library = ?self.library(), body_size, "deflated fedauth option");

        Ok(buf.freeze())
    }

    fn body_size(&self) -> usize {
        match self {
            FedAuthOptionFrame::Idcrl(frame) => frame.body_size(),
            FedAuthOptionFrame::SecurityToken(frame) => frame.body_size(),
            FedAuthOptionFrame::Msal(frame) => frame.body_size(),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_protocol::shared_property_types::FedAuthWorkflow;

    fn idcrl_example() -> FedAuthOptionFrame {
        FedAuthOptionFrame::Idcrl(IdcrlFrame::new(
            true,
            Some(Bytes::from_static(&[0x01, 0x02, 0x03])),
            [0u8; NONCE_LEN],
            Some(Bytes::from_static(&[0xAA, 0xBB])),
            [0u8; SIGNATURE_LEN],
        ))
    }

    #[test]
    fn serialize_idcrl_example() {
        // optionDataLength = 1 + 4 + 3 + 32 + 2 + 32 = 74
        let bytes = idcrl_example().to_bytes().unwrap();

        let mut expected = vec![FEDAUTH_OPTION_ID];
        expected.extend_from_slice(&74u32.to_le_bytes());
        expected.push(0x01); // flags: library IDCRL (0) << 1 | echo
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(&[0x01, 0x02, 0x03]);
        expected.extend_from_slice(&[0u8; 32]);
        expected.extend_from_slice(&[0xAA, 0xBB]);
        expected.extend_from_slice(&[0u8; 32]);

        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn deserialize_idcrl_example() {
        let bytes = idcrl_example().to_bytes().unwrap();
        // Skip the option identifier, as the option-list framing would.
        let (frame, consumed) = FedAuthOptionFrame::from_bytes(&bytes[1..]).unwrap();
        assert_eq!(consumed, bytes.len() - 1);
        assert_eq!(frame, idcrl_example());
    }

    #[test]
    fn roundtrip_all_valid_shapes() {
        let frames = [
            idcrl_example(),
            FedAuthOptionFrame::Idcrl(IdcrlFrame::new(
                false,
                None,
                [7u8; NONCE_LEN],
                None,
                [9u8; SIGNATURE_LEN],
            )),
            FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::new(
                true,
                Some(Bytes::from_static(&[0xDE, 0xAD])),
                None,
            )),
            FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::new(
                false,
                Some(Bytes::from_static(&[0xDE, 0xAD])),
                Some([3u8; NONCE_LEN]),
            )),
            FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::new(false, None, None)),
            FedAuthOptionFrame::Msal(MsalFrame::new(true, FedAuthWorkflow::UsernamePassword)),
        ];

        for original in frames {
            let bytes = original.to_bytes().unwrap();
            let (decoded, consumed) = FedAuthOptionFrame::from_bytes(&bytes[1..]).unwrap();
            assert_eq!(decoded, original);
            assert_eq!(consumed, bytes.len() - 1);
        }
    }

    #[test]
    fn body_size_matches_bytes_written() {
        let frames = [
            idcrl_example(),
            FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::new(
                false,
                Some(Bytes::from_static(b"tok")),
                Some([0u8; NONCE_LEN]),
            )),
            FedAuthOptionFrame::Msal(MsalFrame::new(false, FedAuthWorkflow::UsernamePassword)),
        ];

        for frame in frames {
            let bytes = frame.to_bytes().unwrap();
            // Identifier byte + length prefix + body.
            assert_eq!(bytes.len(), 1 + 4 + frame.body_size());
            let declared = u32::from_le_bytes(bytes[1..5].try_into().unwrap());
            assert_eq!(declared as usize, frame.body_size());
        }
    }

    #[test]
    fn unsupported_library_fails() {
        // flags 0x07 -> library tag 3, echo 1
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.push(0x07);

        let err = FedAuthOptionFrame::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            FedAuthOptionError::LibraryError(FedAuthLibraryError::Unsupported(3))
        ));
    }

    #[test]
    fn truncated_header_fails() {
        let err = FedAuthOptionFrame::from_bytes(&[0x4A, 0x00, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, FedAuthOptionError::UnexpectedEof));
    }

    #[test]
    fn truncated_token_fails() {
        // Declares a 16-byte token but supplies only 2 bytes.
        let mut data = Vec::new();
        data.extend_from_slice(&23u32.to_le_bytes());
        data.push(0x02); // SECURITY_TOKEN, no echo
        data.extend_from_slice(&16u32.to_le_bytes());
        data.extend_from_slice(&[0xDE, 0xAD]);

        let err = FedAuthOptionFrame::from_bytes(&data).unwrap_err();
        assert!(matches!(err, FedAuthOptionError::UnexpectedEof));
    }

    #[test]
    fn requesting_auth_info_elides_token_prefix() {
        let mut frame = IdcrlFrame::new(false, None, [1u8; NONCE_LEN], None, [2u8; SIGNATURE_LEN]);
        frame.requesting_auth_info = true;
        let frame = FedAuthOptionFrame::Idcrl(frame);

        let bytes = frame.to_bytes().unwrap();
        // Written body: flags + nonce + signature, no token-length field. The
        // declared length still follows the fixed formula.
        assert_eq!(bytes.len(), 1 + 4 + 1 + NONCE_LEN + SIGNATURE_LEN);
        let declared = u32::from_le_bytes(bytes[1..5].try_into().unwrap());
        assert_eq!(declared, 69);
    }

    #[test]
    fn empty_token_conflates_with_absent() {
        let frame = FedAuthOptionFrame::SecurityToken(SecurityTokenFrame::new(
            false,
            Some(Bytes::new()),
            None,
        ));
        let bytes = frame.to_bytes().unwrap();
        let (decoded, _) = FedAuthOptionFrame::from_bytes(&bytes[1..]).unwrap();
        match decoded {
            FedAuthOptionFrame::SecurityToken(frame) => assert_eq!(frame.token, None),
            other => panic!("expected SECURITY_TOKEN frame, got {other:?}"),
        }
    }

    #[test]
    fn accessors_follow_variant() {
        let msal = FedAuthOptionFrame::Msal(MsalFrame::new(true, FedAuthWorkflow::UsernamePassword));
        assert_eq!(msal.library(), FedAuthLibrary::Msal);
        assert!(msal.echo());
        assert!(msal.requesting_auth_info());

        let idcrl = idcrl_example();
        assert_eq!(idcrl.library(), FedAuthLibrary::Idcrl);
        assert!(!idcrl.requesting_auth_info());
    }

    #[test]
    fn trailing_bytes_belong_to_the_next_option() {
        // The option list chains; decoding must stop at this option's end.
        let bytes = idcrl_example().to_bytes().unwrap();
        let mut data = bytes[1..].to_vec();
        data.extend_from_slice(&[0xFF, 0xFF, 0xFF]);

        let (frame, consumed) = FedAuthOptionFrame::from_bytes(&data).unwrap();
        assert_eq!(frame, idcrl_example());
        assert_eq!(consumed, data.len() - 3);
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
