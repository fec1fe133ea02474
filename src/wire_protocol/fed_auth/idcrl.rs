//! Module: wire_protocol::fed_auth::idcrl
//!
//! Body layout for the IDCRL (Live ID Compact token) variant: length-prefixed
//! token, fixed 32-byte nonce, channel-binding token with a derived length,
//! fixed 32-byte signature.

use bytes::{Bytes, BytesMut};
use rand::{CryptoRng, RngCore};

use super::{take_array, take_bytes, write_token, FedAuthOptionError, NONCE_LEN, SIGNATURE_LEN};
use crate::signature;

// -----------------------------------------------------------------------------
// ----- ProtocolMessage -------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdcrlFrame {
    pub echo: bool,
    /// True only on client-built frames asking for more auth info; every
    /// decoded IDCRL frame carries false.
    pub requesting_auth_info: bool,
    pub token: Option<Bytes>,
    pub nonce: [u8; NONCE_LEN],
    /// No length prefix on the wire; the length is derived from the option's
    /// declared size.
    pub channel_binding_token: Option<Bytes>,
    /// HMAC-SHA-256 over the nonce.
    pub signature: [u8; SIGNATURE_LEN],
}

impl IdcrlFrame {
    pub fn new(
        echo: bool,
        token: Option<Bytes>,
        nonce: [u8; NONCE_LEN],
        channel_binding_token: Option<Bytes>,
        signature: [u8; SIGNATURE_LEN],
    ) -> Self {
        Self {
            echo,
            requesting_auth_info: false,
            token,
            nonce,
            channel_binding_token,
            signature,
        }
    }

    /// Client-side constructor that fills the signature field with 32 random
    /// bytes from the injected generator. A placeholder of correct size and
    /// entropy; callers needing a real HMAC supply it through `new`.
    pub fn with_generated_signature<R: CryptoRng + RngCore>(
        echo: bool,
        token: Option<Bytes>,
        nonce: [u8; NONCE_LEN],
        channel_binding_token: Option<Bytes>,
        rng: &mut R,
    ) -> Self {
        Self::new(
            echo,
            token,
            nonce,
            channel_binding_token,
            signature::random_signature(rng),
        )
    }

    // -------------------------------------------------------------------------
    // ----- Encoding/Decoding -------------------------------------------------

    pub(super) fn read_body(
        buf: &mut &[u8],
        echo: bool,
        token: Option<Bytes>,
        option_data_len: usize,
        consumed: &mut usize,
    ) -> Result<Self, FedAuthOptionError> {
        let nonce = take_array::<NONCE_LEN>(buf)?;
        *consumed += NONCE_LEN;

        // The channel-binding token is whatever the declared option size
        // leaves after the flags byte, the token prefix and token, the nonce
        // and the signature. A declared size too small to hold the fixed
        // fields means the stream is truncated or corrupt.
        let fixed = 1 + 4 + token.as_ref().map_or(0, |t| t.len()) + NONCE_LEN + SIGNATURE_LEN;
        let binding_len = option_data_len
            .checked_sub(fixed)
            .ok_or(FedAuthOptionError::UnexpectedEof)?;

        let channel_binding_token = if binding_len > 0 {
            let binding = take_bytes(buf, binding_len)?;
            *consumed += binding_len;
            Some(binding)
        } else {
            None
        };

        let signature = take_array::<SIGNATURE_LEN>(buf)?;
        *consumed += SIGNATURE_LEN;

        Ok(Self {
            echo,
            requesting_auth_info: false,
            token,
            nonce,
            channel_binding_token,
            signature,
        })
    }

    pub(super) fn write_body(&self, buf: &mut BytesMut) {
        write_token(buf, &self.token, self.requesting_auth_info);
        buf.extend_from_slice(&self.nonce);
        if let Some(binding) = &self.channel_binding_token {
            // No length prefix; the receiver derives the length.
            buf.extend_from_slice(binding);
        }
        buf.extend_from_slice(&self.signature);
    }

    pub(super) fn body_size(&self) -> usize {
        1 + 4
            + self.token.as_ref().map_or(0, |t| t.len())
            + NONCE_LEN
            + self.channel_binding_token.as_ref().map_or(0, |t| t.len())
            + SIGNATURE_LEN
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
