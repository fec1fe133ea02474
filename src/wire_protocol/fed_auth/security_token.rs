//! Module: wire_protocol::fed_auth::security_token
//!
//! Body layout for the SECURITY_TOKEN variant: length-prefixed token followed
//! by an optional 32-byte nonce. The nonce has no presence flag; it exists iff
//! the declared option size exceeds the bytes consumed up to that point.

use bytes::{Bytes, BytesMut};

use super::{take_array, write_token, FedAuthOptionError, NONCE_LEN};

// -----------------------------------------------------------------------------
// ----- ProtocolMessage -------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityTokenFrame {
    pub echo: bool,
    /// True only on client-built frames asking for more auth info; every
    /// decoded SECURITY_TOKEN frame carries false.
    pub requesting_auth_info: bool,
    pub token: Option<Bytes>,
    pub nonce: Option<[u8; NONCE_LEN]>,
}

impl SecurityTokenFrame {
    pub fn new(echo: bool, token: Option<Bytes>, nonce: Option<[u8; NONCE_LEN]>) -> Self {
        Self {
            echo,
            requesting_auth_info: false,
            token,
            nonce,
        }
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
        // Bytes left in the declared size after the token mean a nonce
        // follows; an exact match means it was omitted.
        let nonce = if *consumed < option_data_len {
            let nonce = take_array::<NONCE_LEN>(buf)?;
            *consumed += NONCE_LEN;
            Some(nonce)
        } else {
            None
        };

        Ok(Self {
            echo,
            requesting_auth_info: false,
            token,
            nonce,
        })
    }

    pub(super) fn write_body(&self, buf: &mut BytesMut) {
        write_token(buf, &self.token, self.requesting_auth_info);
        if let Some(nonce) = &self.nonce {
            buf.extend_from_slice(nonce);
        }
    }

    pub(super) fn body_size(&self) -> usize {
        1 + 4
            + self.token.as_ref().map_or(0, |t| t.len())
            + self.nonce.map_or(0, |_| NONCE_LEN)
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
