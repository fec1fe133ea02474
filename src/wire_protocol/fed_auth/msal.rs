//! Module: wire_protocol::fed_auth::msal
//!
//! Body layout for the MSAL variant: a single workflow byte. The token and
//! its length prefix are wire-absent; on the wire the token concept is
//! replaced by the requesting-auth-info / workflow pair.

use bytes::{BufMut, BytesMut};

use super::{take_u8, FedAuthOptionError};
use crate::wire_protocol::shared_property_types::FedAuthWorkflow;

// -----------------------------------------------------------------------------
// ----- ProtocolMessage -------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsalFrame {
    pub echo: bool,
    pub workflow: FedAuthWorkflow,
}

impl MsalFrame {
    pub fn new(echo: bool, workflow: FedAuthWorkflow) -> Self {
        Self { echo, workflow }
    }

    // -------------------------------------------------------------------------
    // ----- Encoding/Decoding -------------------------------------------------

    pub(super) fn read_body(
        buf: &mut &[u8],
        echo: bool,
        consumed: &mut usize,
    ) -> Result<Self, FedAuthOptionError> {
        let tag = take_u8(buf)?;
        *consumed += 1;
        let workflow =
            FedAuthWorkflow::from_u8(tag).map_err(FedAuthOptionError::WorkflowError)?;
        Ok(Self { echo, workflow })
    }

    pub(super) fn write_body(&self, buf: &mut BytesMut) {
        buf.put_u8(self.workflow.as_u8());
    }

    pub(super) fn body_size(&self) -> usize {
        // flags byte + workflow byte
        2
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
