use std::error::Error as StdError;
use std::fmt;

// -----------------------------------------------------------------------------
// ----- Property --------------------------------------------------------------

/// MSAL authentication workflow, carried as the last byte of an MSAL-variant
/// option body. Only wire-present when the library is MSAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FedAuthWorkflow {
    UsernamePassword,
}

// -----------------------------------------------------------------------------
// ----- Encoding/Decoding -----------------------------------------------------

impl FedAuthWorkflow {
    pub fn from_u8(tag: u8) -> Result<Self, FedAuthWorkflowError> {
        match tag {
            0x01 => Ok(Self::UsernamePassword),
            other => Err(FedAuthWorkflowError::Unsupported(other)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::UsernamePassword => 0x01,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug)]
pub enum FedAuthWorkflowError {
    Unsupported(u8),
}

impl fmt::Display for FedAuthWorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FedAuthWorkflowError::Unsupported(tag) => {
                write!(f, "unsupported federated auth workflow: {tag:#X}")
            }
        }
    }
}

impl StdError for FedAuthWorkflowError {}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
