use std::error::Error as StdError;
use std::fmt;

// -----------------------------------------------------------------------------
// ----- Property --------------------------------------------------------------

/// Federated authentication library, carried in bits 1-7 of the option's
/// flags byte. Selects the wire layout of everything after that byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FedAuthLibrary {
    /// Live ID Compact token (IDCRL).
    Idcrl,
    /// Opaque security token supplied by the application.
    SecurityToken,
    /// MSAL-driven interactive workflow.
    Msal,
}

// -----------------------------------------------------------------------------
// ----- Encoding/Decoding -----------------------------------------------------

impl FedAuthLibrary {
    pub fn from_u8(tag: u8) -> Result<Self, FedAuthLibraryError> {
        match tag {
            0x00 => Ok(Self::Idcrl),
            0x01 => Ok(Self::SecurityToken),
            0x02 => Ok(Self::Msal),
            other => Err(FedAuthLibraryError::Unsupported(other)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Idcrl => 0x00,
            Self::SecurityToken => 0x01,
            Self::Msal => 0x02,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug)]
pub enum FedAuthLibraryError {
    Unsupported(u8),
}

impl fmt::Display for FedAuthLibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FedAuthLibraryError::Unsupported(tag) => {
                write!(f, "unsupported federated auth library: {tag:#X}")
            }
        }
    }
}

impl StdError for FedAuthLibraryError {}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
