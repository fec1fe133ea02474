//! Codec for the FEDAUTH feature-extension option of the TDS LOGIN7 handshake.
//!
//! A client negotiating token-based (federated) authentication attaches this
//! option to its LOGIN7 packet to declare which authentication library it
//! uses and to carry the token, a server-issued nonce, a TLS channel-binding
//! token and an HMAC signature, in a layout that varies by library.
//!
//! This crate covers the option body only: parsing it from a byte slice
//! positioned just past the 1-byte option identifier, and serializing a
//! populated option back to wire bytes. The enclosing LOGIN7 assembly, the
//! generic feature-option list framing and the PRELOGIN exchange are the
//! caller's concern.

pub mod signature;
pub mod wire_protocol;

pub use wire_protocol::fed_auth::{
    FedAuthOptionError, FedAuthOptionFrame, IdcrlFrame, MsalFrame, SecurityTokenFrame,
    FEDAUTH_OPTION_ID, NONCE_LEN, SIGNATURE_LEN,
};
pub use wire_protocol::shared_property_types::{FedAuthLibrary, FedAuthWorkflow};
pub use wire_protocol::WireSerializable;
