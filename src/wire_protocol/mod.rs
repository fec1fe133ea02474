pub mod fed_auth;
pub mod shared_property_types;
pub mod wire_serializable;

pub use fed_auth::FedAuthOptionFrame;
pub use wire_serializable::WireSerializable;
