pub mod fed_auth_library;
pub mod fed_auth_workflow;

pub use self::fed_auth_library::{FedAuthLibrary, FedAuthLibraryError};
pub use self::fed_auth_workflow::{FedAuthWorkflow, FedAuthWorkflowError};
