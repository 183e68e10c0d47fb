pub mod gate;
pub mod outcome;
pub mod types;
pub mod validator;

pub use gate::PermissionGate;
pub use outcome::{AuthError, AuthorizationOutcome, ValidationOutcome};
pub use types::{Credential, Identity, RequiredPermission};
pub use validator::{HttpTokenValidator, TokenValidator};
