// security/src/lib.rs

pub mod claims;
pub mod roles;
pub mod session;

pub use claims::{decode_claims, Claims};
pub use roles::{Capability, Role};
pub use session::{AuthError, Identity, SessionStore, TokenStorage};
