//! Value objects - immutable domain concepts without identity.

pub mod delivery_token;

pub use delivery_token::{AuthorityKind, DeliveryToken};
