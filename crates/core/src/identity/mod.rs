//! Identity module - the trusted caller identity and the resolver seam.

mod identity_model;
mod identity_traits;

pub use identity_model::{Identity, Role};
pub use identity_traits::IdentityResolverTrait;
