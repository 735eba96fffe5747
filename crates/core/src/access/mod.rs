//! Access guard - pure authorization decisions for every guarded operation.

mod access_guard;
mod access_model;

pub use access_guard::{authorize, ensure_authorized};
pub use access_model::{Decision, DenyReason, Operation};
