use log::debug;

use super::access_model::{Decision, DenyReason, Operation};
use crate::errors::Result;
use crate::identity::Identity;

/// Decides whether `identity` may perform `operation`.
///
/// Rules are evaluated in order:
/// 1. no identity resolved denies with `Unauthenticated`;
/// 2. admin operations require the admin role;
/// 3. owner-scoped operations require `resource_owner_id` to equal the
///    caller's user id (a missing owner is treated as a mismatch);
/// 4. everything else is allowed.
///
/// The predicate is pure: it never touches storage.
pub fn authorize(
    identity: Option<&Identity>,
    operation: Operation,
    resource_owner_id: Option<&str>,
) -> Decision {
    let Some(identity) = identity else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if operation.requires_admin() && !identity.is_admin() {
        return Decision::Deny(DenyReason::Forbidden);
    }

    if operation.is_owner_scoped() && resource_owner_id != Some(identity.user_id.as_str()) {
        return Decision::Deny(DenyReason::Forbidden);
    }

    Decision::Allow
}

/// Runs [`authorize`] and converts a denial into a typed error.
pub fn ensure_authorized(
    identity: Option<&Identity>,
    operation: Operation,
    resource_owner_id: Option<&str>,
) -> Result<()> {
    let decision = authorize(identity, operation, resource_owner_id);
    if let Decision::Deny(reason) = decision {
        debug!(
            "Denied {:?} ({:?}) for user {:?}",
            operation,
            reason,
            identity.map(|i| i.user_id.as_str())
        );
    }
    decision.into_result()
}
