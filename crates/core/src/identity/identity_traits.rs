use super::identity_model::Identity;

/// Resolves a session credential into a trusted identity.
///
/// Implementations own the credential format entirely; the core never parses
/// or validates raw credentials. The returned role must come from a
/// server-side source, never from a client-editable field.
pub trait IdentityResolverTrait: Send + Sync {
    /// Returns `None` when the credential is missing, invalid, expired, or
    /// refers to an account that no longer exists.
    fn resolve_identity(&self, credential: &str) -> Option<Identity>;
}
