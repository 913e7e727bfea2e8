//! API token resolution.

use replicate_core::error::AuthError;
use replicate_store::StoredKeys;

/// Name of the stored key consulted in `keys.json`.
pub const REPLICATE_KEY_NAME: &str = "replicate";

/// Environment variable consulted as the last resolution path.
pub const TOKEN_ENV_VAR: &str = "REPLICATE_API_TOKEN";

/// Resolves the Replicate API token.
///
/// Precedence: explicit override (`--key`), then the stored `"replicate"`
/// key, then the `REPLICATE_API_TOKEN` environment variable. Resolution is
/// deferred to the moment a call needs the token, so adapters can be
/// registered without one.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    explicit: Option<String>,
    keys: StoredKeys,
}

impl TokenResolver {
    /// Creates a resolver with an optional explicit override.
    #[must_use]
    pub fn new(explicit: Option<String>, keys: StoredKeys) -> Self {
        Self { explicit, keys }
    }

    /// Resolves the token, or fails with the actionable [`AuthError`]
    /// message naming all three resolution paths.
    pub fn resolve(&self) -> Result<String, AuthError> {
        if let Some(token) = &self.explicit {
            return Ok(token.clone());
        }
        match self.keys.get(REPLICATE_KEY_NAME) {
            Ok(Some(token)) => return Ok(token),
            Ok(None) => {}
            Err(err) => {
                // An unreadable keys file counts as no stored key.
                tracing::debug!(error = %err, "could not read stored keys");
            }
        }
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(AuthError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replicate_store::ConfigDir;
    use std::fs;

    fn keys_in(tmp: &tempfile::TempDir) -> StoredKeys {
        let dir = ConfigDir::new(tmp.path());
        dir.ensure().expect("ensure");
        StoredKeys::new(&dir)
    }

    #[test]
    fn explicit_override_beats_stored_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = ConfigDir::new(tmp.path());
        dir.ensure().expect("ensure");
        fs::write(dir.keys_path(), r#"{"replicate": "stored"}"#).expect("write");

        let resolver = TokenResolver::new(Some("explicit".to_string()), StoredKeys::new(&dir));
        assert_eq!(resolver.resolve().expect("resolve"), "explicit");
    }

    #[test]
    fn stored_key_is_used_when_no_override() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = ConfigDir::new(tmp.path());
        dir.ensure().expect("ensure");
        fs::write(dir.keys_path(), r#"{"replicate": "stored"}"#).expect("write");

        let resolver = TokenResolver::new(None, StoredKeys::new(&dir));
        assert_eq!(resolver.resolve().expect("resolve"), "stored");
    }

    // The environment variable fallback is exercised indirectly; mutating
    // process-wide env vars in parallel unit tests is racy.

    #[test]
    fn missing_everywhere_is_an_auth_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let resolver = TokenResolver::new(None, keys_in(&tmp));

        if std::env::var(TOKEN_ENV_VAR).is_err() {
            let err = resolver.resolve().expect_err("should fail");
            assert!(err.to_string().contains("REPLICATE_API_TOKEN"));
            assert!(err.to_string().contains("--key"));
        }
    }
}
