use tracing::warn;

use crate::domain::ports::PreferenceStore;

// Preference key the cached credential lives under.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

// Single-credential view over a preference store.
pub struct TokenStore<P> {
    preferences: P,
}

impl<P> TokenStore<P>
where
    P: PreferenceStore,
{
    pub fn new(preferences: P) -> Self {
        Self { preferences }
    }

    // Empty string when nothing is stored.
    pub fn get(&self) -> String {
        self.preferences.get_string(ACCESS_TOKEN_KEY, "")
    }

    pub fn set(&self, token: &str) {
        self.preferences.put_string(ACCESS_TOKEN_KEY, token);
        self.flush();
    }

    pub fn clear(&self) {
        self.preferences.remove(ACCESS_TOKEN_KEY);
        self.flush();
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    // Best-effort persistence; the in-memory value stays authoritative.
    fn flush(&self) {
        if let Err(err) = self.preferences.flush() {
            warn!(error = %err, "failed to flush access token preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::RecordingPreferences;

    #[test]
    fn when_nothing_is_stored_then_get_returns_empty_string() {
        let store = TokenStore::new(RecordingPreferences::new());

        assert_eq!(store.get(), "");
    }

    #[test]
    fn when_token_is_set_then_it_is_stored_under_access_token_key_and_flushed() {
        let preferences = RecordingPreferences::new();
        let store = TokenStore::new(preferences.clone());

        store.set("token-1");

        assert_eq!(store.get(), "token-1");
        assert_eq!(preferences.value(ACCESS_TOKEN_KEY).as_deref(), Some("token-1"));
        assert_eq!(preferences.flushes(), 1);
    }

    #[test]
    fn when_token_is_cleared_then_get_returns_empty_string() {
        let preferences = RecordingPreferences::with_token("token-1");
        let store = TokenStore::new(preferences.clone());

        store.clear();

        assert_eq!(store.get(), "");
        assert_eq!(preferences.removes(), 1);
    }

    #[test]
    fn when_flush_fails_then_value_is_still_readable() {
        let preferences = RecordingPreferences::new().with_failing_flush();
        let store = TokenStore::new(preferences);

        store.set("token-1");

        assert_eq!(store.get(), "token-1");
    }
}
