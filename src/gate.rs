use std::collections::BTreeMap;

/// Storage key for the authenticated flag.
pub const AUTH_SESSION_KEY: &str = "portfolio_authenticated";

/// Session-scoped string storage collaborator (browser sessionStorage in
/// the original host). Values live until the session ends.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and the CLI.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Client-side password gate for the works sub-application.
///
/// This is a presentational speed-bump, NOT a security boundary: the
/// expected password is a plain string compare and the flag lives in
/// session storage with no server check. Deliberately kept that way; the
/// documented behavior is the client-side-only gate.
#[derive(Clone, Debug)]
pub struct PasswordGate {
    password: String,
}

impl PasswordGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Read once at startup: a persisted "true" skips the prompt for the
    /// rest of the session.
    pub fn is_authenticated(&self, store: &dyn SessionStore) -> bool {
        store.get(AUTH_SESSION_KEY).as_deref() == Some("true")
    }

    /// Checks the submitted password; on success persists the flag so the
    /// next render in the same session skips the prompt.
    pub fn submit(&self, store: &mut dyn SessionStore, attempt: &str) -> bool {
        if attempt == self.password {
            store.set(AUTH_SESSION_KEY, "true");
            tracing::debug!("works gate unlocked");
            true
        } else {
            false
        }
    }

    pub fn logout(&self, store: &mut dyn SessionStore) {
        store.remove(AUTH_SESSION_KEY);
    }
}
