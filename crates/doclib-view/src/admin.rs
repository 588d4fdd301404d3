use serde::{Deserialize, Serialize};

/// What the current viewer may see. Passed explicitly to rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCapabilities {
    pub admin: bool,
}

impl ViewCapabilities {
    pub fn viewer() -> Self {
        Self { admin: false }
    }

    pub fn admin() -> Self {
        Self { admin: true }
    }
}

/// Client-side password check that reveals the administrator controls.
///
/// This only decides which buttons are drawn. Anyone can call the HTTP API
/// directly; real enforcement would have to live in the server.
#[derive(Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Capabilities for a password attempt.
    pub fn unlock(&self, attempt: &str) -> ViewCapabilities {
        if !self.password.is_empty() && attempt == self.password {
            ViewCapabilities::admin()
        } else {
            ViewCapabilities::viewer()
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}
