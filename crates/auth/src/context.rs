//! Authorization context for authenticated sessions

use uuid::Uuid;

/// Represents an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl AuthContext {
    pub fn new(user_id: Uuid, email: Option<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            email,
            is_admin,
        }
    }

    /// Name shown in admin greetings and log lines
    pub fn display_name(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}
