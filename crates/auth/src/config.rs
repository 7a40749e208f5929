//! Authentication configuration

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Lowercased e-mail addresses allowed into the admin area.
    /// Empty means every valid session is an admin session.
    pub admin_emails: Vec<String>,
}

impl AuthConfig {
    pub fn is_admin_email(&self, email: Option<&str>) -> bool {
        if self.admin_emails.is_empty() {
            return true;
        }
        match email {
            Some(email) => {
                let email = email.trim().to_ascii_lowercase();
                self.admin_emails.iter().any(|allowed| *allowed == email)
            }
            None => false,
        }
    }
}
