//! Concrete authentication backend
//!
//! Sessions are stateless: the signed token is the whole session, so the
//! backend only needs the verification config.

use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate a session token and resolve it to an auth context
    pub fn authenticate(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        if claims.is_anonymous() {
            return Err(AuthError::AnonymousSession);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        let is_admin = self.config.is_admin_email(claims.email.as_deref());

        Ok(AuthContext::new(user_id, claims.email, is_admin))
    }

    /// Like `authenticate`, but only admits allowlisted sessions
    pub fn authenticate_admin(&self, token: &str) -> Result<AuthContext, AuthError> {
        let ctx = self.authenticate(token)?;
        if !ctx.is_admin {
            tracing::warn!(user_id = %ctx.user_id, "Non-admin session attempted admin access");
            return Err(AuthError::NotAdmin);
        }
        Ok(ctx)
    }
}
