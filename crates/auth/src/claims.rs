//! JWT claims types

use serde::{Deserialize, Serialize};

/// Session claims as issued by Supabase auth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: Option<String>,
    pub iat: u64,
    pub exp: u64,
    #[serde(default)]
    pub aud: String,
    /// "authenticated" for signed-in users, "anon" for the public key
    #[serde(default)]
    pub role: String,
}

impl SupabaseClaims {
    pub fn is_anonymous(&self) -> bool {
        self.role == "anon"
    }
}
