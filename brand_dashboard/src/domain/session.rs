use async_trait::async_trait;

// Port for the single-slot session token storage.
// Tokens are opaque: no trimming, no shape checks, no expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, String>;
    async fn set(&self, token: String) -> Result<(), String>;
    // Returns whether a token was present before clearing.
    async fn clear(&self) -> Result<bool, String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(String),
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

impl From<Option<String>> for SessionState {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) => SessionState::Authenticated(token),
            None => SessionState::Anonymous,
        }
    }
}
