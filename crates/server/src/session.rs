//! In-memory session tokens for browser logins.
//!
//! Tokens are opaque UUIDs and live only as long as the process; a
//! restart logs every browser out, which is acceptable for a
//! single-instance dashboard.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "comanda_session";

#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl SessionStore {
    /// Issues a fresh token bound to `username`.
    pub async fn issue(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.inner.write().await.insert(token, username.to_string());
        token
    }

    /// Looks up the username behind a token.
    pub async fn username(&self, token: Uuid) -> Option<String> {
        self.inner.read().await.get(&token).cloned()
    }

    /// Drops a token. Returns `false` if it was already gone.
    pub async fn revoke(&self, token: Uuid) -> bool {
        self.inner.write().await.remove(&token).is_some()
    }
}
