//! Signed-in session
//!
//! The session is an explicit object: created with [`Session::init`], passed
//! by reference to every service that acts for a user, and released with
//! [`Session::teardown`]. Nothing reads the current user from global state.

use crate::error::{ClientError, ClientResult, StoreError};
use crate::store::{DocumentStore, collections};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::{Value, json};
use shared::document::DocumentData;
use std::sync::Arc;

/// Identity returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
}

/// Hosted identity provider (popup sign-in, sign-out, restore)
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self) -> ClientResult<AuthUser>;
    async fn sign_out(&self) -> ClientResult<()>;
    /// User restored from a previous visit, if any
    async fn current_user(&self) -> ClientResult<Option<AuthUser>>;
}

/// Signed-in user as the storefront sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
    pub is_admin: bool,
}

pub struct Session {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    user: RwLock<Option<SessionUser>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("user", &*self.user.read()).finish()
    }
}

impl Session {
    /// Start a session, restoring the provider's remembered user
    pub async fn init(auth: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> ClientResult<Self> {
        let session = Self {
            auth,
            store,
            user: RwLock::new(None),
        };
        if let Some(user) = session.auth.current_user().await? {
            let is_admin = session.check_admin(&user.uid).await;
            tracing::info!(uid = %user.uid, is_admin, "Session restored");
            *session.user.write() = Some(to_session_user(user, is_admin));
        }
        Ok(session)
    }

    /// Sign in through the provider and record the profile document
    pub async fn sign_in(&self) -> ClientResult<SessionUser> {
        let user = self.auth.sign_in().await?;
        let is_admin = self.check_admin(&user.uid).await;
        self.record_profile(&user, is_admin).await?;

        let session_user = to_session_user(user, is_admin);
        tracing::info!(uid = %session_user.uid, is_admin, "Signed in");
        *self.user.write() = Some(session_user.clone());
        Ok(session_user)
    }

    pub async fn sign_out(&self) -> ClientResult<()> {
        self.auth.sign_out().await?;
        if let Some(user) = self.user.write().take() {
            tracing::info!(uid = %user.uid, "Signed out");
        }
        Ok(())
    }

    /// End the session. The provider keeps its remembered user; only this
    /// session's state is released.
    pub fn teardown(self) {
        tracing::debug!(signed_in = self.is_authenticated(), "Session torn down");
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.read().as_ref().is_some_and(|u| u.is_admin)
    }

    /// Signed-in user, or `Unauthorized` naming what needed it
    pub fn require_user(&self, action: &str) -> ClientResult<SessionUser> {
        self.user()
            .ok_or_else(|| ClientError::Unauthorized(format!("Please login to {action}")))
    }

    /// Signed-in admin, or `Unauthorized` / `Forbidden`
    pub fn require_admin(&self) -> ClientResult<SessionUser> {
        let user = self.require_user("access the admin panel")?;
        if !user.is_admin {
            return Err(ClientError::Forbidden("admin access required".into()));
        }
        Ok(user)
    }

    /// Admin = an `admins/{uid}` document exists. Lookup failures count as
    /// not admin.
    async fn check_admin(&self, uid: &str) -> bool {
        match self.store.get(collections::ADMINS, uid).await {
            Ok(doc) => doc.is_some(),
            Err(err) => {
                tracing::warn!(uid, error = %err, "Admin status check failed");
                false
            }
        }
    }

    async fn record_profile(&self, user: &AuthUser, is_admin: bool) -> Result<(), StoreError> {
        let existing = self.store.get(collections::USERS, &user.uid).await?;

        let mut data = DocumentData::new();
        data.insert("email".into(), json!(user.email));
        data.insert("displayName".into(), json!(user.display_name));
        data.insert("photoURL".into(), json!(user.photo_url));
        data.insert("isAdmin".into(), Value::Bool(is_admin));
        if existing.is_none() {
            data.insert("createdAt".into(), json!(Utc::now().to_rfc3339()));
        }
        self.store.set(collections::USERS, &user.uid, data, true).await
    }
}

fn to_session_user(user: AuthUser, is_admin: bool) -> SessionUser {
    SessionUser {
        uid: user.uid,
        email: user.email,
        display_name: user.display_name,
        photo_url: user.photo_url,
        is_admin,
    }
}
