//! User profile

use crate::error::{ClientError, ClientResult, StoreError};
use crate::session::Session;
use crate::store::{DocumentStore, collections};
use chrono::Utc;
use serde_json::json;
use shared::document::to_data;
use shared::models::{ProfileUpdate, UserProfile};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stored profile; an absent document yields an empty profile
    pub async fn load(&self, session: &Session) -> ClientResult<UserProfile> {
        let user = session.require_user("view your profile")?;
        match self.store.get(collections::USERS, &user.uid).await? {
            Some(doc) => doc
                .decode()
                .map_err(|e| StoreError::malformed(collections::USERS, e).into()),
            None => Ok(UserProfile {
                id: user.uid,
                email: user.email,
                ..Default::default()
            }),
        }
    }

    /// Save the editable fields of an existing profile
    pub async fn update(&self, session: &Session, update: &ProfileUpdate) -> ClientResult<()> {
        let user = session.require_user("update your profile")?;
        let mut data = to_data(update).map_err(|e| StoreError::malformed(collections::USERS, e))?;
        data.insert("updatedAt".into(), json!(Utc::now().to_rfc3339()));

        match self.store.update(collections::USERS, &user.uid, data).await {
            Ok(()) => {
                tracing::info!(uid = %user.uid, "Profile updated");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(ClientError::NotFound(format!("profile {}", user.uid))),
            Err(e) => Err(e.into()),
        }
    }
}
