//! Session handling.
//!
//! Not a real authentication system: any non-empty email signs in and the
//! password is never verified. Exactly one current user exists at a time;
//! sign-out discards it together with its durable entry.

use crate::core::{Result, StoreError};
use crate::model::{User, UserPatch};
use crate::storage::{DurableStore, catalog};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct SessionManager {
    durable: DurableStore,
    current: RwLock<Option<User>>,
    latency: Duration,
}

impl SessionManager {
    /// Restores the stored session, when one exists.
    pub(crate) fn load(durable: DurableStore, latency: Duration) -> Self {
        let stored: Option<User> = durable.load(catalog::keys::USER, None);
        Self {
            durable,
            current: RwLock::new(stored),
            latency,
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Signs in. Any non-empty email succeeds; the password is ignored.
    /// Yields the stored account when one exists, the seed account
    /// otherwise.
    pub async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<User> {
        self.simulate_latency().await;
        if email.trim().is_empty() {
            return Err(StoreError::Validation("email is required".into()));
        }

        let mut current = self.current.write().await;
        let user = current
            .clone()
            .or_else(|| self.durable.load(catalog::keys::USER, None))
            .unwrap_or_else(catalog::default_user);
        *current = Some(user.clone());
        self.durable.save(catalog::keys::USER, &user);
        Ok(user)
    }

    /// Registers a new account and signs it in. The display name falls back
    /// to the email's local part.
    pub async fn sign_up(&self, email: &str, _password: &str, name: Option<&str>) -> Result<User> {
        self.simulate_latency().await;
        if email.trim().is_empty() {
            return Err(StoreError::Validation("email is required".into()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| User::name_from_email(email)),
            ..catalog::default_user()
        };
        *self.current.write().await = Some(user.clone());
        self.durable.save(catalog::keys::USER, &user);
        Ok(user)
    }

    /// Discards the current session and its durable entry.
    pub async fn sign_out(&self) {
        *self.current.write().await = None;
        self.durable.remove(catalog::keys::USER);
    }

    /// The current user, when signed in. Immediate; no simulated latency.
    pub async fn get_session(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    /// Same as [`SessionManager::get_session`] behind the simulated latency,
    /// mirroring the remote client's async user lookup.
    pub async fn get_user(&self) -> Option<User> {
        self.simulate_latency().await;
        self.get_session().await
    }

    /// Shallow-merges `patch` onto the current user and persists the
    /// result.
    pub async fn update_user(&self, patch: &UserPatch) -> Result<User> {
        self.simulate_latency().await;
        let mut current = self.current.write().await;
        let user = current.as_mut().ok_or(StoreError::NoSession)?;
        user.apply(patch);
        let updated = user.clone();
        self.durable.save(catalog::keys::USER, &updated);
        Ok(updated)
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }
}
