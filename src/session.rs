// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{error::Result, storage::Storage};

/// The denormalized account snapshot kept next to the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) points: Option<i64>,
}

#[derive(Clone, Debug)]
pub(crate) struct Credential {
    pub(crate) token: SecretString,
    pub(crate) user: User,
}

impl Credential {
    pub(crate) fn new(token: SecretString, user: User) -> Self {
        Self { token, user }
    }
}

/// The persisted layout: two independent string slots, exactly as a browser
/// keeps them. `user` holds the JSON-encoded [`User`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Slots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user: Option<String>,
}

/// Owns the stored credential. Token and snapshot are always written and
/// purged together; anything else found on disk is purged on read.
pub(crate) struct SessionStore<S> {
    storage: Mutex<S>,
}

impl<S: Storage<Slots>> SessionStore<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    pub(crate) async fn token(&self) -> Result<Option<SecretString>> {
        let slots = self.storage.lock().await.get().await?;
        Ok(slots
            .and_then(|slots| slots.token)
            .filter(|token| !token.is_empty())
            .map(SecretString::new))
    }

    pub(crate) async fn load(&self) -> Result<Option<Credential>> {
        let mut storage = self.storage.lock().await;
        let slots = storage.get().await?.unwrap_or_default();
        let token = slots.token.filter(|token| !token.is_empty());

        match (token, slots.user) {
            (None, None) => Ok(None),
            (Some(token), Some(user)) => match serde_json::from_str::<User>(&user) {
                Ok(user) => Ok(Some(Credential::new(SecretString::new(token), user))),
                Err(e) => {
                    warn!("The stored user snapshot is corrupt and will be discarded: {}", e);
                    storage.clear().await?;
                    Ok(None)
                }
            },
            (token, _) => {
                warn!(
                    "Found a stored {} without its counterpart; discarding it",
                    if token.is_some() { "token" } else { "user snapshot" }
                );
                storage.clear().await?;
                Ok(None)
            }
        }
    }

    pub(crate) async fn save(&self, credential: &Credential) -> Result<()> {
        let slots = Slots {
            token: Some(credential.token.expose_secret().clone()),
            user: Some(serde_json::to_string(&credential.user)?),
        };
        self.storage.lock().await.update(&slots).await?;
        debug!("Stored credential for user {}", credential.user.id);
        Ok(())
    }

    pub(crate) async fn clear(&self) -> Result<()> {
        self.storage.lock().await.clear().await
    }

    pub(crate) async fn is_persistent(&self) -> bool {
        self.storage.lock().await.is_persistent()
    }
}
