// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, error, warn};

use crate::{
    api::Backend,
    session::{SessionStore, Slots},
    shell::{Route, Shell},
    storage::Storage,
};

pub(crate) const NO_TOKEN: &str = "no session token found";
pub(crate) const BANNED: &str = "account has been banned";
pub(crate) const VALIDATION_ERROR: &str = "error validating session";

/// Result of asking the backend about the stored session. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionStatus {
    pub(crate) valid: bool,
    pub(crate) user_id: Option<i64>,
    pub(crate) banned: bool,
    pub(crate) message: Option<String>,
    /// Set when the session could not be checked at all. The stored
    /// credential may still be good and is left alone.
    pub(crate) transient: bool,
}

impl SessionStatus {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    fn transient(message: Option<String>) -> Self {
        Self {
            message,
            transient: true,
            ..Self::default()
        }
    }
}

/// Checks the stored token with the backend. Only a ban purges storage.
pub(crate) async fn validate_session<S, B>(store: &SessionStore<S>, backend: &B) -> SessionStatus
where
    S: Storage<Slots>,
    B: Backend + ?Sized,
{
    let token = match store.token().await {
        Ok(Some(token)) => token,
        Ok(None) => return SessionStatus::invalid(NO_TOKEN),
        Err(e) => {
            warn!("Could not read the stored session: {}", e);
            return SessionStatus::invalid(NO_TOKEN);
        }
    };

    let envelope = match backend.validate_session(&token).await {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("Session validation failed: {}", e);
            return SessionStatus::transient(Some(VALIDATION_ERROR.to_owned()));
        }
    };

    if envelope.status {
        let Some(data) = envelope.data else {
            error!("Session validation succeeded without a payload");
            return SessionStatus::transient(Some(VALIDATION_ERROR.to_owned()));
        };
        debug!("Session valid: {}, user {:?}", data.valid, data.user_id);
        return SessionStatus {
            valid: data.valid,
            user_id: data.user_id,
            message: envelope.message,
            ..SessionStatus::default()
        };
    }

    if envelope.data.and_then(|data| data.banned) == Some(true) {
        warn!("The account behind the stored session is banned");
        if let Err(e) = store.clear().await {
            error!("Could not purge the banned session: {}", e);
        }
        return SessionStatus {
            banned: true,
            ..SessionStatus::invalid(BANNED)
        };
    }

    warn!(
        "The server could not validate the session: {}",
        envelope.message.as_deref().unwrap_or("no reason given")
    );
    SessionStatus::transient(envelope.message)
}

/// Gate for session-dependent actions. Returns the validated user ID, or
/// sends the user to the login page (after a notice, if banned).
pub(crate) async fn require_session<S, B, N>(
    store: &SessionStore<S>,
    backend: &B,
    shell: &N,
) -> Option<i64>
where
    S: Storage<Slots>,
    B: Backend + ?Sized,
    N: Shell + ?Sized,
{
    let status = validate_session(store, backend).await;
    if status.valid {
        return status.user_id;
    }

    if status.banned {
        shell.notify("Your account has been banned.");
    } else if !status.transient && status.message.as_deref() != Some(NO_TOKEN) {
        if let Err(e) = store.clear().await {
            error!("Could not purge the invalid session: {}", e);
        }
    }
    shell.navigate(Route::Login);
    None
}
