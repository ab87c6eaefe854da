// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Fakes shared by the unit tests.

#![allow(clippy::unwrap_used)]

use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use secrecy::SecretString;

use crate::{
    api::{Backend, Envelope, Login, Notification, SearchHit, Validation},
    error::{Error, Result},
    session::{SessionStore, Slots, User},
    shell::{Route, Shell},
    storage::Memory,
};

pub(crate) fn alice() -> User {
    User {
        id: 7,
        name: "Alice".to_owned(),
        email: "alice@example.edu".to_owned(),
        profile_picture: None,
        points: Some(12),
    }
}

pub(crate) fn alice_slots() -> Slots {
    Slots {
        token: Some("t0k".to_owned()),
        user: Some(serde_json::to_string(&alice()).unwrap()),
    }
}

/// A store holding Alice's credential, plus a handle on its backing memory.
pub(crate) fn stored_session() -> (SessionStore<Memory<Slots>>, Memory<Slots>) {
    let memory = Memory::with_data(alice_slots());
    (SessionStore::new(memory.clone()), memory)
}

pub(crate) fn valid_for(user_id: i64) -> Envelope<Validation> {
    Envelope {
        status: true,
        data: Some(Validation {
            valid: true,
            user_id: Some(user_id),
            banned: None,
        }),
        message: None,
    }
}

pub(crate) fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id: Some(id),
        message: Some(format!("notification {id}")),
        is_read,
        created_at: None,
    }
}

pub(crate) fn hit(id: i64, title: &str) -> SearchHit {
    SearchHit {
        id,
        title: title.to_owned(),
        description: None,
        author: Some("alice".to_owned()),
        department: None,
    }
}

fn offline() -> Error {
    Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "offline"))
}

/// Backend double. Unconfigured calls answer with a successful, empty (or, for
/// search, single-hit echo) envelope and everything is counted.
#[derive(Default)]
pub(crate) struct FakeBackend {
    validation: Option<Envelope<Validation>>,
    validation_fails: bool,
    notifications: Option<Vec<Notification>>,
    notifications_fail: bool,
    notification_envelope: Option<Envelope<Vec<Notification>>>,
    search_fails: bool,
    login: Option<Envelope<Login>>,
    validation_calls: AtomicUsize,
    notification_calls: Mutex<Vec<i64>>,
    queries: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn validating(mut self, envelope: Envelope<Validation>) -> Self {
        self.validation = Some(envelope);
        self
    }

    pub(crate) fn failing_validation(mut self) -> Self {
        self.validation_fails = true;
        self
    }

    pub(crate) fn notifying(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Answers notification fetches with `envelope` as is.
    pub(crate) fn answering_notifications(mut self, envelope: Envelope<Vec<Notification>>) -> Self {
        self.notification_envelope = Some(envelope);
        self
    }

    pub(crate) fn failing_notifications(mut self) -> Self {
        self.notifications_fail = true;
        self
    }

    pub(crate) fn failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    pub(crate) fn logging_in(mut self, envelope: Envelope<Login>) -> Self {
        self.login = Some(envelope);
        self
    }

    pub(crate) fn validations(&self) -> usize {
        self.validation_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn notification_requests(&self) -> Vec<i64> {
        self.notification_calls.lock().unwrap().clone()
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn validate_session(&self, _: &SecretString) -> Result<Envelope<Validation>> {
        let _ = self.validation_calls.fetch_add(1, Ordering::SeqCst);
        if self.validation_fails {
            return Err(offline());
        }
        Ok(self.validation.clone().unwrap_or_else(|| valid_for(7)))
    }

    async fn notifications(&self, user_id: i64) -> Result<Envelope<Vec<Notification>>> {
        self.notification_calls.lock().unwrap().push(user_id);
        if self.notifications_fail {
            return Err(offline());
        }
        if let Some(ref envelope) = self.notification_envelope {
            return Ok(envelope.clone());
        }
        Ok(Envelope {
            status: true,
            data: Some(self.notifications.clone().unwrap_or_default()),
            message: None,
        })
    }

    async fn search(&self, query: &str) -> Result<Envelope<Vec<SearchHit>>> {
        self.queries.lock().unwrap().push(query.to_owned());
        if self.search_fails {
            return Err(offline());
        }
        Ok(Envelope {
            status: true,
            data: Some(vec![hit(1, query)]),
            message: None,
        })
    }

    async fn login(&self, _: &str, _: &SecretString) -> Result<Envelope<Login>> {
        Ok(self.login.clone().unwrap_or(Envelope {
            status: false,
            data: None,
            message: Some("invalid credentials".to_owned()),
        }))
    }
}

#[derive(Default)]
pub(crate) struct RecordingShell {
    routes: Mutex<Vec<Route>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub(crate) fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_owned());
    }
}

/// Always answers with the same password.
pub(crate) struct FixedPrompt(pub(crate) &'static str);

#[async_trait]
impl crate::password::Prompt for FixedPrompt {
    async fn prompt(&self, _: &str) -> Result<Option<SecretString>> {
        Ok(Some(SecretString::new(self.0.to_owned())))
    }
}
