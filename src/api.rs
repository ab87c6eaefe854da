// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use tabled::Tabled;

use crate::{
    error::{self, Result},
    session::User,
};

/// Every backend response is wrapped in `{status, data, message}`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) status: bool,
    #[serde(default = "Option::default")]
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps a successful envelope, turning `status: false` or a missing
    /// payload into an API error.
    pub(crate) fn into_data(self, operation: &'static str) -> Result<T> {
        if !self.status {
            return Err(error::Api::Rejected {
                operation,
                message: self
                    .message
                    .unwrap_or_else(|| "no reason given".to_owned()),
            }
            .into());
        }
        self.data
            .ok_or_else(|| error::Api::MissingData { operation }.into())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct Validation {
    #[serde(default)]
    pub(crate) valid: bool,
    #[serde(default)]
    pub(crate) user_id: Option<i64>,
    #[serde(default)]
    pub(crate) banned: Option<bool>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Tabled)]
pub(crate) struct Notification {
    #[serde(default)]
    #[tabled(rename = "ID", display_with = "display_option")]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    #[tabled(rename = "Message", display_with = "display_option")]
    pub(crate) message: Option<String>,
    #[tabled(rename = "Read")]
    pub(crate) is_read: bool,
    #[serde(default)]
    #[tabled(rename = "Received", display_with = "display_option")]
    pub(crate) created_at: Option<String>,
}

/// Counts the entries that have not been read yet.
pub(crate) fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Tabled)]
pub(crate) struct SearchHit {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[serde(rename = "name")]
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[serde(default)]
    #[tabled(rename = "Description", display_with = "display_option")]
    pub(crate) description: Option<String>,
    #[serde(rename = "owner_name", default)]
    #[tabled(rename = "Author", display_with = "display_option")]
    pub(crate) author: Option<String>,
    #[serde(rename = "department_name", default)]
    #[tabled(rename = "Department", display_with = "display_option")]
    pub(crate) department: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Login {
    pub(crate) token: SecretString,
    pub(crate) user: User,
}

fn display_option<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// The forum backend as seen by the session, presence and search layers.
#[async_trait]
pub(crate) trait Backend: Send + Sync {
    async fn validate_session(&self, token: &SecretString) -> Result<Envelope<Validation>>;

    async fn notifications(&self, user_id: i64) -> Result<Envelope<Vec<Notification>>>;

    async fn search(&self, query: &str) -> Result<Envelope<Vec<SearchHit>>>;

    async fn login(&self, email: &str, password: &SecretString) -> Result<Envelope<Login>>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn validate_session(&self, token: &SecretString) -> Result<Envelope<Validation>> {
        (**self).validate_session(token).await
    }

    async fn notifications(&self, user_id: i64) -> Result<Envelope<Vec<Notification>>> {
        (**self).notifications(user_id).await
    }

    async fn search(&self, query: &str) -> Result<Envelope<Vec<SearchHit>>> {
        (**self).search(query).await
    }

    async fn login(&self, email: &str, password: &SecretString) -> Result<Envelope<Login>> {
        (**self).login(email, password).await
    }
}
