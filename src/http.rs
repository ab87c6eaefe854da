// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    api::{Backend, Envelope, Login, Notification, SearchHit, Validation},
    error::{self, Result},
    metadata,
};

#[derive(Serialize)]
struct ValidateBody<'req> {
    token: &'req str,
}

#[derive(Serialize)]
struct LoginBody<'req> {
    email: &'req str,
    password: &'req str,
}

/// [`Backend`] over the forum's REST API.
pub(crate) struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub(crate) fn new(base_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(metadata::USER_AGENT.as_str())
            .build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.endpoint("search")?;
        let _ = url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    async fn envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<Envelope<T>> {
        let status = response.status();
        let body = response.bytes().await?;
        debug!("{} answered with HTTP {}", operation, status);
        decode(status, &body, operation)
    }
}

/// Decodes the envelope whatever the HTTP status was, since the backend
/// reports rejections (including bans) in the body.
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    operation: &'static str,
) -> Result<Envelope<T>> {
    serde_json::from_slice(body).map_err(|e| {
        if status.is_success() {
            e.into()
        } else {
            error::Api::Status {
                operation,
                status: status.as_u16(),
            }
            .into()
        }
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn validate_session(&self, token: &SecretString) -> Result<Envelope<Validation>> {
        let response = self
            .http
            .post(self.endpoint("session/validate")?)
            .json(&ValidateBody {
                token: token.expose_secret(),
            })
            .send()
            .await?;
        Self::envelope(response, "session validation").await
    }

    async fn notifications(&self, user_id: i64) -> Result<Envelope<Vec<Notification>>> {
        let response = self
            .http
            .get(self.endpoint(&format!("notifications/{user_id}"))?)
            .send()
            .await?;
        Self::envelope(response, "notification fetch").await
    }

    async fn search(&self, query: &str) -> Result<Envelope<Vec<SearchHit>>> {
        let response = self.http.get(self.search_url(query)?).send().await?;
        Self::envelope(response, "search").await
    }

    async fn login(&self, email: &str, password: &SecretString) -> Result<Envelope<Login>> {
        let response = self
            .http
            .post(self.endpoint("auth/login")?)
            .json(&LoginBody {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;
        Self::envelope(response, "login").await
    }
}
