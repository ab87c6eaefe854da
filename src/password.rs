// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::env;

use async_trait::async_trait;
use log::debug;
use secrecy::SecretString;
use tokio::task;

use crate::{
    error::{self, Result},
    metadata,
};

pub(crate) const PASSWORD_ENV: &str = "FORUM_PASSWORD";

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, email: &str) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, email: &str) -> Result<Option<SecretString>> {
        (**self).prompt(email).await
    }
}

/// Tries each prompt in turn until one produces a password or fails.
#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, email: &str) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(email).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// Reads the password from a variable for scripted use.
pub(crate) struct EnvPrompt {
    variable: String,
}

impl EnvPrompt {
    pub(crate) fn new() -> Self {
        Self::with_variable(PASSWORD_ENV)
    }

    pub(crate) fn with_variable(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

#[async_trait]
impl Prompt for EnvPrompt {
    async fn prompt(&self, _: &str) -> Result<Option<SecretString>> {
        Ok(env::var(&self.variable)
            .ok()
            .filter(|value| !value.is_empty())
            .map(|value| {
                debug!("Using the password from {}", self.variable);
                SecretString::new(value)
            }))
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, email: &str) -> Result<Option<SecretString>> {
        let label = format!("{} password for {}: ", *metadata::CLIENT_DISPLAY_NAME, email);

        Ok(Some(
            task::spawn_blocking(move || rpassword::prompt_password(label).map(SecretString::new))
                .await??,
        ))
    }
}

/// Asks the configured prompts for a password, failing if none answers.
pub(crate) async fn require(prompt: &(impl Prompt + ?Sized), email: &str) -> Result<SecretString> {
    prompt
        .prompt(email)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}
