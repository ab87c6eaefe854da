// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    api::Backend,
    config::Settings,
    error::Result,
    password::Prompt,
    session::{SessionStore, Slots},
    shell::Shell,
    storage::Storage,
};

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod notifications;
pub(crate) mod search;
pub(crate) mod status;

/// Everything a command needs to talk to the forum and the user.
pub(crate) struct Context {
    pub(crate) settings: Settings,
    pub(crate) store: Arc<SessionStore<Box<dyn Storage<Slots>>>>,
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) shell: Arc<dyn Shell>,
    pub(crate) prompt: Arc<dyn Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: &Context) -> Result<()>;
}
