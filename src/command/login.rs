// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::warn;

use crate::{error::Result, password, session::Credential};

use super::Context;

/// Sign in and remember the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The e-mail address of the account.
    #[arg(long, short, env = "FORUM_EMAIL")]
    email: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let password = password::require(&*ctx.prompt, &self.email).await?;
        let login = ctx
            .backend
            .login(&self.email, &password)
            .await?
            .into_data("login")?;

        if !ctx.store.is_persistent().await {
            warn!("The session is only kept in memory and ends with this process");
        }
        let credential = Credential::new(login.token, login.user);
        ctx.store.save(&credential).await?;

        println!(
            "Signed in as {} <{}>",
            credential.user.name, credential.user.email
        );
        Ok(())
    }
}
